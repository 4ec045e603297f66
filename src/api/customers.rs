//! Customer endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use maud::Markup;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::customer::{Customer, CustomerForm, CustomerQuery},
    views, AppState,
};

use super::{search_term, RecordId, Submitted};

#[derive(Serialize, ToSchema)]
pub struct CustomerList {
    pub customers: Vec<Customer>,
}

/// Customer list page
pub async fn customers_page(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Markup> {
    let search = search_term(&query.search);
    let customers = state.services.customers.list(search).await?;
    Ok(views::customers::list(&customers, search))
}

/// Register a new customer
#[utoipa::path(
    post,
    path = "/customers/create",
    tag = "customers",
    request_body(content = CustomerForm, content_type = "application/json"),
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid form data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Submitted(form): Submitted<CustomerForm>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state.services.customers.create(form).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Update an existing customer
#[utoipa::path(
    post,
    path = "/customers/{id}/edit",
    tag = "customers",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    request_body(content = CustomerForm, content_type = "application/json"),
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Invalid form data", body = crate::error::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_customer(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Submitted(form): Submitted<CustomerForm>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.update(id, form).await?;
    Ok(Json(customer))
}

/// List all customers as JSON
#[utoipa::path(
    get,
    path = "/customers/json",
    tag = "customers",
    responses(
        (status = 200, description = "All customers", body = CustomerList)
    )
)]
pub async fn list_customers_json(State(state): State<AppState>) -> AppResult<Json<CustomerList>> {
    let customers = state.services.customers.list(None).await?;
    Ok(Json(CustomerList { customers }))
}
