//! Loan endpoints

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
    models::loan::{Loan, LoanForm, LoanQuery},
    views, AppState,
};

use super::{search_term, RecordId, Submitted};

#[derive(Serialize, ToSchema)]
pub struct LoanList {
    pub loans: Vec<Loan>,
}

/// Loan list page, with a form listing the books that can be lent
pub async fn loans_page(
    State(state): State<AppState>,
    Query(query): Query<LoanQuery>,
) -> AppResult<Markup> {
    let search = search_term(&query.search);
    let loans = state.services.loans.list(search).await?;
    let available = state.services.books.available().await?;
    Ok(views::loans::list(&loans, &available, search))
}

/// Lend a book to a customer
///
/// The book is chosen by `book_id`, or by its name when no id is given. Its
/// author, year and type are copied into the loan and it becomes unavailable.
#[utoipa::path(
    post,
    path = "/loans/create",
    tag = "loans",
    request_body(content = LoanForm, content_type = "application/json"),
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Invalid form data or unknown book", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is already lent", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    Submitted(form): Submitted<LoanForm>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.create_loan(form).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Rewrite an existing loan
#[utoipa::path(
    post,
    path = "/loans/{id}/edit",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    request_body(content = LoanForm, content_type = "application/json"),
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 400, description = "Invalid form data", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_loan(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Submitted(form): Submitted<LoanForm>,
) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.update_loan(id, form).await?;
    Ok(Json(loan))
}

/// List all loans as JSON
#[utoipa::path(
    get,
    path = "/loans/json",
    tag = "loans",
    responses(
        (status = 200, description = "All loans", body = LoanList)
    )
)]
pub async fn list_loans_json(State(state): State<AppState>) -> AppResult<Json<LoanList>> {
    let loans = state.services.loans.list(None).await?;
    Ok(Json(LoanList { loans }))
}
