//! HTTP handlers and routing for Shelfmark

pub mod books;
pub mod customers;
pub mod health;
pub mod home;
pub mod loans;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{
        header::{CONTENT_SECURITY_POLICY, CONTENT_TYPE},
        request::Parts,
        HeaderValue, Uri,
    },
    routing::{get, post},
    Form, Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{error::AppError, AppState};

/// Request body accepted either as JSON or as an url-encoded HTML form
pub struct Submitted<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Submitted<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Submitted(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Submitted(value))
        } else {
            Err(AppError::BadRequest(
                "Expected a JSON or url-encoded form body".to_string(),
            ))
        }
    }
}

/// Record id taken from the path
///
/// An id that is not an integer can never match a record, so it is
/// reported as not found rather than as a malformed request.
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(format!("No record at {}", parts.uri.path())))?;
        Ok(RecordId(id))
    }
}

/// Trim the `search` query parameter, dropping it when blank
pub(crate) fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Create the application router with all routes
///
/// Every response, including errors and unknown routes, carries the
/// configured Content-Security-Policy header.
pub fn router(state: AppState) -> anyhow::Result<Router> {
    let csp = HeaderValue::from_str(&state.config.content_security_policy())?;

    let router = Router::new()
        .route("/", get(home::home_page))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::books_page))
        .route("/books/", get(books::books_page))
        .route("/books/create", post(books::create_book))
        .route("/books/:id/edit", post(books::edit_book))
        .route("/books/json", get(books::list_books_json))
        // Customers
        .route("/customers", get(customers::customers_page))
        .route("/customers/", get(customers::customers_page))
        .route("/customers/create", post(customers::create_customer))
        .route("/customers/:id/edit", post(customers::edit_customer))
        .route("/customers/json", get(customers::list_customers_json))
        // Loans
        .route("/loans", get(loans::loans_page))
        .route("/loans/", get(loans::loans_page))
        .route("/loans/create", post(loans::create_loan))
        .route("/loans/:id/edit", post(loans::edit_loan))
        .route("/loans/json", get(loans::list_loans_json))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(CONTENT_SECURITY_POLICY, csp));

    Ok(router)
}
