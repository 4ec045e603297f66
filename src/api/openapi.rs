//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::api::{books, customers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.3.0",
        description = "Small library management: books, customers and loans",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::edit_book,
        books::list_books_json,
        // Customers
        customers::create_customer,
        customers::edit_customer,
        customers::list_customers_json,
        // Loans
        loans::create_loan,
        loans::edit_loan,
        loans::list_loans_json,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookForm,
            crate::models::book::BookType,
            crate::models::book::BookStatus,
            books::BookList,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CustomerForm,
            customers::CustomerList,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanForm,
            loans::LoanList,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "customers", description = "Customer registry"),
        (name = "loans", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
