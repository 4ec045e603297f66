//! Book endpoints

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
    models::book::{Book, BookForm, BookQuery},
    views, AppState,
};

use super::{search_term, RecordId, Submitted};

/// Every book, as returned by `/books/json`
#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<Book>,
}

/// Book list page
pub async fn books_page(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Markup> {
    let search = search_term(&query.search);
    let books = state.services.books.list(search).await?;
    Ok(views::books::list(&books, search))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books/create",
    tag = "books",
    request_body(content = BookForm, content_type = "application/json"),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid form data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Submitted(form): Submitted<BookForm>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(form).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update an existing book
#[utoipa::path(
    post,
    path = "/books/{id}/edit",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body(content = BookForm, content_type = "application/json"),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid form data", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Submitted(form): Submitted<BookForm>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(id, form).await?;
    Ok(Json(book))
}

/// List all books as JSON
#[utoipa::path(
    get,
    path = "/books/json",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BookList)
    )
)]
pub async fn list_books_json(State(state): State<AppState>) -> AppResult<Json<BookList>> {
    let books = state.services.books.list(None).await?;
    Ok(Json(BookList { books }))
}
