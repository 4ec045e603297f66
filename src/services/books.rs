//! Book catalog service

use crate::{
    error::AppResult,
    models::book::{Book, BookForm, BookStatus},
    repository::Repository,
    sanitize::{escape_html, Sanitize},
    validation::ValidationPolicy,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    policy: ValidationPolicy,
}

impl BooksService {
    pub fn new(repository: Repository, policy: ValidationPolicy) -> Self {
        Self { repository, policy }
    }

    /// List books whose name contains `search`, or all books
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        // Stored names are escaped, so the search term must be as well
        let search = search.map(escape_html);
        self.repository.books.list(search.as_deref()).await
    }

    /// Books that can currently be lent
    pub async fn available(&self) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list(None).await?;
        Ok(books
            .into_iter()
            .filter(|book| book.status == BookStatus::Available)
            .collect())
    }

    /// Validate, escape and store a new book
    pub async fn create(&self, form: BookForm) -> AppResult<Book> {
        let book = form.validated(&self.policy)?.sanitize();
        let book = self.repository.books.create(&book).await?;
        tracing::info!(book_id = book.id, "Book created");
        Ok(book)
    }

    /// Validate, escape and apply changes to an existing book
    pub async fn update(&self, id: i64, form: BookForm) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;
        let book = form.validated(&self.policy)?.sanitize();
        let book = self.repository.books.update(id, &book).await?;
        tracing::info!(book_id = book.id, "Book updated");
        Ok(book)
    }
}
