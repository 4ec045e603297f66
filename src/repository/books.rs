//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
    sanitize::Escaped,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List books, optionally keeping only names containing `search`
    ///
    /// `search` is compared with the stored text, so it must already be escaped.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE ? IS NULL OR instr(name, ?) > 0
            ORDER BY id
            "#,
        )
        .bind(search)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a new book; it starts out available
    pub async fn create(&self, book: &Escaped<NewBook>) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, author, year_published, book_type, status)
            VALUES (?, ?, ?, ?, 'available')
            RETURNING *
            "#,
        )
        .bind(&book.name)
        .bind(&book.author)
        .bind(book.year_published)
        .bind(book.book_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Replace the descriptive fields of a book; the status is left alone
    pub async fn update(&self, id: i64, book: &Escaped<NewBook>) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET name = ?, author = ?, year_published = ?, book_type = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&book.name)
        .bind(&book.author)
        .bind(book.year_published)
        .bind(book.book_type)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }
}
