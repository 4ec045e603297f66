//! Loans repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{BookRef, Loan, LoanChanges, NewLoan},
    },
    sanitize::Escaped,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List loans, optionally keeping those whose customer or book name
    /// contains `search` (already escaped)
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE ? IS NULL OR instr(customer_name, ?) > 0 OR instr(book_name, ?) > 0
            ORDER BY id
            "#,
        )
        .bind(search)
        .bind(search)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Lend a book: copy its details into a new loan and mark it unavailable
    ///
    /// A name reference is compared with stored names, which are escaped, so
    /// the loan must be sanitized first. Among books sharing that name an
    /// available one is taken, lowest id first.
    pub async fn create(&self, loan: &Escaped<NewLoan>) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let book = match &loan.book {
            BookRef::Id(id) => sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
                .bind(*id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::field("book_id", "Book not found"))?,
            BookRef::Name(name) => sqlx::query_as::<_, Book>(
                r#"
                SELECT * FROM books
                WHERE name = ?
                ORDER BY CASE status WHEN 'available' THEN 0 ELSE 1 END, id
                LIMIT 1
                "#,
            )
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::field("book_name", "Book not found"))?,
        };

        // Conditional so that two concurrent loans cannot both claim the book
        let claimed = sqlx::query("UPDATE books SET status = 'unavailable' WHERE id = ? AND status = 'available'")
            .bind(book.id)
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Err(AppError::Conflict(format!("Book {} is not available", book.id)));
        }

        let row = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                customer_name, book_name, loan_date, return_date,
                original_author, original_year_published, original_book_type
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&loan.customer_name)
        .bind(&book.name)
        .bind(loan.loan_date)
        .bind(loan.return_date)
        .bind(&book.author)
        .bind(book.year_published)
        .bind(book.book_type)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }

    /// Replace every field of a loan; books are not touched
    pub async fn update(&self, id: i64, loan: &Escaped<LoanChanges>) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET customer_name = ?, book_name = ?, loan_date = ?, return_date = ?,
                original_author = ?, original_year_published = ?, original_book_type = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&loan.customer_name)
        .bind(&loan.book_name)
        .bind(loan.loan_date)
        .bind(loan.return_date)
        .bind(&loan.original_author)
        .bind(loan.original_year_published)
        .bind(loan.original_book_type)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }
}
