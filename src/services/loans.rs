//! Loan management service

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanForm},
    repository::Repository,
    sanitize::{escape_html, Sanitize},
    validation::ValidationPolicy,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: ValidationPolicy,
}

impl LoansService {
    pub fn new(repository: Repository, policy: ValidationPolicy) -> Self {
        Self { repository, policy }
    }

    /// List loans whose customer or book name contains `search`, or all loans
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Loan>> {
        let search = search.map(escape_html);
        self.repository.loans.list(search.as_deref()).await
    }

    /// Lend a book to a customer
    pub async fn create_loan(&self, form: LoanForm) -> AppResult<Loan> {
        let loan = form.validated_new(&self.policy)?.sanitize();
        let loan = self.repository.loans.create(&loan).await?;
        tracing::info!(loan_id = loan.id, book = %loan.book_name, "Loan created");
        Ok(loan)
    }

    /// Rewrite an existing loan
    pub async fn update_loan(&self, id: i64, form: LoanForm) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).await?;
        let changes = form.validated_changes(&self.policy)?.sanitize();
        let loan = self.repository.loans.update(id, &changes).await?;
        tracing::info!(loan_id = loan.id, "Loan updated");
        Ok(loan)
    }
}
