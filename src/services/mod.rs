//! Business logic services

pub mod books;
pub mod customers;
pub mod loans;

use crate::{config::ValidationConfig, error::AppResult, repository::Repository, validation::ValidationPolicy};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub customers: customers::CustomersService,
    pub loans: loans::LoansService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, validation: &ValidationConfig) -> Self {
        let policy = ValidationPolicy::from(validation);
        Self {
            books: books::BooksService::new(repository.clone(), policy),
            customers: customers::CustomersService::new(repository.clone(), policy),
            loans: loans::LoansService::new(repository.clone(), policy),
            repository,
        }
    }

    /// Check that the database is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
