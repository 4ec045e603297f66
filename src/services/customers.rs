//! Customer management service

use crate::{
    error::AppResult,
    models::customer::{Customer, CustomerForm},
    repository::Repository,
    sanitize::{escape_html, Sanitize},
    validation::ValidationPolicy,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
    policy: ValidationPolicy,
}

impl CustomersService {
    pub fn new(repository: Repository, policy: ValidationPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Customer>> {
        let search = search.map(escape_html);
        self.repository.customers.list(search.as_deref()).await
    }

    pub async fn create(&self, form: CustomerForm) -> AppResult<Customer> {
        let customer = form.validated(&self.policy)?.sanitize();
        let customer = self.repository.customers.create(&customer).await?;
        tracing::info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: i64, form: CustomerForm) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await?;
        let customer = form.validated(&self.policy)?.sanitize();
        let customer = self.repository.customers.update(id, &customer).await?;
        tracing::info!(customer_id = customer.id, "Customer updated");
        Ok(customer)
    }
}
