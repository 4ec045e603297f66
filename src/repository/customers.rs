//! Customers repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, NewCustomer},
    sanitize::Escaped,
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Sqlite>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List customers, optionally keeping only names containing `search`
    /// (already escaped)
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE ? IS NULL OR instr(name, ?) > 0
            ORDER BY id
            "#,
        )
        .bind(search)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    pub async fn create(&self, customer: &Escaped<NewCustomer>) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, city, age) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(&customer.name)
        .bind(&customer.city)
        .bind(customer.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: i64, customer: &Escaped<NewCustomer>) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name = ?, city = ?, age = ? WHERE id = ? RETURNING *",
        )
        .bind(&customer.name)
        .bind(&customer.city)
        .bind(customer.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }
}
