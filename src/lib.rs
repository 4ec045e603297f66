//! Shelfmark Library Management
//!
//! A small library server keeping a catalog of books, a customer registry and
//! the loans between them, served as HTML pages with JSON endpoints.
//! Submitted text is validated, then HTML-escaped once before it is stored.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod sanitize;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config.validation);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
