//! Test server harness

use reqwest::{Client, Response};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

use shelfmark_server::{api, config::AppConfig, repository::Repository, AppState};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub repository: Repository,
}

impl TestApp {
    /// Spawn a server with the default configuration
    pub async fn spawn() -> Self {
        Self::spawn_with(AppConfig::default()).await
    }

    /// Spawn a server that rejects characters outside the field allow-lists
    pub async fn spawn_strict() -> Self {
        let mut config = AppConfig::default();
        config.validation.enforce_charsets = true;
        Self::spawn_with(config).await
    }

    pub async fn spawn_with(config: AppConfig) -> Self {
        // A single connection that never expires keeps the in-memory
        // database alive for the whole test
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        let repository = Repository::new(pool);
        repository.migrate().await.expect("Failed to run migrations");

        let state = AppState::new(config, repository.clone());
        let app = api::router(state).expect("Failed to build router");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().expect("No local address"));

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            address,
            client: Client::new(),
            repository,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Create a book and return its JSON record
    pub async fn create_book(&self, body: &Value) -> Value {
        let response = self.post_json("/books/create", body).await;
        assert_eq!(response.status(), 201, "book creation failed");
        response.json().await.expect("Failed to parse book")
    }
}
