//! Configuration management for Shelfmark server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Sources allowed by the Content-Security-Policy header
#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub font_src: Vec<String>,
    pub img_src: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ValidationConfig {
    /// Reject free text containing characters outside the field allow-lists
    pub enforce_charsets: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (SHELFMARK_SERVER__PORT=9000)
            .add_source(
                Environment::with_prefix("SHELFMARK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override database URL from DATABASE_URL env var if present
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Value of the Content-Security-Policy header sent with every response
    pub fn content_security_policy(&self) -> String {
        format!(
            "font-src {}; img-src {};",
            self.security.font_src.join(" "),
            self.security.img_src.join(" ")
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://shelfmark.db?mode=rwc".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            font_src: vec![
                "'self'".to_string(),
                "https://stackpath.bootstrapcdn.com".to_string(),
                "https://use.fontawesome.com".to_string(),
                "data:".to_string(),
            ],
            img_src: vec!["'self'".to_string(), "data:".to_string()],
        }
    }
}
