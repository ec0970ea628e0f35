//! API configuration

use serde::Deserialize;
use uuid::Uuid;

/// API configuration
///
/// An empty `database_url` selects demo mode: all state lives in process
/// memory and is lost on restart.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string; empty selects in-memory demo mode
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Admin login email
    pub admin_email: String,
    /// Admin login password
    pub admin_password: String,
    /// Customer identity assumed for unauthenticated salary advance calls
    pub demo_customer_id: Uuid,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: String::new(),
            log_level: "info".to_string(),
            admin_email: String::new(),
            admin_password: String::new(),
            demo_customer_id: Uuid::from_u128(1),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment variables with the `API_` prefix
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
