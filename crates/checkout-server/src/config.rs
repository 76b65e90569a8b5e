//! Server Configuration
//!
//! Read once in `main`; handlers only see the values through `AppState`.

use std::path::PathBuf;

use checkout_payments::{PayPalConfig, PaymentError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT is not a valid port number: {0}")]
    Port(String),

    #[error(transparent)]
    PayPal(#[from] PaymentError),
}

/// Listener and static asset settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built web client (index.html + wasm bundle)
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::Port(port))?,
            None => 3000,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            static_dir: lookup("STATIC_DIR").map_or_else(|| PathBuf::from("static"), PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Everything the service needs at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub paypal: PayPalConfig,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            paypal: PayPalConfig::from_lookup(&lookup)?,
        })
    }
}
