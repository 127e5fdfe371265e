use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(hanbit::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(hanbit::config))]
    Config(String),

    #[error("Document store error: {0}")]
    #[diagnostic(code(hanbit::store))]
    Store(String),

    #[error("Store write timed out after {0} seconds")]
    #[diagnostic(code(hanbit::store_timeout))]
    StoreTimeout(u64),

    #[error("Component error: {0}")]
    #[diagnostic(code(hanbit::component))]
    Component(String),

    #[error("Template error: {0}")]
    #[diagnostic(code(hanbit::template))]
    Template(#[from] askama::Error),

    #[error(transparent)]
    #[diagnostic(code(hanbit::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(hanbit::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(hanbit::other))]
    Other(String),
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SiteResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create document store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}

/// Helper to create component errors
#[allow(dead_code)]
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
