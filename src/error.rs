//! Centralized error types for artgrid.
//!
//! Page fetch failures never show up here: they are absorbed by the page
//! source and rendered as an empty table. What remains are startup and
//! terminal failures, which end the program.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API client construction errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (terminal backend, stdout).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Use --config to point at a file."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::InvalidUrl(url) => format!("Invalid API URL: {}", url),
                ApiError::Network(_) => {
                    "Could not initialise the HTTP client.".to_string()
                }
                other => format!("API error: {}", other),
            },
            AppError::Io(_) => "A terminal or file operation failed.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
