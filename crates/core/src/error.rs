//! Error types for Vela
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the Vela runtime
#[derive(Error, Debug)]
pub enum VelaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Splash screen error: {0}")]
    SplashScreen(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Module error: {0}")]
    Module(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Dispatcher error: {0}")]
    Dispatcher(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for Vela operations
pub type Result<T> = std::result::Result<T, VelaError>;

impl VelaError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VelaError::Io(e) => format!("File operation failed: {}", e),
            VelaError::Config(msg) => format!("Configuration error: {}", msg),
            VelaError::SplashScreen(msg) => format!("Splash screen issue: {}", msg),
            VelaError::Notification(msg) => format!("Notification issue: {}", msg),
            VelaError::NotFound(msg) => format!("Not found: {}", msg),
            _ => self.to_string(),
        }
    }
}
