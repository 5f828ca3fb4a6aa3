//! Error types for the Thursday weather service

use thiserror::Error;

/// Main error type for the Thursday weather service
#[derive(Error, Debug)]
pub enum WeatherAppError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather provider communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl WeatherAppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherAppError::Config { .. } => {
                "Configuration error. Please check your config file and WEATHER_API_KEY.".to_string()
            }
            WeatherAppError::Api { .. } => {
                "Unable to reach the weather provider. Please check your internet connection."
                    .to_string()
            }
            WeatherAppError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherAppError::Io { .. } => {
                "File or socket operation failed. Please check permissions and the listen address."
                    .to_string()
            }
            WeatherAppError::General { message } => message.clone(),
        }
    }
}
