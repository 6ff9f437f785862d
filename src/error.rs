//! Centralized error types for the application.
//!
//! Each layer has its own `thiserror` enum; [`AppError`] collects them at the
//! top so start-up failures can be reported to the user in plain language.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// A message suitable for showing to users, without technical detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find the configuration directory. Pass --config to choose a file."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create the configuration directory. Check file permissions."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the configuration file. Check that it is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save the configuration. Check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "The configuration file is not valid TOML.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save the configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Network(_) => {
                    "Network error or server unavailable. Please try again.".to_string()
                }
                ApiError::InvalidUrl(url) => format!("'{}' is not a valid API address.", url),
                ApiError::Rejected { .. } => match e.server_message() {
                    Some(message) => format!("The server rejected the request: {}", message),
                    None => "The server rejected the request.".to_string(),
                },
                ApiError::UnexpectedContentType(_) | ApiError::InvalidResponse(_) => {
                    "Unexpected response from the feedback server.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Whether the application cannot continue after this error.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Api(ApiError::InvalidUrl(_)) | AppError::Terminal(_)
        )
    }

    /// A hint for fixing the error, if there is an obvious one.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the configuration file to fall back to the defaults.")
            }
            AppError::Api(ApiError::InvalidUrl(_)) => {
                Some("Use a full address such as https://backend-sf-form.vercel.app")
            }
            AppError::Api(ApiError::Network(_)) => {
                Some("Check your internet connection and the API address.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_config_error() {
        let err: AppError = ConfigError::ValidationError("tick rate too low".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.user_message(), "Configuration error: tick rate too low");
        assert!(err.is_critical());
        assert!(err.suggested_action().is_some());
    }

    #[test]
    fn test_from_api_error() {
        let err: AppError = ApiError::InvalidUrl("nope".to_string()).into();
        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(err.user_message(), "'nope' is not a valid API address.");
        assert!(err.is_critical());
    }

    #[test]
    fn test_rejection_message() {
        let err = AppError::Api(ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: Some("Invalid rating".to_string()),
        });
        assert_eq!(
            err.user_message(),
            "The server rejected the request: Invalid rating"
        );
        assert!(!err.is_critical());

        let bare = AppError::Api(ApiError::from_status(StatusCode::BAD_GATEWAY, ""));
        assert_eq!(bare.user_message(), "The server rejected the request.");
    }

    #[test]
    fn test_response_shape_errors_share_message() {
        let a = AppError::Api(ApiError::UnexpectedContentType("text/html".to_string()));
        let b = AppError::Api(ApiError::InvalidResponse("expected array".to_string()));
        assert_eq!(a.user_message(), b.user_message());
        assert!(a.suggested_action().is_none());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("raw mode unavailable");
        assert_eq!(err.to_string(), "Terminal error: raw mode unavailable");
        assert!(err.is_critical());
    }

    #[test]
    fn test_io_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(!err.is_critical());
    }
}
