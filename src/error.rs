//! Error types for the plan summary tool.
//!
//! This module provides the error hierarchy for every stage of a run:
//! configuration, plan retrieval and extraction, and comment publishing.

use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Hint printed when the plan text cannot be parsed.
pub const PARSE_HINT: &str = "Failed to parse Terraform plan JSON, did you run terraform init?";

/// The main error type for the plan summary tool.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan retrieval and extraction errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Pull-request comment errors.
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was not supplied by flag or environment.
    #[error("Missing required value: {name}")]
    MissingValue {
        /// Flag or variable name.
        name: String,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// The `.env` file exists but could not be loaded.
    #[error("Failed to load environment file: {message}")]
    DotenvError {
        /// Description of the failure.
        message: String,
        /// Path of the file.
        location: Option<String>,
    },
}

/// Plan retrieval and extraction errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The planning tool could not be started.
    #[error("Failed to run `{command}`: {message}")]
    Launch {
        /// The command line that was attempted.
        command: String,
        /// Description of the launch failure.
        message: String,
    },

    /// The plan text is not valid JSON.
    #[error("Failed to parse plan JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The JSON is valid but a resource change record is malformed.
    #[error("Invalid resource change record: {message}")]
    InvalidRecord {
        /// Description of the problem.
        message: String,
    },

    /// A plan input file does not exist.
    #[error("Plan file not found: {path}")]
    NotFound {
        /// Path to the missing file.
        path: PathBuf,
    },
}

/// Pull-request comment errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The token was rejected.
    #[error("GitHub authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the auth failure.
        message: String,
    },

    /// API request failed.
    #[error("GitHub API request failed: {status} - {message}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Rate limited.
    #[error("GitHub API rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("Network error communicating with GitHub: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },
}

/// Result type alias for plan summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

impl SummaryError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a plan parse error and logs [`PARSE_HINT`].
    ///
    /// Every parse failure goes through here so the hint is never skipped.
    #[must_use]
    pub fn plan_parse(message: impl Into<String>) -> Self {
        error!("{PARSE_HINT}");
        Self::Plan(PlanError::Parse {
            message: message.into(),
        })
    }

    /// Returns true if the plan text could not be parsed as JSON.
    #[must_use]
    pub const fn is_plan_parse(&self) -> bool {
        matches!(self, Self::Plan(PlanError::Parse { .. }))
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::GitHub(GitHubError::RateLimited { .. } | GitHubError::NetworkError { .. }) => {
                true
            }
            Self::GitHub(GitHubError::ApiRequestFailed { status, .. }) => *status >= 500,
            _ => false,
        }
    }

    /// Returns the server-requested retry delay in seconds, if any.
    #[must_use]
    pub const fn retry_delay_secs(&self) -> Option<u64> {
        match self {
            Self::GitHub(GitHubError::RateLimited { retry_after_secs }) => Some(*retry_after_secs),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a validation error without a specific field.
    #[must_use]
    pub fn validation_general(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }
}

impl GitHubError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_distinguishable() {
        let err = SummaryError::from(PlanError::Parse {
            message: String::from("expected value"),
        });
        assert!(err.is_plan_parse());

        let other = SummaryError::from(PlanError::NotFound {
            path: PathBuf::from("plan.json"),
        });
        assert!(!other.is_plan_parse());
    }

    #[test]
    fn test_retryable_errors() {
        let rate_limited = SummaryError::from(GitHubError::RateLimited { retry_after_secs: 7 });
        assert!(rate_limited.is_retryable());
        assert_eq!(rate_limited.retry_delay_secs(), Some(7));

        let server = SummaryError::from(GitHubError::api_error(502, "bad gateway"));
        assert!(server.is_retryable());
        assert_eq!(server.retry_delay_secs(), None);

        let client = SummaryError::from(GitHubError::api_error(422, "unprocessable"));
        assert!(!client.is_retryable());

        let parse = SummaryError::from(PlanError::Parse {
            message: String::new(),
        });
        assert!(!parse.is_retryable());
        assert_eq!(parse.retry_delay_secs(), None);
    }
}
