//! Configuration validation.
//!
//! Catches problems that would otherwise only show up halfway through a run,
//! after the planning tool has already been invoked.

use crate::error::{ConfigError, Result, SummaryError};
use tracing::debug;

use super::settings::{CommentConfig, OutputTarget, PlanInput, SummaryConfig};

/// Validator for run configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a run configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if any were found.
    pub fn validate(&self, config: &SummaryConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_plan(config, &mut result);
        Self::validate_identifier(config.identifier(), &mut result);
        Self::validate_output(&config.output, &mut result);
        if let Some(comment) = &config.comment {
            Self::validate_comment(comment, &mut result);
        }

        if result.errors.is_empty() {
            debug!("Configuration validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(SummaryError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }))
        }
    }

    /// Validates the plan input settings.
    fn validate_plan(config: &SummaryConfig, result: &mut ValidationResult) {
        if config.plan_file.as_os_str().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("plan_file"),
                message: String::from("Plan file path cannot be empty"),
            });
            return;
        }

        match config.input {
            PlanInput::Show => {
                if config.terraform_bin.trim().is_empty() {
                    result.errors.push(ValidationError {
                        field: String::from("terraform_bin"),
                        message: String::from("Planning tool binary cannot be empty"),
                    });
                }
                // The tool reports a missing artifact itself.
            }
            PlanInput::Json | PlanInput::Log => {
                if !config.plan_file.is_file() {
                    result.errors.push(ValidationError {
                        field: String::from("plan_file"),
                        message: format!(
                            "Plan file '{}' does not exist",
                            config.plan_file.display()
                        ),
                    });
                }
            }
        }
    }

    /// Checks the header identifier. Any text is accepted.
    fn validate_identifier(identifier: Option<&str>, result: &mut ValidationResult) {
        if identifier.is_some_and(|id| id.contains(['\n', '\r'])) {
            result
                .warnings
                .push(String::from("Identifier spans several lines; the header will too"));
        }
    }

    /// Validates the output target.
    fn validate_output(output: &OutputTarget, result: &mut ValidationResult) {
        let Some(path) = output.path() else {
            return;
        };

        if path.is_dir() {
            result.errors.push(ValidationError {
                field: String::from("output"),
                message: format!("Output path '{}' is a directory", path.display()),
            });
            return;
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                result.warnings.push(format!(
                    "Output directory '{}' does not exist",
                    parent.display()
                ));
            }
        }
    }

    /// Validates pull-request comment settings.
    fn validate_comment(comment: &CommentConfig, result: &mut ValidationResult) {
        if !comment.url.starts_with("https://") && !comment.url.starts_with("http://") {
            result.errors.push(ValidationError {
                field: String::from("comment_url"),
                message: format!("Comment URL '{}' must be an http(s) URL", comment.url),
            });
        }

        if comment.token.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("github_token"),
                message: String::from("A token is required to post comments"),
            });
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
