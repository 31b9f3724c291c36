//! Configuration module for the plan summary tool.
//!
//! This module handles all configuration-related functionality:
//! - The explicit run configuration passed into the pipeline
//! - Assembling it from CLI arguments and environment files
//! - Validation before anything is executed

mod parser;
mod settings;
mod validator;

pub use parser::{ConfigParser, DEFAULT_ENV_FILE};
pub use settings::{
    CommentConfig, DEFAULT_TERRAFORM_BIN, HeaderSpacing, OutputTarget, PlanInput, SummaryConfig,
};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
