//! Builds a [`SummaryConfig`] from command-line arguments.
//!
//! Environment fallbacks are resolved by clap while parsing, so this module
//! only has to load the optional `.env` file and assemble the result.

use std::path::Path;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::error::{ConfigError, Result, SummaryError};

use super::settings::{CommentConfig, OutputTarget, SummaryConfig};

/// Default environment file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Configuration parser.
#[derive(Debug, Default)]
pub struct ConfigParser;

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads an environment file if present.
    ///
    /// Without an explicit path, `.env` in the working directory is tried and
    /// silently skipped when missing. An explicit path must exist. Variables
    /// already set in the process environment are not overridden.
    ///
    /// Returns whether a file was loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing (explicit path only) or cannot
    /// be parsed.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<bool> {
        let env_path = path.unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));

        if !env_path.exists() {
            if path.is_some() {
                return Err(SummaryError::Config(ConfigError::DotenvError {
                    message: String::from("file does not exist"),
                    location: Some(env_path.display().to_string()),
                }));
            }
            debug!(".env file not found at: {}", env_path.display());
            return Ok(false);
        }

        info!("Loading environment from: {}", env_path.display());
        dotenvy::from_path(env_path).map_err(|e| {
            SummaryError::Config(ConfigError::DotenvError {
                message: e.to_string(),
                location: Some(env_path.display().to_string()),
            })
        })?;

        Ok(true)
    }

    /// Assembles the run configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan file was not given, or if only one of the
    /// comment URL and token was given.
    pub fn from_cli(&self, cli: &Cli) -> Result<SummaryConfig> {
        let plan_file = cli.plan_file.clone().ok_or_else(|| {
            SummaryError::Config(ConfigError::MissingValue {
                name: String::from("PLAN_FILE"),
            })
        })?;

        let output = cli
            .output
            .as_deref()
            .map_or(OutputTarget::Stdout, OutputTarget::parse);

        let mut config = SummaryConfig::new(plan_file)
            .with_input(cli.input)
            .with_terraform_bin(cli.terraform_bin.clone())
            .with_output(output)
            .with_header_spacing(cli.header_spacing);

        if let Some(identifier) = &cli.identifier {
            config = config.with_identifier(identifier.clone());
        }

        match (&cli.comment_url, &cli.github_token) {
            (Some(url), Some(token)) => {
                config = config.with_comment(CommentConfig {
                    url: url.clone(),
                    token: token.clone(),
                });
            }
            (Some(_), None) => {
                return Err(SummaryError::Config(ConfigError::MissingValue {
                    name: String::from("GITHUB_TOKEN"),
                }));
            }
            // A token alone is common in CI and simply unused.
            (None, _) => {}
        }

        debug!("Resolved configuration: {config:?}");
        Ok(config)
    }
}
