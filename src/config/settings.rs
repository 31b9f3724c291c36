//! Run configuration types.
//!
//! A [`SummaryConfig`] carries everything one run needs. It is built once in
//! the entry point and passed down explicitly; nothing below `main` reads the
//! process environment.

use std::fmt;
use std::path::{Path, PathBuf};

/// Default planning tool binary.
pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";

/// Configuration for a single summary run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Path to the saved plan artifact (or plan document/log, see [`PlanInput`]).
    pub plan_file: PathBuf,
    /// How the plan file is turned into resource changes.
    pub input: PlanInput,
    /// Planning tool binary used for [`PlanInput::Show`].
    pub terraform_bin: String,
    /// Where the rendered report goes.
    pub output: OutputTarget,
    /// Optional identifier shown in the report header.
    pub identifier: Option<String>,
    /// Blank line handling between header and summary.
    pub header_spacing: HeaderSpacing,
    /// Pull-request comment settings, if publishing is enabled.
    pub comment: Option<CommentConfig>,
}

/// How the plan input is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PlanInput {
    /// Run `<tool> show -json <plan>` against a saved plan artifact.
    #[default]
    Show,
    /// Read an already rendered `show -json` document.
    Json,
    /// Read the line-delimited output of `<tool> plan -json`.
    Log,
}

/// Whether a blank line separates the header from the summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HeaderSpacing {
    /// Header ends with a blank line.
    #[default]
    BlankLine,
    /// Summary line directly follows the header.
    Compact,
}

/// Destination of the rendered report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Overwrite this file and echo the report to stdout.
    File(PathBuf),
    /// Print to stdout only.
    #[default]
    Stdout,
}

/// Pull-request comment settings.
#[derive(Clone, PartialEq, Eq)]
pub struct CommentConfig {
    /// Comments endpoint of the pull request.
    pub url: String,
    /// API token.
    pub token: String,
}

impl SummaryConfig {
    /// Creates a configuration for the given plan file with default settings.
    #[must_use]
    pub fn new(plan_file: impl Into<PathBuf>) -> Self {
        Self {
            plan_file: plan_file.into(),
            input: PlanInput::default(),
            terraform_bin: String::from(DEFAULT_TERRAFORM_BIN),
            output: OutputTarget::default(),
            identifier: None,
            header_spacing: HeaderSpacing::default(),
            comment: None,
        }
    }

    /// Sets the plan input mode.
    #[must_use]
    pub const fn with_input(mut self, input: PlanInput) -> Self {
        self.input = input;
        self
    }

    /// Sets the planning tool binary.
    #[must_use]
    pub fn with_terraform_bin(mut self, binary: impl Into<String>) -> Self {
        self.terraform_bin = binary.into();
        self
    }

    /// Sets the output target.
    #[must_use]
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Sets the header identifier. Empty strings mean no identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        self.identifier = (!identifier.is_empty()).then_some(identifier);
        self
    }

    /// Sets the header spacing.
    #[must_use]
    pub const fn with_header_spacing(mut self, spacing: HeaderSpacing) -> Self {
        self.header_spacing = spacing;
        self
    }

    /// Enables pull-request comment publishing.
    #[must_use]
    pub fn with_comment(mut self, comment: CommentConfig) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Returns the identifier as a string slice, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl OutputTarget {
    /// Parses an output argument. `-` and the empty string mean stdout.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        }
    }

    /// Returns the output file path, if writing to a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdout => None,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "stdout"),
        }
    }
}

// Keep the token out of logs.
impl fmt::Debug for CommentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentConfig")
            .field("url", &self.url)
            .field("token", &"***")
            .finish()
    }
}
