//! CLI argument definitions.
//!
//! Every input can also come from the environment, which is how CI
//! pipelines usually drive the tool.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_TERRAFORM_BIN, HeaderSpacing, PlanInput};

/// Summarize a Terraform plan into a pull-request friendly report.
#[derive(Parser, Debug)]
#[command(name = "tfplan-summary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the saved plan (or plan document/log with --input).
    #[arg(short, long, env = "PLAN_FILE")]
    pub plan_file: Option<PathBuf>,

    /// File to write the report to (`-` for stdout only).
    #[arg(short, long, env = "OUTPUT_FILE")]
    pub output: Option<String>,

    /// Identifier shown in the report header (e.g. a tfvars file name).
    #[arg(short, long, env = "IDENTIFIER")]
    pub identifier: Option<String>,

    /// How to read the plan.
    #[arg(long, value_enum, default_value_t = PlanInput::Show)]
    pub input: PlanInput,

    /// Planning tool binary.
    #[arg(long, env = "TERRAFORM_BIN", default_value = DEFAULT_TERRAFORM_BIN)]
    pub terraform_bin: String,

    /// Blank line handling between header and summary.
    #[arg(long, value_enum, default_value_t = HeaderSpacing::BlankLine)]
    pub header_spacing: HeaderSpacing,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Pull-request comments URL to post the report to.
    #[arg(long, env = "GITHUB_COMMENTS_URL")]
    pub comment_url: Option<String>,

    /// Token used to post the comment.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Environment file to load before reading settings.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown report, suitable for a pull-request comment.
    #[default]
    Markdown,
    /// JSON output for scripting.
    Json,
    /// Table of categorized resources.
    Table,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
