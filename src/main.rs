//! tfplan-summary CLI entrypoint.
//!
//! This is the main entrypoint for the tfplan-summary command-line tool.

use std::process::ExitCode;

use tfplan_summary::cli::{Cli, OutputFormatter, write_output};
use tfplan_summary::config::{ConfigParser, ConfigValidator};
use tfplan_summary::error::Result;
use tfplan_summary::github::CommentClient;
use tfplan_summary::plan::source_for;
use tfplan_summary::summarizer::Summarizer;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let mut cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json);

    // Values from an env file only reach clap's env fallbacks on a second parse
    match ConfigParser::new().load_dotenv(cli.env_file.as_deref()) {
        Ok(true) => cli = Cli::parse_args(),
        Ok(false) => {}
        Err(e) => {
            eprintln!("{}", OutputFormatter::error(&e.to_string()));
            return ExitCode::FAILURE;
        }
    }

    // Single-threaded runtime: the stages run strictly one after another
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", OutputFormatter::error(&format!("Error: {e}")));
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr; stdout carries only the report.
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let config = ConfigParser::new().from_cli(&cli)?;
    let validation = ConfigValidator::new().validate(&config)?;
    for warning in &validation.warnings {
        eprintln!("{}", OutputFormatter::warning(warning));
    }
    debug!("Output target: {}", config.output);

    let source = source_for(&config);
    let report = Summarizer::new(&config, &source).summarize().await?;

    let formatter = OutputFormatter::new(cli.format);
    let output = formatter.format_report(&report);
    write_output(&output, &config.output, &mut std::io::stdout().lock())?;

    if let Some(comment) = &config.comment {
        let client = CommentClient::new(comment)?;
        client.post_comment(report.text()).await?;
        eprintln!("{}", OutputFormatter::success("Posted summary to pull request"));
    }

    Ok(())
}
