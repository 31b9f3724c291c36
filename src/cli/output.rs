//! Output formatting for the CLI.
//!
//! Renders a [`Report`] in the selected format and delivers it to the
//! configured target.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use tabled::{Table, Tabled};
use tracing::info;

use crate::config::OutputTarget;
use crate::error::Result;
use crate::summary::{Category, ChangeSummary, REPORT_TITLE, Report, summary_line};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Resource")]
    address: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a report for output.
    #[must_use]
    pub fn format_report(&self, report: &Report) -> String {
        match self.format {
            OutputFormat::Markdown => report.text().to_string(),
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(&ReportJson::from(report)).unwrap_or_default();
                json.push('\n');
                json
            }
            OutputFormat::Table => Self::format_table(report),
        }
    }

    /// Formats a report as a table of categorized resources.
    fn format_table(report: &Report) -> String {
        let summary = report.summary();
        let title = report
            .identifier()
            .map_or_else(|| REPORT_TITLE.to_string(), |id| format!("{REPORT_TITLE} ({id})"));

        let mut output = format!("{title}\n\n");

        if summary.is_empty() {
            output.push_str("No changes.\n");
            return output;
        }

        let rows: Vec<ChangeRow> = summary
            .iter()
            .enumerate()
            .map(|(i, (category, address))| ChangeRow {
                index: i + 1,
                action: category.to_string(),
                address: address.to_string(),
            })
            .collect();

        output.push_str(&Table::new(rows).to_string());
        output.push_str("\n\n");
        output.push_str(&summary_line(summary));
        output
    }

    /// Formats a success status line for the terminal.
    #[must_use]
    pub fn success(message: &str) -> String {
        format!("{} {message}", "✓".green())
    }

    /// Formats an error status line for the terminal.
    #[must_use]
    pub fn error(message: &str) -> String {
        format!("{} {message}", "✗".red())
    }

    /// Formats a warning status line for the terminal.
    #[must_use]
    pub fn warning(message: &str) -> String {
        format!("{} {message}", "⚠".yellow())
    }
}

/// Writes `content` to the output target and echoes it to `stdout`.
///
/// A file target is overwritten in a single write.
///
/// # Errors
///
/// Returns an error if the file or `stdout` cannot be written.
pub fn write_output(content: &str, target: &OutputTarget, stdout: &mut impl Write) -> Result<()> {
    if let OutputTarget::File(path) = target {
        info!("Writing output to file: {}", path.display());
        std::fs::write(path, content)?;
    }

    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

// JSON serialization helpers

#[derive(Serialize)]
struct ReportJson<'a> {
    identifier: Option<&'a str>,
    generated_at: DateTime<Utc>,
    counts: CountsJson,
    changes: &'a ChangeSummary,
}

#[derive(Serialize)]
struct CountsJson {
    create: usize,
    update: usize,
    replace: usize,
    delete: usize,
    total: usize,
}

impl<'a> From<&'a Report> for ReportJson<'a> {
    fn from(report: &'a Report) -> Self {
        let summary = report.summary();
        Self {
            identifier: report.identifier(),
            generated_at: Utc::now(),
            counts: CountsJson {
                create: summary.count(Category::Create),
                update: summary.count(Category::Update),
                replace: summary.count(Category::Replace),
                delete: summary.count(Category::Delete),
                total: summary.total(),
            },
            changes: summary,
        }
    }
}
