//! Report rendering.
//!
//! Layout of a rendered report:
//!
//! ```text
//! **Terraform Plan (prod)**
//!
//! 👉 1 to create, 0 to update, 1 to replace, 0 to destroy
//!
//! **🛠️ Created**:
//! aws_vpc.main
//!
//! **♻️ Replaced**:
//! aws_instance.web
//! ```

use std::fmt::Write;
use tracing::{debug, info};

use crate::config::HeaderSpacing;

use super::classify::{Category, ChangeSummary};

/// Report title.
pub const REPORT_TITLE: &str = "Terraform Plan";

/// A rendered plan report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    identifier: Option<String>,
    summary: ChangeSummary,
    text: String,
}

impl Report {
    /// Renders a report for a classified plan.
    #[must_use]
    pub fn render(identifier: Option<&str>, spacing: HeaderSpacing, summary: ChangeSummary) -> Self {
        let mut text = build_header(identifier, spacing);
        append_changes(&mut text, &summary);

        Self {
            identifier: identifier.filter(|id| !id.is_empty()).map(String::from),
            summary,
            text,
        }
    }

    /// Returns the header identifier, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Returns the classified changes.
    #[must_use]
    pub const fn summary(&self) -> &ChangeSummary {
        &self.summary
    }

    /// Returns the rendered markdown text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds the report header.
///
/// An absent or empty identifier gives the bare title.
#[must_use]
pub fn build_header(identifier: Option<&str>, spacing: HeaderSpacing) -> String {
    let mut header = match identifier.filter(|id| !id.is_empty()) {
        Some(id) => {
            info!("Using custom identifier: {id}");
            format!("**{REPORT_TITLE} ({id})**\n")
        }
        None => format!("**{REPORT_TITLE}**\n"),
    };

    if spacing == HeaderSpacing::BlankLine {
        header.push('\n');
    }
    header
}

/// Builds the one-line change count summary.
#[must_use]
pub fn summary_line(summary: &ChangeSummary) -> String {
    format!(
        "👉 {} to create, {} to update, {} to replace, {} to destroy\n",
        summary.count(Category::Create),
        summary.count(Category::Update),
        summary.count(Category::Replace),
        summary.count(Category::Delete),
    )
}

/// Appends a labelled section listing `items`.
///
/// Leaves `output` untouched when `items` is empty.
pub fn append_section(output: &mut String, items: &[String], description: &str) {
    if items.is_empty() {
        debug!("No items for '{description}' to append to summary");
        return;
    }

    debug!(
        "Appending {} items for '{description}' to summary",
        items.len()
    );
    let _ = write!(output, "\n**{description}**:\n");
    for item in items {
        let _ = writeln!(output, "{item}");
    }
}

/// Appends the summary line and every non-empty category section.
pub fn append_changes(output: &mut String, summary: &ChangeSummary) {
    output.push_str(&summary_line(summary));
    for category in Category::ALL {
        append_section(output, summary.addresses(category), category.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Action, ResourceChange};

    fn test_resource_changes() -> Vec<ResourceChange> {
        vec![
            ResourceChange::new("test_create", vec![Action::Create]),
            ResourceChange::new("test_update", vec![Action::Update]),
            ResourceChange::new("test_delete", vec![Action::Delete]),
            ResourceChange::new("test_replace_1", vec![Action::Delete, Action::Create]),
            ResourceChange::new("test_replace_2", vec![Action::Create, Action::Delete]),
        ]
    }

    #[test]
    fn test_build_output_header() {
        assert_eq!(
            build_header(None, HeaderSpacing::BlankLine),
            "**Terraform Plan**\n\n"
        );
        assert_eq!(
            build_header(Some(""), HeaderSpacing::BlankLine),
            "**Terraform Plan**\n\n"
        );
    }

    #[test]
    fn test_build_output_header_with_identifier() {
        assert_eq!(
            build_header(Some("prod"), HeaderSpacing::BlankLine),
            "**Terraform Plan (prod)**\n\n"
        );
    }

    #[test]
    fn test_build_output_header_compact() {
        assert_eq!(
            build_header(Some("prod"), HeaderSpacing::Compact),
            "**Terraform Plan (prod)**\n"
        );
    }

    #[test]
    fn test_append_section() {
        let mut output = String::new();
        append_section(&mut output, &[String::from("test1")], "test");
        assert_eq!(output, "\n**test**:\ntest1\n");
    }

    #[test]
    fn test_append_section_with_no_items() {
        let mut output = String::from("unchanged\n");
        append_section(&mut output, &[], "test");
        assert_eq!(output, "unchanged\n");
    }

    #[test]
    fn test_append_section_line_count() {
        let items: Vec<String> = (0..3).map(|i| format!("res_{i}")).collect();
        let mut output = String::from("start\n");
        append_section(&mut output, &items, "label");

        let appended = &output["start\n".len()..];
        assert_eq!(appended.lines().count(), 1 + 1 + items.len());
    }

    #[test]
    fn test_append_changes() {
        let summary = ChangeSummary::from_changes(&test_resource_changes());
        let mut output = String::new();
        append_changes(&mut output, &summary);

        assert_eq!(
            output,
            "👉 1 to create, 1 to update, 2 to replace, 1 to destroy\n\
             \n\
             **🛠️ Created**:\n\
             test_create\n\
             \n\
             **🔀 Updated**:\n\
             test_update\n\
             \n\
             **♻️ Replaced**:\n\
             test_replace_1\n\
             test_replace_2\n\
             \n\
             **❌ Deleted**:\n\
             test_delete\n"
        );
    }

    #[test]
    fn test_render_empty_plan() {
        let report = Report::render(None, HeaderSpacing::BlankLine, ChangeSummary::default());
        assert_eq!(
            report.text(),
            "**Terraform Plan**\n\n👉 0 to create, 0 to update, 0 to replace, 0 to destroy\n"
        );
        assert!(!report.text().contains("**🛠️"));
    }

    #[test]
    fn test_render_end_to_end() {
        let changes = vec![
            ResourceChange::new("a", vec![Action::Create]),
            ResourceChange::new("b", vec![Action::Update]),
            ResourceChange::new("c", vec![Action::Delete]),
            ResourceChange::new("d", vec![Action::Delete, Action::Create]),
            ResourceChange::new("e", vec![Action::Create, Action::Delete]),
        ];
        let report = Report::render(
            Some("prod"),
            HeaderSpacing::Compact,
            ChangeSummary::from_changes(&changes),
        );

        assert!(report.text().starts_with(
            "**Terraform Plan (prod)**\n👉 1 to create, 1 to update, 2 to replace, 1 to destroy\n"
        ));
        assert!(report.text().contains("\n**♻️ Replaced**:\nd\ne\n"));
        assert_eq!(report.identifier(), Some("prod"));
        assert_eq!(report.to_string(), report.text());
    }
}
