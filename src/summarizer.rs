//! Plan summarization pipeline.
//!
//! Runs the stages of a summary in order: retrieve the plan text, extract
//! resource changes, classify them, and render the report. Each stage runs
//! exactly once; the first error aborts the run before anything is written.

use tracing::{debug, info};

use crate::config::SummaryConfig;
use crate::error::Result;
use crate::plan::{PlanSource, extract};
use crate::summary::{ChangeSummary, Report};

/// Drives one summary run.
pub struct Summarizer<'a, S: PlanSource> {
    /// Run configuration.
    config: &'a SummaryConfig,
    /// Where the plan text comes from.
    source: &'a S,
}

impl<'a, S: PlanSource> Summarizer<'a, S> {
    /// Creates a new summarizer.
    #[must_use]
    pub const fn new(config: &'a SummaryConfig, source: &'a S) -> Self {
        Self { config, source }
    }

    /// Produces the report for the configured plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be retrieved or parsed.
    pub async fn summarize(&self) -> Result<Report> {
        info!("Summarizing plan from {}", self.source.describe());

        let text = self.source.fetch().await?;
        let changes = extract(&text, self.source.encoding())?;
        let summary = ChangeSummary::from_changes(&changes);

        debug!(
            "Classified {} of {} resource changes",
            summary.total(),
            changes.len()
        );

        Ok(Report::render(
            self.config.identifier(),
            self.config.header_spacing,
            summary,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderSpacing;
    use crate::plan::{MockPlanSource, PlanEncoding};

    fn mock_source(text: &'static str, encoding: PlanEncoding) -> MockPlanSource {
        let mut source = MockPlanSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(move || Ok(text.to_string()));
        source.expect_encoding().return_const(encoding);
        source
            .expect_describe()
            .return_const(String::from("mock plan"));
        source
    }

    #[tokio::test]
    async fn test_summarize_document() {
        let source = mock_source(
            r#"{"resource_changes":[
                {"address":"test_create","change":{"actions":["create"]}},
                {"address":"test_update","change":{"actions":["update"]}},
                {"address":"test_delete","change":{"actions":["delete"]}},
                {"address":"test_replace_1","change":{"actions":["delete","create"]}},
                {"address":"test_replace_2","change":{"actions":["create","delete"]}}
            ]}"#,
            PlanEncoding::Document,
        );
        let config = SummaryConfig::new("plan.tfplan");

        let report = Summarizer::new(&config, &source)
            .summarize()
            .await
            .expect("summary should succeed");

        assert_eq!(
            report.text(),
            "**Terraform Plan**\n\
             \n\
             👉 1 to create, 1 to update, 2 to replace, 1 to destroy\n\
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

    #[tokio::test]
    async fn test_summarize_empty_plan() {
        let source = mock_source(r#"{"format_version":"1.2"}"#, PlanEncoding::Document);
        let config = SummaryConfig::new("plan.tfplan")
            .with_identifier("staging")
            .with_header_spacing(HeaderSpacing::Compact);

        let report = Summarizer::new(&config, &source)
            .summarize()
            .await
            .expect("summary should succeed");

        assert_eq!(
            report.text(),
            "**Terraform Plan (staging)**\n👉 0 to create, 0 to update, 0 to replace, 0 to destroy\n"
        );
        assert!(report.summary().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_plan_log() {
        let source = mock_source(
            concat!(
                r#"{"type":"planned_change","change":{"action":"replace","resource":{"addr":"aws_instance.web"}}}"#,
                "\n",
                r#"{"type":"planned_change","change":{"action":"noop","resource":{"addr":"aws_vpc.main"}}}"#,
                "\n",
            ),
            PlanEncoding::Log,
        );
        let config = SummaryConfig::new("plan.log");

        let report = Summarizer::new(&config, &source)
            .summarize()
            .await
            .expect("summary should succeed");

        assert_eq!(report.summary().replace, vec!["aws_instance.web"]);
        assert_eq!(report.summary().total(), 1);
    }

    #[tokio::test]
    async fn test_summarize_parse_error() {
        let source = mock_source("Error: Inconsistent dependency lock file", PlanEncoding::Document);
        let config = SummaryConfig::new("plan.tfplan");

        let err = Summarizer::new(&config, &source)
            .summarize()
            .await
            .unwrap_err();
        assert!(err.is_plan_parse());
    }
}
