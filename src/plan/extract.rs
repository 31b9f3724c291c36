//! Resource change extraction.
//!
//! Turns raw plan text into [`ResourceChange`] records. Two encodings are
//! understood: the single document printed by `terraform show -json`, and
//! the line-delimited messages printed by `terraform plan -json`.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{PlanError, Result, SummaryError};

use super::source::PlanEncoding;
use super::types::{Action, ResourceChange};

/// Key holding the change records in a plan document.
const RESOURCE_CHANGES_KEY: &str = "resource_changes";

/// Message type carrying a resource change in a plan log.
const PLANNED_CHANGE: &str = "planned_change";

/// The `change` object of a `planned_change` message. Only the parts we read.
#[derive(Debug, Deserialize)]
struct LogChange {
    action: String,
    resource: LogResource,
}

#[derive(Debug, Deserialize)]
struct LogResource {
    addr: String,
}

/// Extracts resource changes from plan text in the given encoding.
///
/// # Errors
///
/// Returns [`PlanError::Parse`] if the text is not valid JSON and
/// [`PlanError::InvalidRecord`] if a record has the wrong shape.
pub fn extract(text: &str, encoding: PlanEncoding) -> Result<Vec<ResourceChange>> {
    match encoding {
        PlanEncoding::Document => parse_resource_changes(text),
        PlanEncoding::Log => parse_plan_log(text),
    }
}

/// Parses a plan document and returns its resource changes.
///
/// A document without a `resource_changes` key yields an empty list.
///
/// # Errors
///
/// Returns [`PlanError::Parse`] if the text is not valid JSON.
pub fn parse_resource_changes(plan_json: &str) -> Result<Vec<ResourceChange>> {
    let mut plan: Value =
        serde_json::from_str(plan_json).map_err(|e| SummaryError::plan_parse(e.to_string()))?;

    let changes = match plan
        .as_object_mut()
        .and_then(|root| root.remove(RESOURCE_CHANGES_KEY))
    {
        None | Some(Value::Null) => {
            debug!("Plan has no {RESOURCE_CHANGES_KEY}");
            return Ok(Vec::new());
        }
        Some(changes) => changes,
    };

    let changes: Vec<ResourceChange> = serde_json::from_value(changes).map_err(|e| {
        SummaryError::Plan(PlanError::InvalidRecord {
            message: e.to_string(),
        })
    })?;

    debug!("Extracted {} resource changes", changes.len());
    Ok(changes)
}

/// Parses `terraform plan -json` output and returns its planned changes.
///
/// Drift reports and every other message type are ignored. A `replace`
/// action becomes `[delete, create]`.
///
/// # Errors
///
/// Returns [`PlanError::Parse`] if a non-blank line is not valid JSON and
/// [`PlanError::InvalidRecord`] if a `planned_change` message has the wrong
/// shape.
pub fn parse_plan_log(log: &str) -> Result<Vec<ResourceChange>> {
    let mut changes = Vec::new();

    for (index, line) in log.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut message: Value = serde_json::from_str(line)
            .map_err(|e| SummaryError::plan_parse(format!("line {}: {e}", index + 1)))?;

        if message.get("type").and_then(Value::as_str) != Some(PLANNED_CHANGE) {
            continue;
        }

        let change = message
            .get_mut("change")
            .map(Value::take)
            .unwrap_or_default();
        let change: LogChange = serde_json::from_value(change).map_err(|e| {
            SummaryError::Plan(PlanError::InvalidRecord {
                message: format!("line {}: {e}", index + 1),
            })
        })?;

        changes.push(ResourceChange::new(
            change.resource.addr,
            log_actions(&change.action),
        ));
    }

    debug!("Extracted {} planned changes from log", changes.len());
    Ok(changes)
}

/// Maps a plan log action to the document action sequence.
fn log_actions(action: &str) -> Vec<Action> {
    match action {
        "create" => vec![Action::Create],
        "update" => vec![Action::Update],
        "delete" => vec![Action::Delete],
        "replace" => vec![Action::Delete, Action::Create],
        "read" => vec![Action::Read],
        "noop" => vec![Action::NoOp],
        other => vec![Action::Other(other.to_string())],
    }
}
