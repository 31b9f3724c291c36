//! Plan retrieval and extraction.
//!
//! This module obtains the planning tool's machine-readable output and
//! turns it into resource change records.

mod extract;
mod source;
mod types;

pub use extract::{extract, parse_plan_log, parse_resource_changes};
pub use source::{PlanEncoding, PlanFile, PlanSource, TerraformShow, source_for};
pub use types::{Action, Change, ResourceChange};

#[cfg(test)]
pub use source::MockPlanSource;
