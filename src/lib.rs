// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfplan-summary
//!
//! Summarizes a Terraform plan into a short, human-readable change report,
//! typically posted as a pull-request comment.
//!
//! ## Pipeline
//!
//! 1. **Retrieve**: run `terraform show -json <plan>` (or read captured output)
//! 2. **Extract**: parse the `resource_changes` records
//! 3. **Classify**: bucket each change into create, update, replace or delete
//! 4. **Render**: header, count line, one section per non-empty bucket
//!
//! ## Modules
//!
//! - [`config`]: Run configuration, parsing and validation
//! - [`plan`]: Plan sources and resource change extraction
//! - [`summary`]: Classification and report rendering
//! - [`summarizer`]: The pipeline tying the stages together
//! - [`github`]: Pull-request comment publishing
//! - [`cli`]: Command-line interface and output handling
//!
//! ## Example
//!
//! ```text
//! **Terraform Plan (prod.tfvars)**
//!
//! 👉 1 to create, 0 to update, 1 to replace, 0 to destroy
//!
//! **🛠️ Created**:
//! aws_vpc.main
//!
//! **♻️ Replaced**:
//! aws_instance.web
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod plan;
pub mod summarizer;
pub mod summary;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormat, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, SummaryConfig};
pub use error::{Result, SummaryError};
pub use github::CommentClient;
pub use plan::{PlanSource, ResourceChange};
pub use summarizer::Summarizer;
pub use summary::{Category, ChangeSummary, Report};
