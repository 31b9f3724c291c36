//! Change classification and report rendering.

mod classify;
mod report;

pub use classify::{
    Category, ChangeSummary, create_changes, delete_changes, filter_addresses, replace_changes,
    update_changes,
};
pub use report::{
    REPORT_TITLE, Report, append_changes, append_section, build_header, summary_line,
};
