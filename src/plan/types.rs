//! Plan data model.
//!
//! Mirrors the resource change representation of `terraform show -json`.
//! Fields this tool does not interpret are kept verbatim so a record
//! serializes back to what was read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single proposed resource change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Resource address (e.g. `module.net.aws_vpc.main`).
    pub address: String,
    /// The planned change.
    pub change: Change,
    /// Uninterpreted fields of the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The change block of a resource change record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Ordered lifecycle actions.
    pub actions: Vec<Action>,
    /// Uninterpreted fields (`before`, `after`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A lifecycle action token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
    /// `no-op`
    NoOp,
    /// `read`
    Read,
    /// Any token this tool does not know about.
    #[serde(untagged)]
    Other(String),
}

impl ResourceChange {
    /// Creates a record with only an address and actions.
    #[must_use]
    pub fn new(address: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            address: address.into(),
            change: Change {
                actions,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Returns the ordered action tokens.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.change.actions
    }
}

impl Action {
    /// Returns the wire token for this action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::NoOp => "no-op",
            Self::Read => "read",
            Self::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
