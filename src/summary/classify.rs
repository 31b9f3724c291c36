//! Change classification.
//!
//! Every resource change falls into at most one [`Category`], decided only by
//! its exact ordered action sequence. Changes matching no category (no-op,
//! read, anything unexpected) are left out of the summary entirely.

use serde::Serialize;

use crate::plan::{Action, ResourceChange};

/// A reported change category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `[create]`
    Create,
    /// `[update]`
    Update,
    /// `[delete, create]` or `[create, delete]`
    Replace,
    /// `[delete]`
    Delete,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Self; 4] = [Self::Create, Self::Update, Self::Replace, Self::Delete];

    /// Classifies an action sequence.
    #[must_use]
    pub fn from_actions(actions: &[Action]) -> Option<Self> {
        match actions {
            [Action::Create] => Some(Self::Create),
            [Action::Update] => Some(Self::Update),
            [Action::Delete] => Some(Self::Delete),
            [Action::Delete, Action::Create] | [Action::Create, Action::Delete] => {
                Some(Self::Replace)
            }
            _ => None,
        }
    }

    /// Returns the section label used in the report.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "🛠️ Created",
            Self::Update => "🔀 Updated",
            Self::Replace => "♻️ Replaced",
            Self::Delete => "❌ Deleted",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Replace => "replace",
            Self::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

/// Returns the addresses of changes in `category`, in source order.
#[must_use]
pub fn filter_addresses(changes: &[ResourceChange], category: Category) -> Vec<String> {
    changes
        .iter()
        .filter(|c| Category::from_actions(c.actions()) == Some(category))
        .map(|c| c.address.clone())
        .collect()
}

/// Returns the addresses of resources being created.
#[must_use]
pub fn create_changes(changes: &[ResourceChange]) -> Vec<String> {
    filter_addresses(changes, Category::Create)
}

/// Returns the addresses of resources being updated in place.
#[must_use]
pub fn update_changes(changes: &[ResourceChange]) -> Vec<String> {
    filter_addresses(changes, Category::Update)
}

/// Returns the addresses of resources being replaced, in either order.
#[must_use]
pub fn replace_changes(changes: &[ResourceChange]) -> Vec<String> {
    filter_addresses(changes, Category::Replace)
}

/// Returns the addresses of resources being destroyed.
#[must_use]
pub fn delete_changes(changes: &[ResourceChange]) -> Vec<String> {
    filter_addresses(changes, Category::Delete)
}

/// Classified addresses for one plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    /// Resources to create.
    pub create: Vec<String>,
    /// Resources to update in place.
    pub update: Vec<String>,
    /// Resources to replace.
    pub replace: Vec<String>,
    /// Resources to destroy.
    pub delete: Vec<String>,
}

impl ChangeSummary {
    /// Classifies a list of resource changes.
    #[must_use]
    pub fn from_changes(changes: &[ResourceChange]) -> Self {
        Self {
            create: create_changes(changes),
            update: update_changes(changes),
            replace: replace_changes(changes),
            delete: delete_changes(changes),
        }
    }

    /// Returns the addresses in a category.
    #[must_use]
    pub fn addresses(&self, category: Category) -> &[String] {
        match category {
            Category::Create => &self.create,
            Category::Update => &self.update,
            Category::Replace => &self.replace,
            Category::Delete => &self.delete,
        }
    }

    /// Returns the number of resources in a category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.addresses(category).len()
    }

    /// Returns the number of categorized resources.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.create.len() + self.update.len() + self.replace.len() + self.delete.len()
    }

    /// Returns true if nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterates over every categorized address, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::ALL.into_iter().flat_map(move |category| {
            self.addresses(category)
                .iter()
                .map(move |address| (category, address.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_resource_changes() -> Vec<ResourceChange> {
        vec![
            ResourceChange::new("test_create", vec![Action::Create]),
            ResourceChange::new("test_update", vec![Action::Update]),
            ResourceChange::new("test_delete", vec![Action::Delete]),
            ResourceChange::new("test_replace_1", vec![Action::Delete, Action::Create]),
            ResourceChange::new("test_replace_2", vec![Action::Create, Action::Delete]),
            ResourceChange::new("test_noop", vec![Action::NoOp]),
            ResourceChange::new("test_read", vec![Action::Read]),
        ]
    }

    #[test]
    fn test_get_create_changes() {
        assert_eq!(create_changes(&test_resource_changes()), vec!["test_create"]);
    }

    #[test]
    fn test_get_update_changes() {
        assert_eq!(update_changes(&test_resource_changes()), vec!["test_update"]);
    }

    #[test]
    fn test_get_delete_changes() {
        assert_eq!(delete_changes(&test_resource_changes()), vec!["test_delete"]);
    }

    #[test]
    fn test_get_replace_changes() {
        assert_eq!(
            replace_changes(&test_resource_changes()),
            vec!["test_replace_1", "test_replace_2"]
        );
    }

    #[test]
    fn test_unrecognized_sequences_dropped() {
        assert_eq!(Category::from_actions(&[Action::NoOp]), None);
        assert_eq!(Category::from_actions(&[Action::Read]), None);
        assert_eq!(Category::from_actions(&[]), None);
        assert_eq!(
            Category::from_actions(&[Action::Create, Action::Create]),
            None
        );
        assert_eq!(
            Category::from_actions(&[Action::Other(String::from("forget"))]),
            None
        );

        let summary = ChangeSummary::from_changes(&[
            ResourceChange::new("noop", vec![Action::NoOp]),
            ResourceChange::new("read", vec![Action::Read]),
        ]);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_categories_disjoint() {
        let summary = ChangeSummary::from_changes(&test_resource_changes());

        let mut seen = HashSet::new();
        for (_, address) in summary.iter() {
            assert!(seen.insert(address), "{address} appears in two categories");
        }
        assert_eq!(seen.len(), summary.total());
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_iter_follows_report_order() {
        let summary = ChangeSummary::from_changes(&test_resource_changes());
        let order: Vec<Category> = summary.iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![
                Category::Create,
                Category::Update,
                Category::Replace,
                Category::Replace,
                Category::Delete,
            ]
        );
    }
}
