//! In-memory category tree and subtree closure.

use crate::domain::{Category, CategoryId};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Parent → children index over visible categories.
///
/// Built from one bulk fetch; children keep sibling order
/// (`sort_order`, case-insensitive name, id).
#[derive(Debug, Clone)]
pub struct CategoryTree {
    children: HashMap<CategoryId, Vec<CategoryId>>,
}

impl CategoryTree {
    /// Index `categories` by parent. Input order does not matter.
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut sorted: Vec<&Category> = categories.iter().collect();
        sorted.sort_by_key(|c| c.sibling_key());

        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        for category in sorted {
            children
                .entry(category.parent_id)
                .or_default()
                .push(category.id);
        }

        Self { children }
    }

    /// Direct children of `id`, in sibling order.
    pub fn children(&self, id: CategoryId) -> &[CategoryId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All descendants of `id`, excluding `id` itself.
    ///
    /// For each child in sibling order the child is appended, then its own
    /// descendants are placed in front of everything collected so far, so the
    /// deepest levels come first. A node reached twice (a parent/child cycle)
    /// is skipped.
    pub fn descendants(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut visited = HashSet::new();
        visited.insert(id);
        self.collect(id, &mut visited)
    }

    /// Descendants of `id` followed by `id` itself: the set the listers and
    /// the price fallback filter on.
    pub fn subtree(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut ids = self.descendants(id);
        ids.push(id);
        ids
    }

    fn collect(&self, id: CategoryId, visited: &mut HashSet<CategoryId>) -> Vec<CategoryId> {
        let mut out = Vec::new();

        for &child in self.children(id) {
            if !visited.insert(child) {
                warn!(parent = %id, category_id = %child, "Category cycle detected, skipping");
                continue;
            }

            out.push(child);

            let nested = self.collect(child, visited);
            if !nested.is_empty() {
                let mut merged = nested;
                merged.extend(out);
                out = merged;
            }
        }

        out
    }
}
