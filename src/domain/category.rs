//! Category rows as seen through the storefront visibility filter.

use super::primitives::CategoryId;

/// A visible category: active, assigned to the context store and described in
/// the context language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub parent_id: CategoryId,
    pub name: String,
    pub sort_order: i64,
}

impl Category {
    /// Sort key used for sibling ordering: sort_order, then case-insensitive name.
    pub fn sibling_key(&self) -> (i64, String, CategoryId) {
        (self.sort_order, self.name.to_lowercase(), self.id)
    }
}

/// Which parents a children lookup covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentSelector {
    One(CategoryId),
    Many(Vec<CategoryId>),
}

impl ParentSelector {
    /// Requested parent ids in caller order, first occurrence kept.
    pub fn parent_ids(&self) -> Vec<CategoryId> {
        match self {
            ParentSelector::One(id) => vec![*id],
            ParentSelector::Many(ids) => {
                let mut seen = std::collections::HashSet::with_capacity(ids.len());
                ids.iter().copied().filter(|id| seen.insert(*id)).collect()
            }
        }
    }
}

impl From<CategoryId> for ParentSelector {
    fn from(id: CategoryId) -> Self {
        ParentSelector::One(id)
    }
}

impl From<Vec<CategoryId>> for ParentSelector {
    fn from(ids: Vec<CategoryId>) -> Self {
        ParentSelector::Many(ids)
    }
}

/// Children of one requested parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildGroup {
    pub parent_id: CategoryId,
    pub children: Vec<Category>,
}

/// Children grouped by parent, in the order the parents were requested.
///
/// Every requested parent has a group, empty when it has no visible children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildrenByParent {
    groups: Vec<ChildGroup>,
}

impl ChildrenByParent {
    /// Group `children` under `parents`. Children whose parent was not
    /// requested are dropped; relative order within a parent is kept.
    pub fn group(parents: &[CategoryId], children: Vec<Category>) -> Self {
        let mut groups: Vec<ChildGroup> = parents
            .iter()
            .map(|&parent_id| ChildGroup {
                parent_id,
                children: Vec::new(),
            })
            .collect();

        for child in children {
            if let Some(group) = groups.iter_mut().find(|g| g.parent_id == child.parent_id) {
                group.children.push(child);
            }
        }

        Self { groups }
    }

    pub fn get(&self, parent_id: CategoryId) -> Option<&[Category]> {
        self.groups
            .iter()
            .find(|g| g.parent_id == parent_id)
            .map(|g| g.children.as_slice())
    }

    pub fn parent_ids(&self) -> Vec<CategoryId> {
        self.groups.iter().map(|g| g.parent_id).collect()
    }

    pub fn into_groups(self) -> Vec<ChildGroup> {
        self.groups
    }
}
