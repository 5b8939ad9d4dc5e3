//! Item catalog module

use std::collections::HashMap;

/// Amount attached to a keep-for category flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeepFor {
    /// Amount the category asks to keep, when the dataset records one
    pub amount: Option<u32>,
}

/// A catalog item
///
/// Items are keyed by their canonical display name. The category flags are
/// all optional: an item with none of them is known but uncategorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Canonical display name (case preserved)
    pub name: String,

    /// Image URL
    pub image: Option<String>,

    /// Item can be recycled without losing anything
    pub safe_to_recycle: bool,

    /// Legacy quest flag, superseded by the quest dataset
    pub keep_for_quests: Option<KeepFor>,

    /// Keep for project stages
    pub keep_for_projects: Option<KeepFor>,
}

impl Item {
    /// Create an uncategorized item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            safe_to_recycle: false,
            keep_for_quests: None,
            keep_for_projects: None,
        }
    }

    /// Whether any category flag is present
    pub fn has_categories(&self) -> bool {
        self.safe_to_recycle || self.keep_for_quests.is_some() || self.keep_for_projects.is_some()
    }
}

/// Insertion-ordered item collection with case-insensitive lookup
///
/// When several names differ only by case, the first one inserted is the
/// canonical entry for lookups. Later duplicates stay in the collection
/// (they are still listed) but are never returned by [`Catalog::find`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_lower: HashMap<String, usize>,
    by_normalized: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from items in their load order
    pub fn new(items: Vec<Item>) -> Self {
        let mut by_lower = HashMap::with_capacity(items.len());
        let mut by_normalized = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            by_lower.entry(item.name.to_lowercase()).or_insert(idx);
            by_normalized.entry(spaced_form(&item.name)).or_insert(idx);
        }
        Self {
            items,
            by_lower,
            by_normalized,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the catalog holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Case-insensitive exact lookup
    pub fn find(&self, name: &str) -> Option<&Item> {
        self.by_lower
            .get(&name.to_lowercase())
            .map(|&idx| &self.items[idx])
    }

    /// Lookup after folding dashes to spaces on both sides
    ///
    /// `"anti-gravity unit"`, `"Anti Gravity Unit"` and `"anti-gravity-unit"`
    /// all hit an item named `"Anti-Gravity Unit"`.
    pub fn find_normalized(&self, name: &str) -> Option<&Item> {
        self.by_normalized
            .get(&spaced_form(name))
            .map(|&idx| &self.items[idx])
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn spaced_form(name: &str) -> String {
    name.trim().to_lowercase().replace('-', " ")
}
