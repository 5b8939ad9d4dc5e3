//! Item identity resolution
//!
//! Datasets refer to items inconsistently: the catalog and station data use
//! display names, quests use display names, slugs or `-recipe` ids. This
//! module maps all of them back to catalog entries.

use salvager_domain::{Catalog, QuestItem};

/// Default number of autocomplete suggestions
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

const RECIPE_SUFFIX: &str = "-recipe";

/// Normalized forms of an item identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdVariants {
    /// Dashes folded to spaces: `"pulse unit recipe"`
    pub spaced: String,
    /// Whitespace runs folded to dashes: `"pulse-unit-recipe"`
    pub dashed: String,
    /// Dashed form without a trailing `-recipe`: `"pulse-unit"`
    pub recipe_stripped: String,
}

impl IdVariants {
    /// Lower-case, trim and derive the three variants of `id`
    pub fn of(id: &str) -> Self {
        let lowered = id.trim().to_lowercase();
        let spaced = lowered.replace('-', " ");
        let dashed = lowered.split_whitespace().collect::<Vec<_>>().join("-");
        let recipe_stripped = dashed
            .strip_suffix(RECIPE_SUFFIX)
            .unwrap_or(&dashed)
            .to_string();
        Self {
            spaced,
            dashed,
            recipe_stripped,
        }
    }
}

/// Resolves search terms and quest references against the catalog
#[derive(Debug, Clone, Copy)]
pub struct IdentityResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> IdentityResolver<'a> {
    /// Create a resolver over a catalog
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Canonical name for a term, by case-insensitive exact match
    pub fn resolve(&self, term: &str) -> Option<&'a str> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        self.catalog.find(term).map(|item| item.name.as_str())
    }

    /// Autocomplete: catalog names containing `fragment`, in catalog order
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<&'a str> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.catalog
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .map(|item| item.name.as_str())
            .take(limit)
            .collect()
    }

    /// Whether a quest item reference points at `term`
    ///
    /// Matches when the embedded display name equals the term, or when the
    /// item id (dashed or recipe-stripped) equals the dashed term and its
    /// spaced form names a real catalog item. The catalog check keeps
    /// look-alike ids that are not items from matching.
    pub fn quest_item_matches(&self, quest_item: &QuestItem, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return false;
        }

        if let Some(name) = &quest_item.item_name {
            if name.trim().to_lowercase() == term {
                return true;
            }
        }

        let target = IdVariants::of(&term);
        let id = IdVariants::of(&quest_item.item_id);
        let candidate = if id.dashed == target.dashed {
            &id.dashed
        } else if id.recipe_stripped == target.dashed {
            &id.recipe_stripped
        } else {
            return false;
        };

        self.catalog.find_normalized(candidate).is_some()
    }
}
