//! Lookup engine: the single entry point used by front ends

use crate::aggregate::{self, Totals};
use crate::checklist::{ChecklistManager, ChecklistState, ToggleOutcome};
use crate::error::EngineError;
use crate::identity::IdentityResolver;
use crate::resolver::RequirementResolver;
use salvager_domain::{ChecklistStore, Datasets, SearchResult, TierKey};
use std::fmt::Display;
use tracing::debug;

/// Datasets plus the user's checklist
///
/// # Examples
///
/// ```
/// use salvager_domain::{Catalog, Datasets, Item, MemoryChecklistStore};
/// use salvager_engine::LookupEngine;
///
/// let datasets = Datasets {
///     catalog: Catalog::new(vec![Item::new("Accordion")]),
///     ..Default::default()
/// };
/// let engine = LookupEngine::new(datasets, MemoryChecklistStore::new()).unwrap();
///
/// let result = engine.search("ACCORDION").unwrap();
/// assert_eq!(result.name, "Accordion");
/// assert_eq!(engine.original_total(&result), 0);
/// ```
pub struct LookupEngine<S: ChecklistStore> {
    datasets: Datasets,
    checklist: ChecklistManager<S>,
}

impl<S> LookupEngine<S>
where
    S: ChecklistStore,
    S::Error: Display,
{
    /// Create an engine, loading saved checklist state from `store`
    pub fn new(datasets: Datasets, store: S) -> Result<Self, EngineError> {
        let checklist = ChecklistManager::load(store)?;
        Ok(Self {
            datasets,
            checklist,
        })
    }

    /// Loaded datasets
    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Current checklist state
    pub fn checklist(&self) -> &ChecklistState {
        self.checklist.state()
    }

    /// Checklist storage backend
    pub fn store(&self) -> &S {
        self.checklist.store()
    }

    /// Canonical catalog name for a term
    pub fn resolve(&self, term: &str) -> Option<&str> {
        IdentityResolver::new(&self.datasets.catalog).resolve(term)
    }

    /// Autocomplete suggestions for a fragment
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<&str> {
        IdentityResolver::new(&self.datasets.catalog).suggest(fragment, limit)
    }

    /// Look up everything known about a term
    ///
    /// Returns `None` for a blank term. An unresolved term is not an error:
    /// requirements are still searched under the raw term, since datasets can
    /// reference items the catalog does not list.
    pub fn search(&self, term: &str) -> Option<SearchResult> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        let item = self.datasets.catalog.find(term).cloned();
        let name = item
            .as_ref()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| term.to_string());

        let requirements = RequirementResolver::new(&self.datasets).collect(term);

        debug!(
            "Search '{}': in_catalog={} stations={} scrappy={} projects={} quests={} blueprints={}",
            term,
            item.is_some(),
            requirements.stations.len(),
            requirements.scrappy.len(),
            requirements.projects.len(),
            requirements.quests.len(),
            requirements.blueprints.len()
        );

        Some(SearchResult {
            name,
            item,
            requirements,
        })
    }

    /// Total required, ignoring the checklist
    pub fn original_total(&self, result: &SearchResult) -> u64 {
        aggregate::original_total(&result.requirements)
    }

    /// Total still required given the current checklist
    pub fn adjusted_total(&self, result: &SearchResult) -> u64 {
        aggregate::adjusted_total(&result.requirements, self.checklist.state())
    }

    /// Both totals with a per-category breakdown
    pub fn totals(&self, result: &SearchResult) -> Totals {
        Totals::compute(&result.requirements, self.checklist.state())
    }

    /// Toggle a checklist tier (cascading) and persist
    pub fn toggle(&mut self, key: &TierKey) -> Result<ToggleOutcome, EngineError> {
        self.checklist.toggle(key, &self.datasets)
    }

    /// Whether a tier is complete
    pub fn is_complete(&self, key: &TierKey) -> bool {
        self.checklist.is_complete(key)
    }

    /// Whether any completed tier requires the item
    pub fn tiers_completed_for_item(&self, item_name: &str) -> bool {
        self.checklist
            .tiers_completed_for_item(item_name, &self.datasets)
    }

    /// Drop checklist entries that no longer match the datasets
    pub fn prune_stale(&mut self) -> Result<usize, EngineError> {
        self.checklist.prune_stale(&self.datasets)
    }

    /// Clear the checklist
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.checklist.reset()
    }
}
