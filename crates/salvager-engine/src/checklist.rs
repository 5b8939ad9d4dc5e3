//! Checklist state and its cascade rules
//!
//! Station levels, scrappy levels and project stages form ordered tracks:
//! checking a tier checks every lower tier on its track, unchecking a tier
//! unchecks every higher one. Quests toggle alone. The cascade is directional
//! only, so checking then unchecking the same tier leaves the lower tiers it
//! forced checked.

use crate::error::EngineError;
use crate::resolver::RequirementResolver;
use salvager_domain::{ChecklistEntries, ChecklistStore, Datasets, TierKey};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{debug, warn};

/// In-memory completion flags
///
/// Keys that cannot be parsed, or that parse but are not in canonical form
/// (`Refiner_02`, `scrappy_level_+5`), are kept verbatim so that saving never
/// drops or rewrites state written by another version. They never match any
/// tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistState {
    entries: BTreeMap<TierKey, bool>,
    opaque: BTreeMap<String, bool>,
}

impl ChecklistState {
    /// Empty state: every tier incomplete
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from its persisted form
    pub fn from_entries(entries: &ChecklistEntries) -> Self {
        let mut state = Self::new();
        for (raw, &done) in entries {
            match TierKey::parse(raw).filter(|key| key.storage_key() == *raw) {
                Some(key) => {
                    state.entries.insert(key, done);
                }
                None => {
                    state.opaque.insert(raw.clone(), done);
                }
            }
        }
        state
    }

    /// Persisted form of the state
    pub fn to_entries(&self) -> ChecklistEntries {
        let mut entries = self.opaque.clone();
        entries.extend(
            self.entries
                .iter()
                .map(|(key, &done)| (key.storage_key(), done)),
        );
        entries
    }

    /// Whether the tier is marked complete (absent means incomplete)
    pub fn is_complete(&self, key: &TierKey) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Set a single flag without cascading
    pub fn set(&mut self, key: TierKey, done: bool) {
        self.entries.insert(key, done);
    }

    /// Completed tiers in key order
    pub fn completed(&self) -> impl Iterator<Item = &TierKey> {
        self.entries
            .iter()
            .filter(|(_, done)| **done)
            .map(|(key, _)| key)
    }

    /// Number of stored entries, unparseable ones included
    pub fn len(&self) -> usize {
        self.entries.len() + self.opaque.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose tier is not in the datasets, plus unparseable keys
    ///
    /// Returns the number of entries removed.
    pub fn retain_known(&mut self, datasets: &Datasets) -> usize {
        let before = self.len();
        self.entries.retain(|key, _| datasets.contains_tier(key));
        self.opaque.clear();
        before - self.len()
    }
}

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// New state of the toggled tier
    pub now_complete: bool,
    /// Every tier whose flag actually changed, toggled tier included
    pub changed: Vec<TierKey>,
}

/// Owns the checklist and writes it through to a store on every mutation
pub struct ChecklistManager<S: ChecklistStore> {
    state: ChecklistState,
    store: S,
}

impl<S> ChecklistManager<S>
where
    S: ChecklistStore,
    S::Error: Display,
{
    /// Load saved state from the store
    pub fn load(store: S) -> Result<Self, EngineError> {
        let entries = store
            .load()
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        let state = ChecklistState::from_entries(&entries);
        debug!("Loaded {} checklist entries", state.len());
        Ok(Self { state, store })
    }

    /// Current state
    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the tier is complete
    pub fn is_complete(&self, key: &TierKey) -> bool {
        self.state.is_complete(key)
    }

    /// Toggle a tier, cascading along its track
    ///
    /// Lower/higher tiers are taken from the datasets. A key that is not in
    /// the datasets still flips, but has no track to cascade along.
    pub fn toggle(
        &mut self,
        key: &TierKey,
        datasets: &Datasets,
    ) -> Result<ToggleOutcome, EngineError> {
        let now_complete = !self.state.is_complete(key);
        let mut targets = vec![key.clone()];

        if let Some(ordinal) = key.ordinal() {
            targets.extend(
                datasets
                    .track_of(key)
                    .into_iter()
                    .filter(|other| other != key)
                    .filter(|other| match other.ordinal() {
                        Some(o) if now_complete => o < ordinal,
                        Some(o) => o > ordinal,
                        None => false,
                    }),
            );
        }

        let mut changed = Vec::new();
        for target in targets {
            if self.state.is_complete(&target) != now_complete {
                changed.push(target.clone());
            }
            self.state.set(target, now_complete);
        }

        if !datasets.contains_tier(key) {
            warn!("Toggled tier {} is not in the current datasets", key);
        }
        debug!(
            "Toggled {} to {} ({} tiers changed)",
            key,
            if now_complete { "complete" } else { "incomplete" },
            changed.len()
        );

        self.persist()?;
        Ok(ToggleOutcome {
            now_complete,
            changed,
        })
    }

    /// Whether any completed tier requires the item
    pub fn tiers_completed_for_item(&self, item_name: &str, datasets: &Datasets) -> bool {
        let resolver = RequirementResolver::new(datasets);
        self.state
            .completed()
            .any(|key| resolver.tier_requires(key, item_name))
    }

    /// Remove entries that no longer match the datasets
    pub fn prune_stale(&mut self, datasets: &Datasets) -> Result<usize, EngineError> {
        let removed = self.state.retain_known(datasets);
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Clear every entry
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.state = ChecklistState::new();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), EngineError> {
        self.store
            .save(&self.state.to_entries())
            .map_err(|e| EngineError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salvager_domain::{
        MemoryChecklistStore, Project, ProjectStage, Quest, RequirementEntry, ScrappyLevel,
        Station, StationLevel,
    };

    fn datasets() -> Datasets {
        Datasets {
            stations: vec![Station {
                name: "Refiner".to_string(),
                levels: (1..=4)
                    .map(|level| StationLevel {
                        level,
                        requirements: vec![RequirementEntry::new("Scrap Metal", level)],
                    })
                    .collect(),
            }],
            scrappy: (1..=3)
                .map(|level| ScrappyLevel {
                    level,
                    title: format!("Level {}", level),
                    requirements: Vec::new(),
                })
                .collect(),
            projects: vec![Project {
                id: "expedition".to_string(),
                name: "Expedition".to_string(),
                stages: (1..=3)
                    .map(|stage| ProjectStage {
                        stage,
                        title: format!("Stage {}", stage),
                        description: None,
                        requirements: Vec::new(),
                        category_requirements: Vec::new(),
                    })
                    .collect(),
            }],
            quests: vec![
                Quest {
                    id: "q1".to_string(),
                    name: "One".to_string(),
                    required_items: Vec::new(),
                },
                Quest {
                    id: "q2".to_string(),
                    name: "Two".to_string(),
                    required_items: Vec::new(),
                },
            ],
            ..Default::default()
        }
    }

    fn manager() -> ChecklistManager<MemoryChecklistStore> {
        ChecklistManager::load(MemoryChecklistStore::new()).unwrap()
    }

    #[test]
    fn test_check_cascades_down() {
        let data = datasets();
        let mut checklist = manager();
        let outcome = checklist.toggle(&TierKey::station("Refiner", 3), &data).unwrap();

        assert!(outcome.now_complete);
        assert_eq!(outcome.changed.len(), 3);
        assert!(checklist.is_complete(&TierKey::station("Refiner", 1)));
        assert!(checklist.is_complete(&TierKey::station("Refiner", 2)));
        assert!(checklist.is_complete(&TierKey::station("Refiner", 3)));
        assert!(!checklist.is_complete(&TierKey::station("Refiner", 4)));
    }

    #[test]
    fn test_uncheck_cascades_up() {
        let data = datasets();
        let mut checklist = manager();
        checklist.toggle(&TierKey::station("Refiner", 4), &data).unwrap();
        let outcome = checklist.toggle(&TierKey::station("Refiner", 2), &data).unwrap();

        assert!(!outcome.now_complete);
        assert!(checklist.is_complete(&TierKey::station("Refiner", 1)));
        assert!(!checklist.is_complete(&TierKey::station("Refiner", 2)));
        assert!(!checklist.is_complete(&TierKey::station("Refiner", 3)));
        assert!(!checklist.is_complete(&TierKey::station("Refiner", 4)));
    }

    #[test]
    fn test_cascade_is_idempotent() {
        let data = datasets();
        let mut checklist = manager();
        checklist.toggle(&TierKey::scrappy(2), &data).unwrap();
        let outcome = checklist.toggle(&TierKey::scrappy(3), &data).unwrap();

        // Levels 1 and 2 were already checked
        assert_eq!(outcome.changed, vec![TierKey::scrappy(3)]);
        assert!(checklist.is_complete(&TierKey::scrappy(1)));
    }

    #[test]
    fn test_check_then_uncheck_is_not_inverse() {
        let data = datasets();
        let mut checklist = manager();
        let key = TierKey::project_stage("expedition", 3);
        checklist.toggle(&key, &data).unwrap();
        checklist.toggle(&key, &data).unwrap();

        assert!(!checklist.is_complete(&key));
        assert!(checklist.is_complete(&TierKey::project_stage("expedition", 1)));
        assert!(checklist.is_complete(&TierKey::project_stage("expedition", 2)));
    }

    #[test]
    fn test_quests_do_not_cascade() {
        let data = datasets();
        let mut checklist = manager();
        let outcome = checklist.toggle(&TierKey::quest("q2"), &data).unwrap();
        assert_eq!(outcome.changed, vec![TierKey::quest("q2")]);
        assert!(!checklist.is_complete(&TierKey::quest("q1")));
    }

    #[test]
    fn test_tracks_are_independent() {
        let mut data = datasets();
        data.stations.push(Station {
            name: "Medical Lab".to_string(),
            levels: vec![StationLevel {
                level: 1,
                requirements: Vec::new(),
            }],
        });
        let mut checklist = manager();
        checklist.toggle(&TierKey::station("Refiner", 2), &data).unwrap();
        assert!(!checklist.is_complete(&TierKey::station("Medical Lab", 1)));
    }

    #[test]
    fn test_every_toggle_persists() {
        let data = datasets();
        let mut checklist = manager();
        checklist.toggle(&TierKey::station("Refiner", 2), &data).unwrap();
        checklist.toggle(&TierKey::quest("q1"), &data).unwrap();

        let saved = checklist.store().entries();
        assert_eq!(checklist.store().save_count(), 2);
        assert_eq!(saved.get("Refiner_1"), Some(&true));
        assert_eq!(saved.get("Refiner_2"), Some(&true));
        assert_eq!(saved.get("quest_q1"), Some(&true));
    }

    #[test]
    fn test_reload_keeps_unknown_keys() {
        let mut saved = ChecklistEntries::new();
        saved.insert("Refiner_2".to_string(), true);
        saved.insert("legacy-flag".to_string(), true);
        let mut checklist =
            ChecklistManager::load(MemoryChecklistStore::with_entries(saved)).unwrap();

        assert!(checklist.is_complete(&TierKey::station("Refiner", 2)));
        checklist.toggle(&TierKey::quest("q1"), &datasets()).unwrap();
        assert_eq!(checklist.store().entries().get("legacy-flag"), Some(&true));
    }

    #[test]
    fn test_stale_key_is_inert_until_pruned() {
        let data = datasets();
        let mut saved = ChecklistEntries::new();
        saved.insert("Old Station_2".to_string(), true);
        saved.insert("Refiner_1".to_string(), true);
        let mut checklist =
            ChecklistManager::load(MemoryChecklistStore::with_entries(saved)).unwrap();

        assert!(!checklist.tiers_completed_for_item("Scrap Metal", &Datasets::default()));
        assert_eq!(checklist.prune_stale(&data).unwrap(), 1);
        assert_eq!(checklist.state().len(), 1);
    }

    #[test]
    fn test_non_canonical_keys_are_kept_verbatim() {
        let mut entries = ChecklistEntries::new();
        entries.insert("Refiner_02".to_string(), true);
        entries.insert("scrappy_level_+5".to_string(), true);
        entries.insert("Refiner_3".to_string(), true);

        let state = ChecklistState::from_entries(&entries);
        assert!(!state.is_complete(&TierKey::station("Refiner", 2)));
        assert!(!state.is_complete(&TierKey::scrappy(5)));
        assert!(state.is_complete(&TierKey::station("Refiner", 3)));
        assert_eq!(state.to_entries(), entries);
    }

    #[test]
    fn test_tiers_completed_for_item() {
        let data = datasets();
        let mut checklist = manager();
        assert!(!checklist.tiers_completed_for_item("Scrap Metal", &data));
        checklist.toggle(&TierKey::station("Refiner", 1), &data).unwrap();
        assert!(checklist.tiers_completed_for_item("scrap metal", &data));
        assert!(!checklist.tiers_completed_for_item("Pulse Unit", &data));
    }

    #[test]
    fn test_reset() {
        let data = datasets();
        let mut checklist = manager();
        checklist.toggle(&TierKey::scrappy(3), &data).unwrap();
        checklist.reset().unwrap();
        assert!(checklist.state().is_empty());
        assert!(checklist.store().entries().is_empty());
    }
}
