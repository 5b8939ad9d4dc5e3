//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::collections::BTreeMap;
use std::convert::Infallible;

/// Flat persisted form of the checklist: storage key to completed flag
pub type ChecklistEntries = BTreeMap<String, bool>;

/// Trait for persisting checklist state
///
/// The whole map is written on every mutation and read once at startup.
/// Implemented by the infrastructure layer (salvager-store)
pub trait ChecklistStore {
    /// Error type for store operations
    type Error;

    /// Load the saved entries; an empty map when nothing was saved yet
    fn load(&self) -> Result<ChecklistEntries, Self::Error>;

    /// Replace the saved entries
    fn save(&mut self, entries: &ChecklistEntries) -> Result<(), Self::Error>;
}

/// Checklist store that keeps entries in memory only
///
/// Useful for tests and for sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryChecklistStore {
    entries: ChecklistEntries,
    saves: usize,
}

impl MemoryChecklistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with saved entries
    pub fn with_entries(entries: ChecklistEntries) -> Self {
        Self { entries, saves: 0 }
    }

    /// Currently saved entries
    pub fn entries(&self) -> &ChecklistEntries {
        &self.entries
    }

    /// Number of saves performed
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ChecklistStore for MemoryChecklistStore {
    type Error = Infallible;

    fn load(&self) -> Result<ChecklistEntries, Self::Error> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &ChecklistEntries) -> Result<(), Self::Error> {
        self.entries = entries.clone();
        self.saves += 1;
        Ok(())
    }
}
