//! Salvager Domain Layer
//!
//! This crate contains the data model for Salvager: the item catalog, the
//! progression datasets that consume items, and the tier keys the checklist
//! is built on. It has no external dependencies; JSON loading lives in
//! `salvager-catalog` and storage in `salvager-store`.
//!
//! ## Key Concepts
//!
//! - **Item**: a catalog entry keyed by its canonical display name
//! - **Requirement sources**: stations, scrappy levels, projects, quests and
//!   blueprints, each referencing items by name and amount
//! - **Tier**: a single checkable unit of progression (station level, scrappy
//!   level, project stage, quest)
//! - **Search result**: everything known about one item for one query
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Datasets are validated once at load time and immutable afterwards
//! - Trait definitions for the checklist persistence boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datasets;
pub mod item;
pub mod progression;
pub mod requirement;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use datasets::Datasets;
pub use item::{Catalog, Item, KeepFor};
pub use progression::{
    Blueprint, CategoryRequirement, Project, ProjectStage, Quantity, Quest, QuestItem,
    RequirementEntry, ScrappyLevel, Station, StationLevel, EXPEDITION_PROJECT_ID,
};
pub use requirement::{
    BlueprintUsage, ProjectRequirement, QuestRequirement, Requirements, ScrappyRequirement,
    SearchOutcome, SearchResult, StationRequirement, TieredRequirement,
};
pub use tier::{TierFamily, TierKey};
pub use traits::{ChecklistEntries, ChecklistStore, MemoryChecklistStore};
