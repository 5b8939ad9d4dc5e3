//! Salvager Engine
//!
//! Answers "where is this item needed, and how many do I still need?".
//!
//! # Architecture
//!
//! ```text
//! term → IdentityResolver → RequirementResolver → aggregate (+ ChecklistState)
//!                                                      ↑
//!                         ChecklistManager (toggle/cascade) → ChecklistStore
//! ```
//!
//! Everything here is synchronous and operates on immutable [`Datasets`]
//! plus one mutable checklist.
//!
//! [`Datasets`]: salvager_domain::Datasets

#![warn(missing_docs)]

mod aggregate;
mod checklist;
mod engine;
mod error;
mod identity;
mod resolver;

pub use aggregate::{adjusted_total, original_total, CategoryTotal, Totals};
pub use checklist::{ChecklistManager, ChecklistState, ToggleOutcome};
pub use engine::LookupEngine;
pub use error::EngineError;
pub use identity::{IdVariants, IdentityResolver, DEFAULT_SUGGESTION_LIMIT};
pub use resolver::RequirementResolver;
