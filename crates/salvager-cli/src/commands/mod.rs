//! Command implementations.

pub mod checklist;
pub mod merge;
pub mod search;
pub mod toggle;

pub use self::checklist::execute_checklist;
pub use self::merge::execute_merge_catalog;
pub use self::search::{execute_search, execute_suggest};
pub use self::toggle::execute_toggle;
