//! Salvager dataset files
//!
//! Reads the JSON datasets into validated [`salvager_domain::Datasets`] and
//! merges downloaded catalog API pages into `items.json`.
//!
//! # Examples
//!
//! ```no_run
//! use salvager_catalog::DatasetLoader;
//!
//! let datasets = DatasetLoader::new("data").load().unwrap();
//! println!("{} items", datasets.catalog.len());
//! ```

#![warn(missing_docs)]

mod error;
mod loader;
mod merge;
mod raw;

pub use error::CatalogError;
pub use loader::{
    DatasetLoader, BLUEPRINTS_FILE, ITEMS_FILE, PROJECTS_FILE, QUESTS_FILE, SCRAPPY_FILE,
    STATIONS_FILE,
};
pub use merge::{
    collect_pages, merge_items, read_items_file, read_page, write_items_file, ApiItem,
    CatalogPage, ItemsFile, MergeReport, Pagination,
};
