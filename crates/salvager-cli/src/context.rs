//! Builds the lookup engine from configuration.

use crate::config::Config;
use crate::error::Result;
use salvager_catalog::DatasetLoader;
use salvager_engine::LookupEngine;
use salvager_store::SqliteChecklistStore;
use std::fs;
use tracing::debug;

/// Engine backed by the SQLite checklist store.
pub type Engine = LookupEngine<SqliteChecklistStore>;

/// Load datasets and open the checklist database named by `config`.
pub fn open_engine(config: &Config) -> Result<Engine> {
    let datasets = DatasetLoader::new(&config.data_dir).load()?;

    let database = config.database_path()?;
    if let Some(parent) = database.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!(
        "Opening checklist {} (slot {})",
        database.display(),
        config.checklist_slot
    );

    let store = SqliteChecklistStore::new(&database, config.checklist_slot.clone())?;
    Ok(LookupEngine::new(datasets, store)?)
}
