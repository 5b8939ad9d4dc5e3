//! Reads a data directory into [`Datasets`]

use crate::error::CatalogError;
use crate::raw::{self, items_from_json, Document};
use salvager_domain::{Catalog, Datasets};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Items file name
pub const ITEMS_FILE: &str = "items.json";
/// Stations file name
pub const STATIONS_FILE: &str = "stations.json";
/// Scrappy file name
pub const SCRAPPY_FILE: &str = "scrappy.json";
/// Projects file name
pub const PROJECTS_FILE: &str = "projects.json";
/// Quests file name
pub const QUESTS_FILE: &str = "quests.json";
/// Blueprints file name
pub const BLUEPRINTS_FILE: &str = "blueprints.json";

/// Loads the six dataset files from one directory
///
/// Every file is optional. A missing file degrades to an empty collection
/// and is logged; a present file with invalid JSON is an error. Malformed
/// fields inside otherwise valid records are dropped with a warning.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    dir: PathBuf,
}

impl DatasetLoader {
    /// Create a loader rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this loader reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all datasets
    pub fn load(&self) -> Result<Datasets, CatalogError> {
        let catalog = match self.read_value(ITEMS_FILE)? {
            Some(Value::Object(items)) => Catalog::new(items_from_json(&items)),
            Some(_) => {
                return Err(CatalogError::InvalidFormat(format!(
                    "{} must be an object keyed by item name",
                    self.dir.join(ITEMS_FILE).display()
                )))
            }
            None => Catalog::default(),
        };

        let datasets = Datasets {
            catalog,
            stations: self
                .read_typed::<Document>(STATIONS_FILE)?
                .map(raw::stations)
                .unwrap_or_default(),
            scrappy: self
                .read_typed::<Document>(SCRAPPY_FILE)?
                .map(raw::scrappy)
                .unwrap_or_default(),
            projects: self
                .read_typed::<Document>(PROJECTS_FILE)?
                .map(raw::projects)
                .unwrap_or_default(),
            quests: self
                .read_typed::<Document>(QUESTS_FILE)?
                .map(raw::quests)
                .unwrap_or_default(),
            blueprints: self
                .read_typed::<Document>(BLUEPRINTS_FILE)?
                .map(raw::blueprints)
                .unwrap_or_default(),
        };

        info!(
            "Loaded {} items, {} stations, {} scrappy levels, {} projects, {} quests, {} blueprints from {}",
            datasets.catalog.len(),
            datasets.stations.len(),
            datasets.scrappy.len(),
            datasets.projects.len(),
            datasets.quests.len(),
            datasets.blueprints.len(),
            self.dir.display()
        );

        Ok(datasets)
    }

    fn read_text(&self, file: &str) -> Result<Option<(PathBuf, String)>, CatalogError> {
        let path = self.dir.join(file);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Read {}", path.display());
                Ok(Some((path, text)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Dataset {} not found, using an empty collection", path.display());
                Ok(None)
            }
            Err(source) => Err(CatalogError::Io { path, source }),
        }
    }

    fn read_value(&self, file: &str) -> Result<Option<Value>, CatalogError> {
        self.read_typed(file)
    }

    fn read_typed<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, CatalogError> {
        let Some((path, text)) = self.read_text(file)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| CatalogError::Json { path, source })
    }
}
