//! Merges downloaded catalog API pages into an `items.json` document
//!
//! Pages are fetched by some other tool; this module only consumes them.
//! Existing entries are never modified. New names are appended with an empty
//! attribute object and the whole document is re-sorted.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// An `items.json` document: item name to attributes, order preserved
pub type ItemsFile = Map<String, Value>;

/// One page of the catalog API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Items on this page; absent means there is nothing more to read
    #[serde(default)]
    pub data: Option<Vec<ApiItem>>,
    /// Paging information
    #[serde(default)]
    pub pagination: Pagination,
}

/// Paging block of a [`CatalogPage`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Total page count
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total item count
    #[serde(default)]
    pub total: Option<u64>,
    /// Whether another page follows
    #[serde(default)]
    pub has_next_page: bool,
}

/// An item as returned by the API
///
/// Only the name matters for merging; everything else is carried along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiItem {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiItem {
    /// Create an item with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            extra: Map::new(),
        }
    }
}

/// Counts reported after a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MergeReport {
    /// Entries in the existing document
    pub existing: usize,
    /// New entries added from the API
    pub added: usize,
    /// Entries in the merged document
    pub total: usize,
}

/// Concatenate the items of consecutive pages
///
/// Stops after the first page without `data` or without a next page; any
/// pages past that point are ignored.
pub fn collect_pages<I>(pages: I) -> Vec<ApiItem>
where
    I: IntoIterator<Item = CatalogPage>,
{
    let mut items = Vec::new();

    for (index, page) in pages.into_iter().enumerate() {
        let Some(data) = page.data else {
            debug!("Page {} has no data, stopping", index + 1);
            break;
        };
        debug!(
            "Page {}/{}: {} items",
            page.pagination.page.unwrap_or(index as u32 + 1),
            page.pagination
                .total_pages
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string()),
            data.len()
        );
        items.extend(data);
        if !page.pagination.has_next_page {
            break;
        }
    }

    items
}

/// Merge API items into an existing document
///
/// Names are compared case-insensitively, so an API name that differs from
/// an existing key only by case is not added. Items without a name are
/// skipped. The result is sorted case-insensitively with ties broken by the
/// raw name.
pub fn merge_items(api_items: &[ApiItem], existing: &ItemsFile) -> (ItemsFile, MergeReport) {
    let mut seen: HashSet<String> = existing.keys().map(|k| k.to_lowercase()).collect();
    let mut merged: Vec<(String, Value)> = existing
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let mut added = 0;
    for item in api_items {
        let Some(name) = item.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        if seen.insert(name.to_lowercase()) {
            merged.push((name.to_string(), Value::Object(Map::new())));
            added += 1;
        }
    }

    merged.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let report = MergeReport {
        existing: existing.len(),
        added,
        total: merged.len(),
    };

    (merged.into_iter().collect(), report)
}

/// Read an `items.json` document; a missing file is an empty document
pub fn read_items_file(path: &Path) -> Result<ItemsFile, CatalogError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, starting from an empty catalog", path.display());
            return Ok(ItemsFile::new());
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(items)) => Ok(items),
        Ok(_) => Err(CatalogError::InvalidFormat(format!(
            "{} must be an object keyed by item name",
            path.display()
        ))),
        Err(source) => Err(CatalogError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a saved API page
pub fn read_page(path: &Path) -> Result<CatalogPage, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an `items.json` document with two-space indentation
pub fn write_items_file(path: &Path, items: &ItemsFile) -> Result<(), CatalogError> {
    let mut text = serde_json::to_string_pretty(items).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    fs::write(path, text).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} items to {}", items.len(), path.display());
    Ok(())
}
