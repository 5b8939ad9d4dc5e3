//! Loose JSON shapes of the dataset files and their validation
//!
//! Every record field is read as a raw JSON value so that a null or a value
//! of the wrong type degrades to "absent" instead of failing the file.
//! Conversion into the domain types happens once; records that cannot be
//! used (no name, no positive amount, no level number) are dropped with a
//! warning.

use salvager_domain::{
    Blueprint, CategoryRequirement, Item, KeepFor, Project, ProjectStage, Quantity, Quest,
    QuestItem, RequirementEntry, ScrappyLevel, Station, StationLevel,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Wrapper key of `stations.json`
pub(crate) const STATIONS_KEY: &str = "stations";
/// Wrapper key of `scrappy.json`
pub(crate) const SCRAPPY_KEY: &str = "scrappyLevelRequirementsRates";
/// Wrapper key of `projects.json`
pub(crate) const PROJECTS_KEY: &str = "projects";
/// Wrapper key of `quests.json`
pub(crate) const QUESTS_KEY: &str = "quests";
/// Wrapper key of `blueprints.json`
pub(crate) const BLUEPRINTS_KEY: &str = "blueprints";

/// Top level of an array dataset: `{ "<key>": [...] }` or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Document {
    Bare(Vec<Value>),
    Wrapped(Map<String, Value>),
}

impl Document {
    /// Records of the document, looking under `key` when wrapped
    pub(crate) fn into_records(self, key: &str) -> Vec<Value> {
        match self {
            Document::Bare(records) => records,
            Document::Wrapped(mut map) => match map.remove(key) {
                Some(Value::Array(records)) => records,
                Some(Value::Null) | None => {
                    warn!("Dataset has no '{}' array, using an empty collection", key);
                    Vec::new()
                }
                Some(other) => {
                    warn!("'{}' is not an array ({}), using an empty collection", key, other);
                    Vec::new()
                }
            },
        }
    }
}

/// Non-negative integer from a number or a numeric string
fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    as_u64(value).and_then(|n| u32::try_from(n).ok())
}

/// JS-style presence: anything but null/false/absent counts as set
fn is_present(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null) | Some(Value::Bool(false)))
}

/// Optional string field; any other type is treated as absent
fn text(value: Option<Value>, field: &str, context: &str) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        None | Some(Value::Null) => None,
        Some(other) => {
            warn!("Ignoring non-string {} {} in {}", field, other, context);
            None
        }
    }
}

/// Optional list field; each element that does not fit `T` is dropped
fn records<T: DeserializeOwned>(value: Option<Value>, field: &str, context: &str) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Vec::new(),
        Some(other) => {
            warn!("Ignoring non-list {} {} in {}", field, other, context);
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping malformed entry of {} in {}: {}", field, context, e);
                None
            }
        })
        .collect()
}

fn keep_for(value: Option<&Value>) -> Option<KeepFor> {
    if !is_present(value) {
        return None;
    }
    let amount = value.and_then(|v| v.get("amount")).and_then(as_u32);
    Some(KeepFor { amount })
}

/// Convert one `items.json` entry
pub(crate) fn item_from_json(name: &str, value: &Value) -> Item {
    let attrs = value.as_object();
    let field = |key: &str| attrs.and_then(|a| a.get(key));

    Item {
        name: name.to_string(),
        image: field("image").and_then(Value::as_str).map(str::to_string),
        safe_to_recycle: is_present(field("safe_to_recycle")),
        keep_for_quests: keep_for(field("keep_for_quests")),
        keep_for_projects: keep_for(field("keep_for_projects")),
    }
}

/// Convert the whole `items.json` object, keeping key order
pub(crate) fn items_from_json(items: &Map<String, Value>) -> Vec<Item> {
    items
        .iter()
        .map(|(name, value)| item_from_json(name, value))
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawRequirement {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    amount: Option<Value>,
}

fn requirements(value: Option<Value>, field: &str, context: &str) -> Vec<RequirementEntry> {
    records::<RawRequirement>(value, field, context)
        .into_iter()
        .filter_map(|r| {
            let name = text(r.name, "name", context)
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            let amount = r.amount.as_ref().and_then(as_u32).filter(|a| *a > 0);
            match (name, amount) {
                (Some(name), Some(amount)) => Some(RequirementEntry { name, amount }),
                (name, _) => {
                    warn!(
                        "Dropping requirement {:?} in {}: needs a name and a positive amount",
                        name, context
                    );
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawStation {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    levels: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawStationLevel {
    #[serde(default)]
    level: Option<Value>,
    #[serde(default)]
    requirements: Option<Value>,
}

/// `stations.json`
pub(crate) fn stations(document: Document) -> Vec<Station> {
    records::<RawStation>(
        Some(Value::Array(document.into_records(STATIONS_KEY))),
        "stations",
        "stations.json",
    )
    .into_iter()
    .filter_map(|station| {
        let name = text(station.name, "name", "station").filter(|n| !n.trim().is_empty());
        let Some(name) = name else {
            warn!("Dropping station without a name");
            return None;
        };
        let mut levels: Vec<StationLevel> =
            records::<RawStationLevel>(station.levels, "levels", &name)
                .into_iter()
                .filter_map(|level| {
                    let Some(number) = level.level.as_ref().and_then(as_u32) else {
                        warn!("Dropping level without a number in station {}", name);
                        return None;
                    };
                    let context = format!("{} level {}", name, number);
                    Some(StationLevel {
                        level: number,
                        requirements: requirements(
                            level.requirements,
                            "requirements",
                            &context,
                        ),
                    })
                })
                .collect();
        levels.sort_by_key(|l| l.level);
        Some(Station { name, levels })
    })
    .collect()
}

#[derive(Debug, Deserialize)]
struct RawScrappyLevel {
    #[serde(default)]
    level: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    requirements: Option<Value>,
}

/// `scrappy.json`
pub(crate) fn scrappy(document: Document) -> Vec<ScrappyLevel> {
    let mut levels: Vec<ScrappyLevel> = records::<RawScrappyLevel>(
        Some(Value::Array(document.into_records(SCRAPPY_KEY))),
        "levels",
        "scrappy.json",
    )
    .into_iter()
    .filter_map(|level| {
        let Some(number) = level.level.as_ref().and_then(as_u32) else {
            warn!("Dropping scrappy level without a number");
            return None;
        };
        let context = format!("scrappy level {}", number);
        Some(ScrappyLevel {
            level: number,
            title: text(level.title, "title", &context)
                .unwrap_or_else(|| format!("Level {}", number)),
            requirements: requirements(level.requirements, "requirements", &context),
        })
    })
    .collect();
    levels.sort_by_key(|l| l.level);
    levels
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    stages: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStage {
    #[serde(default)]
    stage: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    requirements: Option<Value>,
    #[serde(default)]
    category_requirements: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategoryRequirement {
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    cred_value: Option<Value>,
}

/// `projects.json`
pub(crate) fn projects(document: Document) -> Vec<Project> {
    records::<RawProject>(
        Some(Value::Array(document.into_records(PROJECTS_KEY))),
        "projects",
        "projects.json",
    )
    .into_iter()
    .filter_map(|project| {
        let Some(id) = project.id.as_ref().and_then(id_string) else {
            warn!("Dropping project without an id");
            return None;
        };
        let name = text(project.name, "name", &id).unwrap_or_else(|| id.clone());
        let mut stages: Vec<ProjectStage> = records::<RawStage>(project.stages, "stages", &id)
            .into_iter()
            .filter_map(|stage| {
                let Some(number) = stage.stage.as_ref().and_then(as_u32) else {
                    warn!("Dropping stage without a number in project {}", id);
                    return None;
                };
                let context = format!("project {} stage {}", id, number);
                let category_requirements = records::<RawCategoryRequirement>(
                    stage.category_requirements,
                    "categoryRequirements",
                    &context,
                )
                .into_iter()
                .filter_map(|c| {
                    Some(CategoryRequirement {
                        category: text(c.category, "category", &context)?,
                        cred_value: c.cred_value.as_ref().and_then(as_u64)?,
                    })
                })
                .collect();
                Some(ProjectStage {
                    stage: number,
                    title: text(stage.title, "title", &context)
                        .unwrap_or_else(|| format!("Stage {}", number)),
                    description: text(stage.description, "description", &context),
                    requirements: requirements(stage.requirements, "requirements", &context),
                    category_requirements,
                })
            })
            .collect();
        stages.sort_by_key(|s| s.stage);
        Some(Project { id, name, stages })
    })
    .collect()
}

#[derive(Debug, Deserialize)]
struct RawQuest {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    required_items: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawQuestItem {
    #[serde(default)]
    item_id: Option<Value>,
    #[serde(default)]
    item: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
}

fn quantity(value: Option<Value>) -> Quantity {
    match value {
        None | Some(Value::Null) => Quantity::Missing,
        Some(Value::String(s)) => Quantity::parse(&s),
        Some(other) => match as_u32(&other) {
            Some(n) => Quantity::Count(n),
            None => Quantity::Unparsed(other.to_string()),
        },
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `quests.json`
pub(crate) fn quests(document: Document) -> Vec<Quest> {
    records::<RawQuest>(
        Some(Value::Array(document.into_records(QUESTS_KEY))),
        "quests",
        "quests.json",
    )
    .into_iter()
    .filter_map(|quest| {
        let Some(id) = quest.id.as_ref().and_then(id_string) else {
            warn!("Dropping quest {:?} without an id", quest.name);
            return None;
        };
        let context = format!("quest {}", id);
        let required_items =
            records::<RawQuestItem>(quest.required_items, "required_items", &context)
                .into_iter()
                .filter_map(|item| {
                    let item_name = item
                        .item
                        .and_then(|i| i.get("name").cloned())
                        .and_then(|n| text(Some(n), "item.name", &context));
                    // Fall back to the embedded name when the id is missing
                    let item_id = item
                        .item_id
                        .as_ref()
                        .and_then(id_string)
                        .or_else(|| item_name.clone())?;
                    Some(QuestItem {
                        item_id,
                        item_name,
                        quantity: quantity(item.quantity),
                    })
                })
                .collect();
        Some(Quest {
            name: text(quest.name, "name", &context).unwrap_or_else(|| id.clone()),
            id,
            required_items,
        })
    })
    .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlueprint {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    workshop: Option<Value>,
    #[serde(default)]
    level: Option<Value>,
    #[serde(default)]
    crafting_recipe: Option<Value>,
}

/// `blueprints.json`
pub(crate) fn blueprints(document: Document) -> Vec<Blueprint> {
    records::<RawBlueprint>(
        Some(Value::Array(document.into_records(BLUEPRINTS_KEY))),
        "blueprints",
        "blueprints.json",
    )
    .into_iter()
    .filter_map(|blueprint| {
        let Some(name) =
            text(blueprint.name, "name", "blueprint").filter(|n| !n.trim().is_empty())
        else {
            warn!("Dropping blueprint without a name");
            return None;
        };
        let context = format!("blueprint {}", name);
        Some(Blueprint {
            workshop: text(blueprint.workshop, "workshop", &context).unwrap_or_default(),
            level: blueprint.level.as_ref().and_then(as_u32).unwrap_or(0),
            crafting_recipe: requirements(blueprint.crafting_recipe, "craftingRecipe", &context),
            name,
        })
    })
    .collect()
}
