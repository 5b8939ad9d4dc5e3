//! Progression datasets: everything that consumes items
//!
//! Stations, scrappy levels and projects are tiered tracks where completing
//! tier N implies tiers 1..N-1 are done. Quests are independent. Blueprints
//! only describe crafting recipes and are never counted toward totals.

/// Project id of the expedition track
pub const EXPEDITION_PROJECT_ID: &str = "expedition";

/// A named item and the amount required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntry {
    /// Item name as written in the dataset
    pub name: String,
    /// Positive amount
    pub amount: u32,
}

impl RequirementEntry {
    /// Create a requirement entry
    pub fn new(name: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Case-insensitive exact comparison against an item name
    pub fn is_for(&self, item_name: &str) -> bool {
        self.name.to_lowercase() == item_name.to_lowercase()
    }
}

/// A crafting station with ordered upgrade levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Station name (may contain underscores)
    pub name: String,
    /// Levels in increasing order
    pub levels: Vec<StationLevel>,
}

/// One upgrade level of a station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationLevel {
    /// Level number
    pub level: u32,
    /// Items consumed by the upgrade
    pub requirements: Vec<RequirementEntry>,
}

/// One level of the scrappy track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrappyLevel {
    /// Level number
    pub level: u32,
    /// Display title
    pub title: String,
    /// Items consumed by the level
    pub requirements: Vec<RequirementEntry>,
}

/// A staged progression track (the expedition is one)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Stable project id
    pub id: String,
    /// Display name
    pub name: String,
    /// Stages in increasing order
    pub stages: Vec<ProjectStage>,
}

impl Project {
    /// True for the expedition project
    pub fn is_expedition(&self) -> bool {
        self.id == EXPEDITION_PROJECT_ID
    }
}

/// One stage of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStage {
    /// Stage number
    pub stage: u32,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Item requirements
    pub requirements: Vec<RequirementEntry>,
    /// Currency-value requirements; never item requirements
    pub category_requirements: Vec<CategoryRequirement>,
}

/// "N credits worth of <category>" stage requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRequirement {
    /// Item category
    pub category: String,
    /// Value in credits
    pub cred_value: u64,
}

/// A quest and the items it asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    /// Stable quest id
    pub id: String,
    /// Display name
    pub name: String,
    /// Required items (may be empty)
    pub required_items: Vec<QuestItem>,
}

/// An item reference inside a quest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestItem {
    /// Identifier as recorded: a display name, a slug or a `-recipe` id
    pub item_id: String,
    /// Display name of the referenced item, when the dataset embeds it
    pub item_name: Option<String>,
    /// Requested quantity
    pub quantity: Quantity,
}

/// Quest quantity as recorded in the dataset
///
/// Quest data stores quantities as numbers or strings. Anything that is not a
/// non-negative integer is kept verbatim and counts as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Quantity {
    /// Parsed count
    Count(u32),
    /// Present but not an integer
    Unparsed(String),
    /// No quantity recorded
    #[default]
    Missing,
}

impl Quantity {
    /// Parse a textual quantity
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(n) => Quantity::Count(n),
            Err(_) => Quantity::Unparsed(raw.to_string()),
        }
    }

    /// Amount contributed to totals (zero unless parsed)
    pub fn amount(&self) -> u32 {
        match self {
            Quantity::Count(n) => *n,
            Quantity::Unparsed(_) | Quantity::Missing => 0,
        }
    }
}

/// A craftable blueprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    /// Blueprint name
    pub name: String,
    /// Workshop that crafts it
    pub workshop: String,
    /// Workshop level required
    pub level: u32,
    /// Ordered ingredients
    pub crafting_recipe: Vec<RequirementEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_parse() {
        assert_eq!(Quantity::parse("4"), Quantity::Count(4));
        assert_eq!(Quantity::parse(" 12 "), Quantity::Count(12));
        assert_eq!(Quantity::parse("lots"), Quantity::Unparsed("lots".to_string()));
        assert_eq!(Quantity::parse("-3").amount(), 0);
        assert_eq!(Quantity::Missing.amount(), 0);
    }

    #[test]
    fn test_requirement_entry_matching() {
        let entry = RequirementEntry::new("Scrap Metal", 5);
        assert!(entry.is_for("scrap metal"));
        assert!(entry.is_for("SCRAP METAL"));
        assert!(!entry.is_for("Scrap"));
    }

    #[test]
    fn test_expedition_project() {
        let project = Project {
            id: EXPEDITION_PROJECT_ID.to_string(),
            name: "Expedition".to_string(),
            stages: Vec::new(),
        };
        assert!(project.is_expedition());
    }
}
