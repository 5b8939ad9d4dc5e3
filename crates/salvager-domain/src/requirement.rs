//! Requirement records and search results

use crate::item::Item;
use crate::progression::Quantity;
use crate::tier::TierKey;

/// A requirement that belongs to a checkable tier and counts toward totals
///
/// Blueprint usages deliberately do not implement this trait.
pub trait TieredRequirement {
    /// Tier that owns this requirement
    fn tier_key(&self) -> TierKey;

    /// Amount contributed to totals
    fn amount(&self) -> u32;
}

/// Item required by a station upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRequirement {
    /// Station name
    pub station: String,
    /// Level number
    pub level: u32,
    /// Amount required
    pub amount: u32,
}

impl TieredRequirement for StationRequirement {
    fn tier_key(&self) -> TierKey {
        TierKey::station(self.station.clone(), self.level)
    }

    fn amount(&self) -> u32 {
        self.amount
    }
}

/// Item required by a scrappy level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrappyRequirement {
    /// Level number
    pub level: u32,
    /// Level title
    pub title: String,
    /// Amount required
    pub amount: u32,
}

impl TieredRequirement for ScrappyRequirement {
    fn tier_key(&self) -> TierKey {
        TierKey::scrappy(self.level)
    }

    fn amount(&self) -> u32 {
        self.amount
    }
}

/// Item required by a project stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequirement {
    /// Project id
    pub project_id: String,
    /// Project display name
    pub project_name: String,
    /// Stage number
    pub stage: u32,
    /// Stage title
    pub stage_title: String,
    /// Amount required
    pub amount: u32,
}

impl TieredRequirement for ProjectRequirement {
    fn tier_key(&self) -> TierKey {
        TierKey::project_stage(self.project_id.clone(), self.stage)
    }

    fn amount(&self) -> u32 {
        self.amount
    }
}

/// Item requested by a quest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRequirement {
    /// Quest id
    pub quest_id: String,
    /// Quest display name
    pub quest_name: String,
    /// Item reference as recorded by the quest
    pub item_ref: String,
    /// Requested quantity
    pub quantity: Quantity,
}

impl TieredRequirement for QuestRequirement {
    fn tier_key(&self) -> TierKey {
        TierKey::quest(self.quest_id.clone())
    }

    fn amount(&self) -> u32 {
        self.quantity.amount()
    }
}

/// Item used as a blueprint ingredient (informational only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueprintUsage {
    /// Blueprint name
    pub blueprint: String,
    /// Workshop that crafts it
    pub workshop: String,
    /// Workshop level
    pub level: u32,
    /// Amount per craft
    pub amount: u32,
}

/// Everywhere an item is required, in dataset declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Station upgrades
    pub stations: Vec<StationRequirement>,
    /// Scrappy levels
    pub scrappy: Vec<ScrappyRequirement>,
    /// Project stages
    pub projects: Vec<ProjectRequirement>,
    /// Quests
    pub quests: Vec<QuestRequirement>,
    /// Blueprint recipes
    pub blueprints: Vec<BlueprintUsage>,
}

impl Requirements {
    /// True when no category, blueprints included, references the item
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
            && self.scrappy.is_empty()
            && self.projects.is_empty()
            && self.quests.is_empty()
            && self.blueprints.is_empty()
    }

    /// All requirements that count toward totals
    pub fn tiered(&self) -> impl Iterator<Item = &dyn TieredRequirement> {
        self.stations
            .iter()
            .map(|r| r as &dyn TieredRequirement)
            .chain(self.scrappy.iter().map(|r| r as &dyn TieredRequirement))
            .chain(self.projects.iter().map(|r| r as &dyn TieredRequirement))
            .chain(self.quests.iter().map(|r| r as &dyn TieredRequirement))
    }
}

/// How a search should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Term is not a catalog item (requirements may still exist)
    NotInCatalog,
    /// Catalog item, referenced nowhere
    Unreferenced,
    /// Catalog item with at least one requirement or blueprint usage
    Referenced,
}

/// Result of a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Canonical name, or the trimmed term when unresolved
    pub name: String,
    /// Catalog entry, if the term resolved
    pub item: Option<Item>,
    /// Requirement lists
    pub requirements: Requirements,
}

impl SearchResult {
    /// True when the term resolved to a catalog item
    pub fn in_catalog(&self) -> bool {
        self.item.is_some()
    }

    /// Classify the result for display
    pub fn outcome(&self) -> SearchOutcome {
        match (&self.item, self.requirements.is_empty()) {
            (None, _) => SearchOutcome::NotInCatalog,
            (Some(_), true) => SearchOutcome::Unreferenced,
            (Some(_), false) => SearchOutcome::Referenced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_keys() {
        let req = StationRequirement {
            station: "Refiner".to_string(),
            level: 2,
            amount: 5,
        };
        assert_eq!(req.tier_key(), TierKey::station("Refiner", 2));

        let quest = QuestRequirement {
            quest_id: "q1".to_string(),
            quest_name: "First Steps".to_string(),
            item_ref: "pulse-unit-recipe".to_string(),
            quantity: Quantity::Unparsed("some".to_string()),
        };
        assert_eq!(quest.tier_key(), TierKey::quest("q1"));
        assert_eq!(quest.amount(), 0);
    }

    #[test]
    fn test_tiered_skips_blueprints() {
        let requirements = Requirements {
            blueprints: vec![BlueprintUsage {
                blueprint: "Anvil".to_string(),
                workshop: "Gunsmith".to_string(),
                level: 1,
                amount: 6,
            }],
            ..Default::default()
        };
        assert!(!requirements.is_empty());
        assert_eq!(requirements.tiered().count(), 0);
    }

    #[test]
    fn test_outcome() {
        let mut result = SearchResult {
            name: "Accordion".to_string(),
            item: None,
            requirements: Requirements::default(),
        };
        assert_eq!(result.outcome(), SearchOutcome::NotInCatalog);

        result.item = Some(Item::new("Accordion"));
        assert_eq!(result.outcome(), SearchOutcome::Unreferenced);

        result.requirements.scrappy.push(ScrappyRequirement {
            level: 1,
            title: "Fledgling".to_string(),
            amount: 2,
        });
        assert_eq!(result.outcome(), SearchOutcome::Referenced);
    }
}
