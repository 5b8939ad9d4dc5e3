//! Aggregation of requirement amounts
//!
//! Original total = station + scrappy + project + quest amounts.
//! Adjusted total = the same, minus everything owned by a completed tier.
//! Blueprint usages never count.

use crate::checklist::ChecklistState;
use salvager_domain::{Requirements, TieredRequirement};

/// Sum of all tiered requirement amounts
pub fn original_total(requirements: &Requirements) -> u64 {
    requirements
        .tiered()
        .map(|r| u64::from(r.amount()))
        .sum()
}

/// Sum of amounts whose tier is not completed
pub fn adjusted_total(requirements: &Requirements, checklist: &ChecklistState) -> u64 {
    requirements
        .tiered()
        .filter(|r| !checklist.is_complete(&r.tier_key()))
        .map(|r| u64::from(r.amount()))
        .sum()
}

/// Original and adjusted amounts for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Sum ignoring the checklist
    pub original: u64,
    /// Sum excluding completed tiers
    pub remaining: u64,
}

impl CategoryTotal {
    fn of<'a, R, I>(requirements: I, checklist: &ChecklistState) -> Self
    where
        R: TieredRequirement + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut total = Self::default();
        for req in requirements {
            let amount = u64::from(req.amount());
            total.original += amount;
            if !checklist.is_complete(&req.tier_key()) {
                total.remaining += amount;
            }
        }
        total
    }
}

/// Totals for a search result, with a per-category breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Total ignoring the checklist
    pub original: u64,
    /// Total after completed tiers are excluded
    pub adjusted: u64,
    /// Station upgrades
    pub stations: CategoryTotal,
    /// Scrappy levels
    pub scrappy: CategoryTotal,
    /// Project stages
    pub projects: CategoryTotal,
    /// Quests
    pub quests: CategoryTotal,
}

impl Totals {
    /// Compute totals against the current checklist
    pub fn compute(requirements: &Requirements, checklist: &ChecklistState) -> Self {
        let stations = CategoryTotal::of(&requirements.stations, checklist);
        let scrappy = CategoryTotal::of(&requirements.scrappy, checklist);
        let projects = CategoryTotal::of(&requirements.projects, checklist);
        let quests = CategoryTotal::of(&requirements.quests, checklist);
        let parts = [stations, scrappy, projects, quests];

        Self {
            original: parts.iter().map(|p| p.original).sum(),
            adjusted: parts.iter().map(|p| p.remaining).sum(),
            stations,
            scrappy,
            projects,
            quests,
        }
    }

    /// Everything was needed once and every owning tier is now done
    pub fn all_collected(&self) -> bool {
        self.adjusted == 0 && self.original > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salvager_domain::{
        BlueprintUsage, Quantity, QuestRequirement, ScrappyRequirement, StationRequirement,
        TierKey,
    };

    fn scrap_metal() -> Requirements {
        Requirements {
            stations: vec![
                StationRequirement {
                    station: "Refiner".to_string(),
                    level: 2,
                    amount: 5,
                },
                StationRequirement {
                    station: "Refiner".to_string(),
                    level: 3,
                    amount: 8,
                },
            ],
            scrappy: vec![ScrappyRequirement {
                level: 4,
                title: "Scavenger".to_string(),
                amount: 3,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_original_total() {
        assert_eq!(original_total(&scrap_metal()), 16);
    }

    #[test]
    fn test_empty_checklist_deducts_nothing() {
        let reqs = scrap_metal();
        assert_eq!(adjusted_total(&reqs, &ChecklistState::new()), original_total(&reqs));
    }

    #[test]
    fn test_completed_tiers_are_excluded() {
        let reqs = scrap_metal();
        let mut checklist = ChecklistState::new();
        checklist.set(TierKey::station("Refiner", 2), true);
        assert_eq!(adjusted_total(&reqs, &checklist), 11);

        checklist.set(TierKey::station("Refiner", 3), true);
        let totals = Totals::compute(&reqs, &checklist);
        assert_eq!(totals.adjusted, 3);
        assert_eq!(totals.stations.remaining, 0);
        assert_eq!(totals.scrappy.remaining, 3);
        assert!(!totals.all_collected());

        checklist.set(TierKey::scrappy(4), true);
        assert!(Totals::compute(&reqs, &checklist).all_collected());
    }

    #[test]
    fn test_blueprints_never_count() {
        let reqs = Requirements {
            blueprints: vec![BlueprintUsage {
                blueprint: "Heavy Frame".to_string(),
                workshop: "Gunsmith".to_string(),
                level: 2,
                amount: 12,
            }],
            ..Default::default()
        };
        let totals = Totals::compute(&reqs, &ChecklistState::new());
        assert_eq!(totals.original, 0);
        assert!(!totals.all_collected());
    }

    #[test]
    fn test_malformed_quest_quantity_counts_zero() {
        let reqs = Requirements {
            quests: vec![
                QuestRequirement {
                    quest_id: "q1".to_string(),
                    quest_name: "One".to_string(),
                    item_ref: "pulse-unit".to_string(),
                    quantity: Quantity::parse("4"),
                },
                QuestRequirement {
                    quest_id: "q2".to_string(),
                    quest_name: "Two".to_string(),
                    item_ref: "pulse-unit".to_string(),
                    quantity: Quantity::parse("a few"),
                },
            ],
            ..Default::default()
        };
        assert_eq!(original_total(&reqs), 4);
    }
}
