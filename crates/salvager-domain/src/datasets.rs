//! The full set of static collections the engine reads

use crate::item::Catalog;
use crate::progression::{Blueprint, Project, Quest, ScrappyLevel, Station};
use crate::tier::TierKey;

/// Immutable, load-time-fixed datasets
///
/// Any collection may be empty; an empty collection simply yields no
/// requirements for its category.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    /// Item catalog
    pub catalog: Catalog,
    /// Crafting stations
    pub stations: Vec<Station>,
    /// Scrappy levels
    pub scrappy: Vec<ScrappyLevel>,
    /// Projects (expedition included)
    pub projects: Vec<Project>,
    /// Quests
    pub quests: Vec<Quest>,
    /// Blueprints
    pub blueprints: Vec<Blueprint>,
}

impl Datasets {
    /// Find a station by exact name
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Find a project by id
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Find a quest by id
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Whether the tier exists in the current datasets
    pub fn contains_tier(&self, key: &TierKey) -> bool {
        match key {
            TierKey::Station { station, level } => self
                .station(station)
                .is_some_and(|s| s.levels.iter().any(|l| l.level == *level)),
            TierKey::ScrappyLevel { level } => self.scrappy.iter().any(|s| s.level == *level),
            TierKey::ProjectStage { project_id, stage } => self
                .project(project_id)
                .is_some_and(|p| p.stages.iter().any(|s| s.stage == *stage)),
            TierKey::Quest { quest_id } => self.quest(quest_id).is_some(),
        }
    }

    /// Every tier on the same cascading track as `key`, in dataset order
    ///
    /// Quests have no track, so the result is empty for them.
    pub fn track_of(&self, key: &TierKey) -> Vec<TierKey> {
        match key {
            TierKey::Station { station, .. } => self
                .station(station)
                .map(|s| {
                    s.levels
                        .iter()
                        .map(|l| TierKey::station(s.name.clone(), l.level))
                        .collect()
                })
                .unwrap_or_default(),
            TierKey::ScrappyLevel { .. } => {
                self.scrappy.iter().map(|s| TierKey::scrappy(s.level)).collect()
            }
            TierKey::ProjectStage { project_id, .. } => self
                .project(project_id)
                .map(|p| {
                    p.stages
                        .iter()
                        .map(|s| TierKey::project_stage(p.id.clone(), s.stage))
                        .collect()
                })
                .unwrap_or_default(),
            TierKey::Quest { .. } => Vec::new(),
        }
    }
}
