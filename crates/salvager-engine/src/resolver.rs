//! Requirement resolution
//!
//! Linear scans over each dataset, collecting every requirement that names
//! the item. Results keep dataset declaration order.

use crate::error::EngineError;
use crate::identity::IdentityResolver;
use salvager_domain::{
    BlueprintUsage, Datasets, ProjectRequirement, QuestRequirement, Requirements,
    ScrappyRequirement, StationRequirement, TierKey,
};

/// Finds every place an item is required
#[derive(Debug, Clone, Copy)]
pub struct RequirementResolver<'a> {
    datasets: &'a Datasets,
    identity: IdentityResolver<'a>,
}

impl<'a> RequirementResolver<'a> {
    /// Create a resolver over the datasets
    pub fn new(datasets: &'a Datasets) -> Self {
        Self {
            datasets,
            identity: IdentityResolver::new(&datasets.catalog),
        }
    }

    /// Collect all requirements for `item_name`
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyItemName`] for a blank name.
    pub fn find_requirements(&self, item_name: &str) -> Result<Requirements, EngineError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(EngineError::EmptyItemName);
        }

        Ok(self.collect(item_name))
    }

    /// Every requirement family for an already trimmed, non-blank name
    pub fn collect(&self, item_name: &str) -> Requirements {
        Requirements {
            stations: self.stations(item_name),
            scrappy: self.scrappy(item_name),
            projects: self.projects(item_name),
            quests: self.quests(item_name),
            blueprints: self.blueprints(item_name),
        }
    }

    /// Station upgrade requirements for the item
    pub fn stations(&self, item_name: &str) -> Vec<StationRequirement> {
        let mut found = Vec::new();
        for station in &self.datasets.stations {
            for level in &station.levels {
                for req in level.requirements.iter().filter(|r| r.is_for(item_name)) {
                    found.push(StationRequirement {
                        station: station.name.clone(),
                        level: level.level,
                        amount: req.amount,
                    });
                }
            }
        }
        found
    }

    /// Scrappy level requirements for the item
    pub fn scrappy(&self, item_name: &str) -> Vec<ScrappyRequirement> {
        let mut found = Vec::new();
        for level in &self.datasets.scrappy {
            for req in level.requirements.iter().filter(|r| r.is_for(item_name)) {
                found.push(ScrappyRequirement {
                    level: level.level,
                    title: level.title.clone(),
                    amount: req.amount,
                });
            }
        }
        found
    }

    /// Project stage requirements for the item
    ///
    /// Category-value requirements are never item requirements and are
    /// skipped.
    pub fn projects(&self, item_name: &str) -> Vec<ProjectRequirement> {
        let mut found = Vec::new();
        for project in &self.datasets.projects {
            for stage in &project.stages {
                for req in stage.requirements.iter().filter(|r| r.is_for(item_name)) {
                    found.push(ProjectRequirement {
                        project_id: project.id.clone(),
                        project_name: project.name.clone(),
                        stage: stage.stage,
                        stage_title: stage.title.clone(),
                        amount: req.amount,
                    });
                }
            }
        }
        found
    }

    /// Quest requirements for the item
    pub fn quests(&self, item_name: &str) -> Vec<QuestRequirement> {
        let mut found = Vec::new();
        for quest in &self.datasets.quests {
            for item in quest
                .required_items
                .iter()
                .filter(|i| self.identity.quest_item_matches(i, item_name))
            {
                found.push(QuestRequirement {
                    quest_id: quest.id.clone(),
                    quest_name: quest.name.clone(),
                    item_ref: item.item_id.clone(),
                    quantity: item.quantity.clone(),
                });
            }
        }
        found
    }

    /// Blueprints that use the item as an ingredient
    pub fn blueprints(&self, item_name: &str) -> Vec<BlueprintUsage> {
        let mut found = Vec::new();
        for blueprint in &self.datasets.blueprints {
            for ingredient in blueprint
                .crafting_recipe
                .iter()
                .filter(|r| r.is_for(item_name))
            {
                found.push(BlueprintUsage {
                    blueprint: blueprint.name.clone(),
                    workshop: blueprint.workshop.clone(),
                    level: blueprint.level,
                    amount: ingredient.amount,
                });
            }
        }
        found
    }

    /// Whether the tier has a requirement entry for the item
    ///
    /// Tiers that are not in the datasets require nothing.
    pub fn tier_requires(&self, key: &TierKey, item_name: &str) -> bool {
        match key {
            TierKey::Station { station, level } => self
                .datasets
                .station(station)
                .into_iter()
                .flat_map(|s| s.levels.iter().filter(|l| l.level == *level))
                .any(|l| l.requirements.iter().any(|r| r.is_for(item_name))),
            TierKey::ScrappyLevel { level } => self
                .datasets
                .scrappy
                .iter()
                .filter(|s| s.level == *level)
                .any(|s| s.requirements.iter().any(|r| r.is_for(item_name))),
            TierKey::ProjectStage { project_id, stage } => self
                .datasets
                .project(project_id)
                .into_iter()
                .flat_map(|p| p.stages.iter().filter(|s| s.stage == *stage))
                .any(|s| s.requirements.iter().any(|r| r.is_for(item_name))),
            TierKey::Quest { quest_id } => self.datasets.quest(quest_id).is_some_and(|q| {
                q.required_items
                    .iter()
                    .any(|i| self.identity.quest_item_matches(i, item_name))
            }),
        }
    }
}
