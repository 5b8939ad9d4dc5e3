//! Tier module - checkable units of progression

use std::fmt;

/// Family a tier belongs to
///
/// Tiers only cascade within one family. Station and project families are
/// scoped by their parent (station name, project id); the scrappy track is a
/// single family; quests never cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TierFamily {
    /// Station upgrade levels
    Station,
    /// Scrappy levels
    ScrappyLevel,
    /// Project stages
    ProjectStage,
    /// Quests
    Quest,
}

impl TierFamily {
    /// Get the family name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TierFamily::Station => "station",
            TierFamily::ScrappyLevel => "scrappy",
            TierFamily::ProjectStage => "project",
            TierFamily::Quest => "quest",
        }
    }

    /// Whether completing a tier implies the lower tiers
    pub fn is_ordered(&self) -> bool {
        !matches!(self, TierFamily::Quest)
    }
}

const SCRAPPY_PREFIX: &str = "scrappy_level_";
const PROJECT_PREFIX: &str = "project_";
const STAGE_INFIX: &str = "_stage_";
const QUEST_PREFIX: &str = "quest_";

/// Identity of one checklist tier
///
/// The storage form is a flat string (`"{station}_{level}"`,
/// `"scrappy_level_{level}"`, `"project_{id}_stage_{stage}"`,
/// `"quest_{id}"`) produced by [`TierKey::storage_key`] and read back by
/// [`TierKey::parse`]. Everything else works on the tagged form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TierKey {
    /// A station upgrade level
    Station {
        /// Station name
        station: String,
        /// Level number
        level: u32,
    },
    /// A scrappy level
    ScrappyLevel {
        /// Level number
        level: u32,
    },
    /// A project stage
    ProjectStage {
        /// Project id
        project_id: String,
        /// Stage number
        stage: u32,
    },
    /// A quest
    Quest {
        /// Quest id
        quest_id: String,
    },
}

impl TierKey {
    /// Station level key
    pub fn station(station: impl Into<String>, level: u32) -> Self {
        TierKey::Station {
            station: station.into(),
            level,
        }
    }

    /// Scrappy level key
    pub fn scrappy(level: u32) -> Self {
        TierKey::ScrappyLevel { level }
    }

    /// Project stage key
    pub fn project_stage(project_id: impl Into<String>, stage: u32) -> Self {
        TierKey::ProjectStage {
            project_id: project_id.into(),
            stage,
        }
    }

    /// Quest key
    pub fn quest(quest_id: impl Into<String>) -> Self {
        TierKey::Quest {
            quest_id: quest_id.into(),
        }
    }

    /// Family of this tier
    pub fn family(&self) -> TierFamily {
        match self {
            TierKey::Station { .. } => TierFamily::Station,
            TierKey::ScrappyLevel { .. } => TierFamily::ScrappyLevel,
            TierKey::ProjectStage { .. } => TierFamily::ProjectStage,
            TierKey::Quest { .. } => TierFamily::Quest,
        }
    }

    /// Position within the family, `None` for quests
    pub fn ordinal(&self) -> Option<u32> {
        match self {
            TierKey::Station { level, .. } => Some(*level),
            TierKey::ScrappyLevel { level } => Some(*level),
            TierKey::ProjectStage { stage, .. } => Some(*stage),
            TierKey::Quest { .. } => None,
        }
    }

    /// True if both keys belong to the same cascading track
    pub fn same_track(&self, other: &TierKey) -> bool {
        match (self, other) {
            (TierKey::Station { station: a, .. }, TierKey::Station { station: b, .. }) => a == b,
            (TierKey::ScrappyLevel { .. }, TierKey::ScrappyLevel { .. }) => true,
            (
                TierKey::ProjectStage { project_id: a, .. },
                TierKey::ProjectStage { project_id: b, .. },
            ) => a == b,
            _ => false,
        }
    }

    /// Flat string form used at the persistence boundary
    pub fn storage_key(&self) -> String {
        match self {
            TierKey::Station { station, level } => format!("{}_{}", station, level),
            TierKey::ScrappyLevel { level } => format!("{}{}", SCRAPPY_PREFIX, level),
            TierKey::ProjectStage { project_id, stage } => {
                format!("{}{}{}{}", PROJECT_PREFIX, project_id, STAGE_INFIX, stage)
            }
            TierKey::Quest { quest_id } => format!("{}{}", QUEST_PREFIX, quest_id),
        }
    }

    /// Parse the flat string form
    ///
    /// Prefixed families are tried first. Anything else is a station key,
    /// split on the last underscore since station names may contain
    /// underscores but level numbers never do.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(rest) = s.strip_prefix(SCRAPPY_PREFIX) {
            if let Ok(level) = rest.parse() {
                return Some(TierKey::ScrappyLevel { level });
            }
        }

        if let Some(rest) = s.strip_prefix(PROJECT_PREFIX) {
            if let Some(idx) = rest.rfind(STAGE_INFIX) {
                let (project_id, stage) = (&rest[..idx], &rest[idx + STAGE_INFIX.len()..]);
                if !project_id.is_empty() {
                    if let Ok(stage) = stage.parse() {
                        return Some(TierKey::project_stage(project_id, stage));
                    }
                }
            }
        }

        if let Some(quest_id) = s.strip_prefix(QUEST_PREFIX) {
            if !quest_id.is_empty() {
                return Some(TierKey::quest(quest_id));
            }
        }

        let idx = s.rfind('_')?;
        let (station, level) = (&s[..idx], &s[idx + 1..]);
        if station.is_empty() {
            return None;
        }
        level.parse().ok().map(|level| TierKey::station(station, level))
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

impl std::str::FromStr for TierKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier key: {}", s))
    }
}
