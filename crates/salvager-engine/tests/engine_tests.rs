//! Integration tests for salvager-engine
//!
//! These tests drive the full search → totals → checklist cycle through
//! `LookupEngine`.

use proptest::prelude::*;
use salvager_domain::{
    Blueprint, Catalog, Datasets, Item, MemoryChecklistStore, Project, ProjectStage, Quantity,
    Quest, QuestItem, RequirementEntry, ScrappyLevel, SearchOutcome, Station, StationLevel,
    TierKey,
};
use salvager_engine::{adjusted_total, original_total, ChecklistState, LookupEngine};

fn datasets() -> Datasets {
    Datasets {
        catalog: Catalog::new(vec![
            Item::new("Accordion"),
            Item::new("Pulse Unit"),
            Item::new("Rusted Gear"),
            Item::new("Scrap Metal"),
        ]),
        stations: vec![Station {
            name: "Refiner".to_string(),
            levels: vec![
                StationLevel {
                    level: 1,
                    requirements: vec![RequirementEntry::new("Rusted Gear", 2)],
                },
                StationLevel {
                    level: 2,
                    requirements: vec![RequirementEntry::new("Scrap Metal", 5)],
                },
                StationLevel {
                    level: 3,
                    requirements: vec![RequirementEntry::new("Scrap Metal", 8)],
                },
            ],
        }],
        scrappy: (1..=4)
            .map(|level| ScrappyLevel {
                level,
                title: format!("Level {}", level),
                requirements: if level == 4 {
                    vec![RequirementEntry::new("Scrap Metal", 3)]
                } else {
                    Vec::new()
                },
            })
            .collect(),
        projects: vec![Project {
            id: "expedition".to_string(),
            name: "Expedition".to_string(),
            stages: vec![ProjectStage {
                stage: 1,
                title: "Foundation".to_string(),
                description: Some("Lay the groundwork".to_string()),
                requirements: vec![RequirementEntry::new("Rusted Gear", 10)],
                category_requirements: Vec::new(),
            }],
        }],
        quests: vec![Quest {
            id: "Q1".to_string(),
            name: "Power Up".to_string(),
            required_items: vec![QuestItem {
                item_id: "pulse-unit-recipe".to_string(),
                item_name: None,
                quantity: Quantity::parse("4"),
            }],
        }],
        blueprints: vec![Blueprint {
            name: "Heavy Frame".to_string(),
            workshop: "Gunsmith".to_string(),
            level: 2,
            crafting_recipe: vec![RequirementEntry::new("Accordion", 1)],
        }],
    }
}

fn engine() -> LookupEngine<MemoryChecklistStore> {
    LookupEngine::new(datasets(), MemoryChecklistStore::new()).unwrap()
}

#[test]
fn test_scrap_metal_scenario() {
    let mut engine = engine();
    let result = engine.search("Scrap Metal").unwrap();
    assert_eq!(engine.original_total(&result), 16);
    assert_eq!(engine.adjusted_total(&result), 16);

    engine.toggle(&TierKey::station("Refiner", 2)).unwrap();
    assert_eq!(engine.adjusted_total(&result), 11);

    engine.toggle(&TierKey::station("Refiner", 3)).unwrap();
    assert!(engine.is_complete(&TierKey::station("Refiner", 2)));
    assert_eq!(engine.adjusted_total(&result), 3);

    engine.toggle(&TierKey::scrappy(4)).unwrap();
    let totals = engine.totals(&result);
    assert_eq!(totals.adjusted, 0);
    assert!(totals.all_collected());
}

#[test]
fn test_unknown_item() {
    let engine = engine();
    let result = engine.search("Golden Teapot").unwrap();
    assert_eq!(result.name, "Golden Teapot");
    assert!(!result.in_catalog());
    assert_eq!(result.outcome(), SearchOutcome::NotInCatalog);
    assert!(result.requirements.stations.is_empty());
    assert!(result.requirements.scrappy.is_empty());
    assert!(result.requirements.projects.is_empty());
    assert!(result.requirements.quests.is_empty());
    assert_eq!(engine.original_total(&result), 0);
}

#[test]
fn test_referenced_but_uncatalogued_item() {
    let mut data = datasets();
    data.stations[0].levels[0]
        .requirements
        .push(RequirementEntry::new("Mystery Alloy", 7));
    let engine = LookupEngine::new(data, MemoryChecklistStore::new()).unwrap();

    let result = engine.search("mystery alloy").unwrap();
    assert_eq!(result.outcome(), SearchOutcome::NotInCatalog);
    assert_eq!(result.requirements.stations.len(), 1);
    assert_eq!(engine.original_total(&result), 7);
}

#[test]
fn test_quest_recipe_id_contributes_parsed_quantity() {
    let engine = engine();
    let result = engine.search("Pulse Unit").unwrap();
    assert_eq!(result.requirements.quests.len(), 1);
    assert_eq!(result.requirements.quests[0].quest_id, "Q1");
    assert_eq!(engine.original_total(&result), 4);
}

#[test]
fn test_blueprint_only_item() {
    let engine = engine();
    let result = engine.search("accordion").unwrap();
    assert_eq!(result.name, "Accordion");
    assert_eq!(result.outcome(), SearchOutcome::Referenced);
    assert_eq!(result.requirements.blueprints.len(), 1);
    assert_eq!(engine.original_total(&result), 0);
}

#[test]
fn test_blank_search() {
    let engine = engine();
    assert!(engine.search("   ").is_none());
}

#[test]
fn test_padded_search_finds_requirements() {
    let engine = engine();
    let result = engine.search("  Scrap Metal\t").unwrap();
    assert_eq!(result.name, "Scrap Metal");
    assert_eq!(engine.original_total(&result), 16);
}

#[test]
fn test_resolve_is_case_insensitive() {
    let engine = engine();
    assert_eq!(engine.resolve("ACCORDION"), engine.resolve("accordion"));
    assert_eq!(engine.resolve("Accordion"), Some("Accordion"));
}

#[test]
fn test_tiers_completed_for_item() {
    let mut engine = engine();
    assert!(!engine.tiers_completed_for_item("Pulse Unit"));
    engine.toggle(&TierKey::quest("Q1")).unwrap();
    assert!(engine.tiers_completed_for_item("Pulse Unit"));
    assert!(!engine.tiers_completed_for_item("Rusted Gear"));
}

#[test]
fn test_checklist_survives_reload() {
    let mut engine = engine();
    engine.toggle(&TierKey::project_stage("expedition", 1)).unwrap();
    let saved = engine.store().entries().clone();

    let reloaded =
        LookupEngine::new(datasets(), MemoryChecklistStore::with_entries(saved)).unwrap();
    let result = reloaded.search("Rusted Gear").unwrap();
    assert_eq!(reloaded.original_total(&result), 12);
    assert_eq!(reloaded.adjusted_total(&result), 2);
}

#[test]
fn test_missing_datasets_degrade_to_no_requirements() {
    let data = Datasets {
        catalog: Catalog::new(vec![Item::new("Scrap Metal")]),
        ..Default::default()
    };
    let engine = LookupEngine::new(data, MemoryChecklistStore::new()).unwrap();
    let result = engine.search("Scrap Metal").unwrap();
    assert_eq!(result.outcome(), SearchOutcome::Unreferenced);
}

fn any_tier() -> impl Strategy<Value = TierKey> {
    prop_oneof![
        (1u32..=3).prop_map(|level| TierKey::station("Refiner", level)),
        (1u32..=4).prop_map(TierKey::scrappy),
        Just(TierKey::project_stage("expedition", 1)),
        Just(TierKey::quest("Q1")),
        Just(TierKey::station("Demolished Bench", 1)),
    ]
}

proptest! {
    #[test]
    fn adjusted_never_exceeds_original(
        toggles in proptest::collection::vec(any_tier(), 0..12),
        item in prop_oneof![
            Just("Scrap Metal"),
            Just("Rusted Gear"),
            Just("Pulse Unit"),
            Just("Accordion"),
        ],
    ) {
        let mut engine = engine();
        for key in &toggles {
            engine.toggle(key).unwrap();
        }
        let result = engine.search(item).unwrap();
        prop_assert!(engine.adjusted_total(&result) <= engine.original_total(&result));
        prop_assert_eq!(
            adjusted_total(&result.requirements, &ChecklistState::new()),
            original_total(&result.requirements)
        );
    }

    #[test]
    fn checked_tier_implies_lower_tiers(toggles in proptest::collection::vec(any_tier(), 0..12)) {
        let mut engine = engine();
        for key in &toggles {
            engine.toggle(key).unwrap();
        }
        for level in 2..=3u32 {
            if engine.is_complete(&TierKey::station("Refiner", level)) {
                prop_assert!(engine.is_complete(&TierKey::station("Refiner", level - 1)));
            }
        }
        for level in 2..=4u32 {
            if engine.is_complete(&TierKey::scrappy(level)) {
                prop_assert!(engine.is_complete(&TierKey::scrappy(level - 1)));
            }
        }
    }
}
