//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use salvager_catalog::MergeReport;
use salvager_domain::{
    Quantity, Requirements, SearchOutcome, SearchResult, TierKey, TieredRequirement,
};
use salvager_engine::{CategoryTotal, ChecklistState, ToggleOutcome, Totals};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a search result with its totals.
    ///
    /// `tiers_completed` is set when a checked-off tier already used the item.
    pub fn format_search(
        &self,
        result: &SearchResult,
        totals: &Totals,
        checklist: &ChecklistState,
        tiers_completed: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                self.format_search_json(result, totals, checklist, tiers_completed)
            }
            OutputFormat::Table => Ok(self.format_search_table(
                result,
                totals,
                checklist,
                tiers_completed,
            )),
            OutputFormat::Quiet => Ok(totals.adjusted.to_string()),
        }
    }

    fn format_search_json(
        &self,
        result: &SearchResult,
        totals: &Totals,
        checklist: &ChecklistState,
        tiers_completed: bool,
    ) -> Result<String> {
        let tier = |key: TierKey| {
            json!({
                "key": key.storage_key(),
                "complete": checklist.is_complete(&key),
            })
        };
        let reqs = &result.requirements;

        let value = json!({
            "name": result.name,
            "outcome": outcome_label(result.outcome()),
            "item": result.item.as_ref().map(|item| json!({
                "image": item.image,
                "safe_to_recycle": item.safe_to_recycle,
                "keep_for_quests": item.keep_for_quests.map(|k| json!({ "amount": k.amount })),
                "keep_for_projects": item.keep_for_projects.map(|k| json!({ "amount": k.amount })),
            })),
            "stations": reqs.stations.iter().map(|r| json!({
                "station": r.station,
                "level": r.level,
                "amount": r.amount,
                "tier": tier(r.tier_key()),
            })).collect::<Vec<_>>(),
            "scrappy": reqs.scrappy.iter().map(|r| json!({
                "level": r.level,
                "title": r.title,
                "amount": r.amount,
                "tier": tier(r.tier_key()),
            })).collect::<Vec<_>>(),
            "projects": reqs.projects.iter().map(|r| json!({
                "project_id": r.project_id,
                "project_name": r.project_name,
                "stage": r.stage,
                "stage_title": r.stage_title,
                "amount": r.amount,
                "tier": tier(r.tier_key()),
            })).collect::<Vec<_>>(),
            "quests": reqs.quests.iter().map(|r| json!({
                "quest_id": r.quest_id,
                "quest_name": r.quest_name,
                "item_ref": r.item_ref,
                "quantity": quantity_json(&r.quantity),
                "tier": tier(r.tier_key()),
            })).collect::<Vec<_>>(),
            "blueprints": reqs.blueprints.iter().map(|b| json!({
                "blueprint": b.blueprint,
                "workshop": b.workshop,
                "level": b.level,
                "amount": b.amount,
            })).collect::<Vec<_>>(),
            "totals": {
                "original": totals.original,
                "adjusted": totals.adjusted,
                "stations": category_json(&totals.stations),
                "scrappy": category_json(&totals.scrappy),
                "projects": category_json(&totals.projects),
                "quests": category_json(&totals.quests),
            },
            "tiers_completed": tiers_completed,
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_search_table(
        &self,
        result: &SearchResult,
        totals: &Totals,
        checklist: &ChecklistState,
        tiers_completed: bool,
    ) -> String {
        let mut sections = Vec::new();

        match result.outcome() {
            SearchOutcome::NotInCatalog => sections.push(self.warning(&format!(
                "'{}' is not in the item catalog",
                result.name
            ))),
            SearchOutcome::Unreferenced => {
                sections.push(self.info(&format!("{} is not required anywhere", result.name)))
            }
            SearchOutcome::Referenced => sections.push(self.colorize(&result.name, "cyan")),
        }

        if let Some(item) = &result.item {
            let mut flags = Vec::new();
            if item.safe_to_recycle {
                flags.push("safe to recycle".to_string());
            }
            if let Some(keep) = item.keep_for_projects {
                flags.push(keep_label("keep for projects", keep.amount));
            }
            if let Some(keep) = item.keep_for_quests {
                flags.push(keep_label("keep for quests", keep.amount));
            }
            if !flags.is_empty() {
                sections.push(format!("Flags: {}", flags.join(", ")));
            }
        }

        if let Some(table) = tier_table(&result.requirements, checklist) {
            sections.push(table);
        }
        if let Some(table) = blueprint_table(&result.requirements) {
            sections.push(table);
        }

        if tiers_completed {
            sections.push(self.info("Some tiers that used this item are already completed"));
        }

        if totals.original > 0 {
            let line = format!("Still needed: {} of {}", totals.adjusted, totals.original);
            if totals.all_collected() {
                sections.push(self.success(&format!("{} (all collected)", line)));
            } else {
                sections.push(line);
            }
        } else if !result.requirements.is_empty() || result.in_catalog() {
            sections.push("Still needed: 0".to_string());
        } else {
            sections.push(self.info("No requirements found"));
        }

        sections.join("\n\n")
    }

    /// Format autocomplete suggestions.
    pub fn format_suggestions(&self, suggestions: &[&str]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(suggestions)?),
            OutputFormat::Quiet => Ok(suggestions.join("\n")),
            OutputFormat::Table => {
                if suggestions.is_empty() {
                    return Ok(self.colorize("No matching items.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Item"]);
                for name in suggestions {
                    builder.push_record([*name]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format the completed checklist tiers.
    pub fn format_checklist(&self, checklist: &ChecklistState) -> Result<String> {
        let completed: Vec<&TierKey> = checklist.completed().collect();

        match self.format {
            OutputFormat::Json => {
                let keys: Vec<String> = completed.iter().map(|k| k.storage_key()).collect();
                Ok(serde_json::to_string_pretty(&keys)?)
            }
            OutputFormat::Quiet => Ok(completed
                .iter()
                .map(|k| k.storage_key())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if completed.is_empty() {
                    return Ok(self.colorize("No completed tiers.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Family", "Key"]);
                for key in completed {
                    builder.push_record([key.family().as_str().to_string(), key.storage_key()]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format the result of a toggle.
    pub fn format_toggle(&self, key: &TierKey, outcome: &ToggleOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "key": key.storage_key(),
                    "complete": outcome.now_complete,
                    "changed": outcome.changed.iter().map(TierKey::storage_key).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(outcome.now_complete.to_string()),
            OutputFormat::Table => {
                let state = if outcome.now_complete {
                    "complete"
                } else {
                    "incomplete"
                };
                let mut message = self.success(&format!("{} marked {}", key, state));
                let cascaded: Vec<String> = outcome
                    .changed
                    .iter()
                    .filter(|k| *k != key)
                    .map(TierKey::storage_key)
                    .collect();
                if !cascaded.is_empty() {
                    message.push_str(&format!("\n  also {}: {}", state, cascaded.join(", ")));
                }
                Ok(message)
            }
        }
    }

    /// Format a catalog merge summary.
    pub fn format_merge_report(&self, report: &MergeReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.total.to_string()),
            OutputFormat::Table => Ok(format!(
                "{}\n   - Existing items: {}\n   - New items from API: {}",
                self.success(&format!("Merged {} items", report.total)),
                report.existing,
                report.added
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn outcome_label(outcome: SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::NotInCatalog => "not_in_catalog",
        SearchOutcome::Unreferenced => "unreferenced",
        SearchOutcome::Referenced => "referenced",
    }
}

fn keep_label(label: &str, amount: Option<u32>) -> String {
    match amount {
        Some(n) => format!("{} ({})", label, n),
        None => label.to_string(),
    }
}

fn quantity_json(quantity: &Quantity) -> Value {
    match quantity {
        Quantity::Count(n) => json!(n),
        Quantity::Unparsed(raw) => json!(raw),
        Quantity::Missing => Value::Null,
    }
}

fn category_json(total: &CategoryTotal) -> Value {
    json!({ "original": total.original, "remaining": total.remaining })
}

fn done_mark(checklist: &ChecklistState, key: &TierKey) -> String {
    let mark = if checklist.is_complete(key) { "✓" } else { "" };
    mark.to_string()
}

/// One row per tiered requirement, or `None` when there are none
fn tier_table(reqs: &Requirements, checklist: &ChecklistState) -> Option<String> {
    if reqs.tiered().next().is_none() {
        return None;
    }

    let mut builder = Builder::default();
    builder.push_record(["Category", "Where", "Amount", "Done", "Key"]);

    for r in &reqs.stations {
        let key = r.tier_key();
        builder.push_record([
            "Station".to_string(),
            format!("{} level {}", r.station.replace('_', " "), r.level),
            r.amount.to_string(),
            done_mark(checklist, &key),
            key.storage_key(),
        ]);
    }
    for r in &reqs.scrappy {
        let key = r.tier_key();
        builder.push_record([
            "Scrappy".to_string(),
            format!("Level {}: {}", r.level, r.title),
            r.amount.to_string(),
            done_mark(checklist, &key),
            key.storage_key(),
        ]);
    }
    for r in &reqs.projects {
        let key = r.tier_key();
        builder.push_record([
            "Project".to_string(),
            format!("{} stage {}: {}", r.project_name, r.stage, r.stage_title),
            r.amount.to_string(),
            done_mark(checklist, &key),
            key.storage_key(),
        ]);
    }
    for r in &reqs.quests {
        let key = r.tier_key();
        let amount = match &r.quantity {
            Quantity::Count(n) => n.to_string(),
            Quantity::Unparsed(raw) => format!("{:?}", raw),
            Quantity::Missing => "?".to_string(),
        };
        builder.push_record([
            "Quest".to_string(),
            r.quest_name.clone(),
            amount,
            done_mark(checklist, &key),
            key.storage_key(),
        ]);
    }

    Some(styled(builder))
}

fn blueprint_table(reqs: &Requirements) -> Option<String> {
    if reqs.blueprints.is_empty() {
        return None;
    }

    let mut builder = Builder::default();
    builder.push_record(["Blueprint", "Workshop", "Level", "Amount"]);
    for b in &reqs.blueprints {
        builder.push_record([
            b.blueprint.clone(),
            b.workshop.clone(),
            b.level.to_string(),
            b.amount.to_string(),
        ]);
    }
    Some(styled(builder))
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
