//! Search and suggest command implementations.

use crate::cli::{SearchArgs, SuggestArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use salvager_domain::ChecklistStore;
use salvager_engine::LookupEngine;
use std::fmt::Display;

/// Execute the search command.
pub fn execute_search<S>(
    args: SearchArgs,
    engine: &LookupEngine<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: ChecklistStore,
    S::Error: Display,
{
    println!("{}", render_search(&args.term.join(" "), engine, formatter)?);
    Ok(())
}

/// Render the search output for a term.
pub fn render_search<S>(term: &str, engine: &LookupEngine<S>, formatter: &Formatter) -> Result<String>
where
    S: ChecklistStore,
    S::Error: Display,
{
    let result = engine
        .search(term)
        .ok_or_else(|| CliError::InvalidInput("Search term must not be empty".to_string()))?;
    let totals = engine.totals(&result);
    let tiers_completed = engine.tiers_completed_for_item(&result.name);
    formatter.format_search(&result, &totals, engine.checklist(), tiers_completed)
}

/// Execute the suggest command.
pub fn execute_suggest<S>(
    args: SuggestArgs,
    engine: &LookupEngine<S>,
    default_limit: usize,
    formatter: &Formatter,
) -> Result<()>
where
    S: ChecklistStore,
    S::Error: Display,
{
    let limit = args.limit.unwrap_or(default_limit);
    let suggestions = engine.suggest(&args.fragment, limit);
    println!("{}", formatter.format_suggestions(&suggestions)?);
    Ok(())
}
