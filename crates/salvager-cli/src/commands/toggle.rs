//! Toggle command implementation.

use crate::cli::ToggleArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use salvager_domain::{ChecklistStore, TierKey};
use salvager_engine::LookupEngine;
use std::fmt::Display;

/// Execute the toggle command.
pub fn execute_toggle<S>(
    args: ToggleArgs,
    engine: &mut LookupEngine<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: ChecklistStore,
    S::Error: Display,
{
    let key = parse_key(&args.key)?;

    if !engine.datasets().contains_tier(&key) {
        eprintln!(
            "{}",
            formatter.warning(&format!("{} is not in the loaded datasets", key))
        );
    }

    let outcome = engine.toggle(&key)?;
    println!("{}", formatter.format_toggle(&key, &outcome)?);
    Ok(())
}

/// Parse a storage-form tier key.
pub fn parse_key(raw: &str) -> Result<TierKey> {
    TierKey::parse(raw.trim())
        .ok_or_else(|| CliError::InvalidInput(format!("Invalid tier key '{}'", raw)))
}
