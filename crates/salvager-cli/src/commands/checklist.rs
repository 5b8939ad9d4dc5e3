//! Checklist command implementation.

use crate::cli::{ChecklistAction, ChecklistArgs};
use crate::error::Result;
use crate::output::Formatter;
use salvager_domain::ChecklistStore;
use salvager_engine::LookupEngine;
use std::fmt::Display;
use std::io::{self, Write};

/// Execute the checklist command.
pub fn execute_checklist<S>(
    args: ChecklistArgs,
    engine: &mut LookupEngine<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: ChecklistStore,
    S::Error: Display,
{
    match args.action {
        ChecklistAction::List => {
            println!("{}", formatter.format_checklist(engine.checklist())?);
        }
        ChecklistAction::Prune => {
            let removed = engine.prune_stale()?;
            println!(
                "{}",
                formatter.success(&format!("Removed {} stale entr{}", removed, plural(removed)))
            );
        }
        ChecklistAction::Reset { yes } => {
            if !yes && !confirm(engine.checklist().len())? {
                println!("{}", formatter.info("Operation cancelled"));
                return Ok(());
            }
            engine.reset()?;
            println!("{}", formatter.success("Checklist cleared"));
        }
    }

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}

fn confirm(entries: usize) -> Result<bool> {
    print!("About to clear {} checklist entr{}. Continue? [y/N] ", entries, plural(entries));
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
