//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{ChecklistAction, ChecklistArgs, SearchArgs, SuggestArgs, ToggleArgs};
use crate::commands;
use crate::config::Config;
use crate::context::Engine;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(engine: &mut Engine, config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Salvager REPL - Type an item name to search, 'help' for commands, 'exit' to quit")
    );
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("salvager> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, engine, config, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Search(SearchArgs),
    Suggest(SuggestArgs),
    Toggle(ToggleArgs),
    Checklist(ChecklistArgs),
}

/// Parse a REPL command line.
///
/// A line that does not start with a command word is searched as-is.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some(first) = parts.first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match *first {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "search" => parse_search_command(&parts[1..]),
        "suggest" => parse_suggest_command(&parts[1..]),
        "toggle" => parse_toggle_command(&parts[1..]),
        "checklist" | "list" => parse_checklist_command(&parts[1..]),
        _ => parse_search_command(&parts),
    }
}

fn execute_repl_command(
    cmd: ReplCommand,
    engine: &mut Engine,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Search(args) => commands::execute_search(args, &*engine, formatter),
        ReplCommand::Suggest(args) => {
            commands::execute_suggest(args, &*engine, config.settings.suggestion_limit, formatter)
        }
        ReplCommand::Toggle(args) => commands::execute_toggle(args, engine, formatter),
        ReplCommand::Checklist(args) => commands::execute_checklist(args, engine, formatter),
        ReplCommand::Exit | ReplCommand::Help => Ok(()),
    }
}

fn parse_search_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: search <item name>".to_string()));
    }

    Ok(ReplCommand::Search(SearchArgs {
        term: args.iter().map(|s| s.to_string()).collect(),
    }))
}

fn parse_suggest_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: suggest <fragment>".to_string()));
    }

    Ok(ReplCommand::Suggest(SuggestArgs {
        fragment: args.join(" "),
        limit: None,
    }))
}

/// Station names may contain spaces, so the rest of the line is the key.
fn parse_toggle_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: toggle <tier key>".to_string()));
    }

    Ok(ReplCommand::Toggle(ToggleArgs {
        key: args.join(" "),
    }))
}

fn parse_checklist_command(args: &[&str]) -> Result<ReplCommand> {
    let action = match args.first().copied() {
        None | Some("list") => ChecklistAction::List,
        Some("prune") => ChecklistAction::Prune,
        Some("reset") => ChecklistAction::Reset { yes: false },
        Some(other) => {
            return Err(CliError::InvalidInput(format!(
                "Unknown checklist action: {}",
                other
            )))
        }
    };

    Ok(ReplCommand::Checklist(ChecklistArgs { action }))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <item name>                    - Search for an item");
    println!("  search <item name>             - Search for an item");
    println!("  suggest <fragment>             - List catalog names containing the fragment");
    println!("  toggle <key>                   - Toggle a checklist tier");
    println!("    key: Refiner_2, scrappy_level_3, project_expedition_stage_1, quest_<id>");
    println!("  checklist [list|prune|reset]   - Inspect or maintain the checklist");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
