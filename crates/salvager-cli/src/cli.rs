//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Salvager - Find out whether an item is worth keeping.
#[derive(Debug, Parser)]
#[command(name = "salvager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SALVAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the dataset JSON files
    #[arg(short, long, global = true, env = "SALVAGER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names and keys only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show where an item is required and how many are still needed
    Search(SearchArgs),

    /// Suggest catalog names containing a fragment
    Suggest(SuggestArgs),

    /// Toggle a checklist tier (lower tiers follow when checking)
    Toggle(ToggleArgs),

    /// Inspect or maintain the checklist
    Checklist(ChecklistArgs),

    /// Merge downloaded catalog API pages into items.json
    MergeCatalog(MergeCatalogArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Item name (words are joined with spaces)
    #[arg(required = true)]
    pub term: Vec<String>,
}

/// Arguments for the suggest command.
#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// Name fragment
    pub fragment: String,

    /// Maximum number of suggestions
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the toggle command.
#[derive(Debug, Parser)]
pub struct ToggleArgs {
    /// Tier key, e.g. Refiner_2, scrappy_level_3, project_expedition_stage_1, quest_q1
    pub key: String,
}

/// Arguments for checklist maintenance.
#[derive(Debug, Parser)]
pub struct ChecklistArgs {
    #[command(subcommand)]
    pub action: ChecklistAction,
}

/// Checklist actions.
#[derive(Debug, Subcommand)]
pub enum ChecklistAction {
    /// List completed tiers
    List,

    /// Remove entries that no longer match the datasets
    Prune,

    /// Clear every entry
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Arguments for the merge-catalog command.
#[derive(Debug, Parser)]
pub struct MergeCatalogArgs {
    /// Existing items.json (missing means empty)
    #[arg(short, long)]
    pub existing: PathBuf,

    /// Saved API page files, in page order
    #[arg(required = true)]
    pub pages: Vec<PathBuf>,

    /// Where to write the merged file (defaults to --existing)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_repl() {
        let cli = Cli::parse_from(["salvager"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::parse_from(["salvager", "search", "Scrap", "Metal"]);
        match cli.command {
            Some(Command::Search(args)) => assert_eq!(args.term.join(" "), "Scrap Metal"),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["salvager", "toggle", "Refiner_2", "--format", "json", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Some(Command::Toggle(_))));
    }

    #[test]
    fn test_merge_catalog_args() {
        let cli = Cli::parse_from([
            "salvager",
            "merge-catalog",
            "--existing",
            "items.json",
            "page-1.json",
            "page-2.json",
        ]);
        match cli.command {
            Some(Command::MergeCatalog(args)) => {
                assert_eq!(args.pages.len(), 2);
                assert!(args.output.is_none());
            }
            _ => panic!("Expected MergeCatalog command"),
        }
    }

    #[test]
    fn test_checklist_reset_flag() {
        let cli = Cli::parse_from(["salvager", "checklist", "reset", "-y"]);
        match cli.command {
            Some(Command::Checklist(ChecklistArgs {
                action: ChecklistAction::Reset { yes },
            })) => assert!(yes),
            _ => panic!("Expected checklist reset"),
        }
    }
}
