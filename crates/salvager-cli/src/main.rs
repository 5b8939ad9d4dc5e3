//! Salvager CLI - Keep-or-recycle lookup for salvaged items.

use clap::Parser;
use salvager_cli::commands;
use salvager_cli::repl;
use salvager_cli::{open_engine, Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `SALVAGER_LOG` (default `warn`, `-v` for `debug`).
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SALVAGER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> salvager_cli::Result<()> {
    // Load config, writing defaults on first run
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = Config::path()?;
            if path.exists() {
                Config::load_from(&path)?
            } else {
                let cfg = Config::default();
                cfg.save().ok();
                cfg
            }
        }
    };

    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        // Needs no datasets or checklist
        Some(Command::MergeCatalog(args)) => commands::execute_merge_catalog(args, &formatter),
        command => {
            let mut engine = open_engine(&config)?;

            match command {
                None | Some(Command::Repl) => repl::run_repl(&mut engine, &config, &formatter),
                Some(Command::Search(args)) => {
                    commands::execute_search(args, &engine, &formatter)
                }
                Some(Command::Suggest(args)) => commands::execute_suggest(
                    args,
                    &engine,
                    config.settings.suggestion_limit,
                    &formatter,
                ),
                Some(Command::Toggle(args)) => {
                    commands::execute_toggle(args, &mut engine, &formatter)
                }
                Some(Command::Checklist(args)) => {
                    commands::execute_checklist(args, &mut engine, &formatter)
                }
                Some(Command::MergeCatalog(args)) => {
                    commands::execute_merge_catalog(args, &formatter)
                }
            }
        }
    }
}
