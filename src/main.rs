use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tasker::cli::args::{Cli, Commands};
use tasker::cli::commands;
use tasker::config::{Config, Paths};
use tasker::storage::{Database, TaskStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins, then `-v` flags, then the configured level.
fn init_logging(verbose: u8, configured: &str) {
    let fallback = match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    };
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match EnvFilter::try_new(fallback) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new("warn"), Some(fallback)),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Some(level) = rejected {
        tracing::warn!(filter = level, "ignoring invalid logging.level");
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.home {
        Some(root) => Paths::with_root(root),
        None => Paths::new()?,
    };
    let config = Config::load(&paths).context("Failed to load config")?;

    init_logging(cli.verbose, &config.logging.level);
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        // Neither of these touches the database
        Commands::Parse(args) => commands::parse(&args, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        command => {
            let db = Database::open_with_paths(&paths).with_context(|| {
                format!("Failed to open database {}", paths.database.display())
            })?;
            let store = TaskStore::new(db);
            dispatch(&store, command, &config, format)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn dispatch(
    store: &TaskStore,
    command: Commands,
    config: &Config,
    format: tasker::OutputFormat,
) -> Result<String> {
    let output = match command {
        Commands::Add(args) => commands::add(store, args, &config.general.default_list, format)?,
        Commands::Tasks { list, open } => commands::tasks(store, list.as_deref(), open, format)?,
        Commands::Done { id } => commands::done(store, id, format)?,
        Commands::Edit(args) => commands::edit(store, args, format)?,
        Commands::Move { id, position, list } => {
            commands::move_task(store, id, position, list.as_deref(), format)?
        }
        Commands::Rm { id } => commands::remove(store, id)?,
        Commands::Lists(args) => commands::lists(store, args.command, format)?,
        Commands::Groups(args) => commands::groups(store, args.command, format)?,
        Commands::Export { file } => commands::export(store, file.as_deref())?,
        Commands::Import { path } => commands::import(store, &path)
            .with_context(|| format!("Failed to import {}", path.display()))?,
        Commands::Clear { yes } => commands::clear(store, yes)?,
        Commands::Parse(_) | Commands::Completions { .. } => String::new(),
    };
    Ok(output)
}
