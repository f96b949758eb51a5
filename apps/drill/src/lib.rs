//! Terminal front end for the vocabulary drill engine.

pub mod cli;
pub mod commands;
pub mod db;

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{Catalog, Leaderboard, ProgressStore, Session};

use crate::cli::{Cli, Commands};
use crate::db::SqliteStore;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    execute(cli)
}

/// Open storage and dispatch a parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let db_path = cli.db_path();
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let settings = cli.settings();

    let stdin = io::stdin();
    let stdout = io::stdout();

    match &cli.command {
        Commands::Drill(args) => {
            let catalog = load_required_catalog(&cli)?;
            let mut session = Session::new(catalog, &store, settings);
            commands::drill::run(&mut session, args, stdin.lock(), stdout.lock())?;
        }
        Commands::Stats => {
            let catalog = load_required_catalog(&cli)?;
            let progress = ProgressStore::new(&store);
            commands::stats::run(&catalog, &progress, chrono::Utc::now(), stdout.lock())?;
        }
        Commands::Categories => {
            let catalog = load_required_catalog(&cli)?;
            commands::categories::run(&catalog, stdout.lock())?;
        }
        Commands::Leaderboard => {
            let board = Leaderboard::new(&store, settings.leaderboard_capacity);
            commands::leaderboard::run(&board, stdout.lock())?;
        }
        Commands::Reset { leaderboard, yes } => {
            let progress = ProgressStore::new(&store);
            commands::reset::run(&progress, *leaderboard, *yes, stdin.lock(), stdout.lock())?;
        }
    }

    stdout.lock().flush()?;
    Ok(())
}

fn load_required_catalog(cli: &Cli) -> anyhow::Result<Catalog> {
    let path = cli
        .catalog
        .as_deref()
        .context("no catalog given; pass --catalog or set VOCAB_CATALOG")?;
    commands::load_catalog(path)
}
