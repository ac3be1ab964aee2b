// ABOUTME: Macrofix CLI - syncs tracker data and reconciles intake against daily goals
// ABOUTME: Handles the sync, status, and reconcile subcommands over the local record store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Command-line interface for the reconciliation engine.
//!
//! Usage:
//! ```bash
//! # Pull a date range from a tracker export into the local store
//! macrofix sync --from 2025-06-01 --to 2025-06-07 --export export.json
//!
//! # Compare the last 7 days against goals
//! macrofix status --protein 180 --fat 60 --carbs 250 --calories 2500
//!
//! # Rank candidate foods against the current gap
//! macrofix reconcile --protein 180 --fat 60 --carbs 250 --calories 2500 \
//!     --foods catalog.json --limit 3
//! ```

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use macrofix::config::AppConfig;
use macrofix::errors::AppResult;
use macrofix::logging::LoggingConfig;
use macrofix::models::{CandidateFood, DailyRecord, NutritionGoals};
use macrofix::reconcile::Reconciler;
use macrofix::report;
use macrofix::store::{SqliteKv, StateStore};
use macrofix::sync::{sync_range, ExportFileSource};

#[derive(Parser)]
#[command(
    name = "macrofix",
    about = "Reconcile synced macro intake against daily nutrition goals",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Pull daily totals from a tracker export into the local store
    Sync {
        /// First date to sync (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last date to sync, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        /// Tracker export file covering the range
        #[arg(long)]
        export: PathBuf,
    },
    /// Show how recent intake compares to goals
    Status {
        #[command(flatten)]
        goals: GoalArgs,

        /// Days of history to average, ending today
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Allowed deviation percentage per macro
        #[arg(long, default_value_t = 10.0)]
        tolerance: f64,
    },
    /// Rank candidate foods against the current macro gap
    Reconcile {
        #[command(flatten)]
        goals: GoalArgs,

        /// Days of history to average, ending today
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Allowed deviation percentage per macro
        #[arg(long, default_value_t = 10.0)]
        tolerance: f64,

        /// Maximum suggestions to keep
        #[arg(long, default_value_t = 3)]
        limit: usize,

        /// JSON catalog of candidate foods
        #[arg(long)]
        foods: PathBuf,
    },
}

/// Daily goal flags shared by status and reconcile
#[derive(Args)]
struct GoalArgs {
    /// Daily protein goal in grams
    #[arg(long)]
    protein: f64,

    /// Daily fat goal in grams
    #[arg(long)]
    fat: f64,

    /// Daily carbs goal in grams
    #[arg(long)]
    carbs: f64,

    /// Daily calorie goal
    #[arg(long)]
    calories: f64,
}

impl GoalArgs {
    fn into_goals(self) -> NutritionGoals {
        NutritionGoals::new(self.protein, self.fat, self.carbs, self.calories)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = AppConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    info!(database_url = %config.database_url, "connecting to record store");
    let store = StateStore::new(SqliteKv::connect(&config.database_url).await?);

    match cli.command {
        Command::Sync { from, to, export } => run_sync(&store, &config, from, to, &export).await?,
        Command::Status {
            goals,
            days,
            tolerance,
        } => run_status(&store, &goals.into_goals(), days, tolerance).await?,
        Command::Reconcile {
            goals,
            days,
            tolerance,
            limit,
            foods,
        } => run_reconcile(&store, &goals.into_goals(), days, tolerance, limit, &foods).await?,
    }

    Ok(())
}

async fn run_sync(
    store: &StateStore<SqliteKv>,
    config: &AppConfig,
    from: NaiveDate,
    to: NaiveDate,
    export: &Path,
) -> AppResult<()> {
    config.tracker.validate()?;

    let mut source = ExportFileSource::open(export, Some(&config.tracker.username))?;
    let days = sync_range(store, &mut source, from, to).await?;
    println!("Synced {days} day(s) from {from} to {to}");
    Ok(())
}

async fn run_status(
    store: &StateStore<SqliteKv>,
    goals: &NutritionGoals,
    days: u32,
    tolerance: f64,
) -> AppResult<()> {
    goals.validate()?;

    let history = history_window(store, days).await?;
    let result = Reconciler::new().reconcile(&history, goals, &[], tolerance, 0);
    print!("{}", report::format_status(&result));
    Ok(())
}

async fn run_reconcile(
    store: &StateStore<SqliteKv>,
    goals: &NutritionGoals,
    days: u32,
    tolerance: f64,
    limit: usize,
    foods: &Path,
) -> AppResult<()> {
    goals.validate()?;

    let candidates = load_catalog(foods)?;
    let history = history_window(store, days).await?;
    let result = Reconciler::new().reconcile(&history, goals, &candidates, tolerance, limit);
    print!("{}", report::format_reconcile(&result));
    Ok(())
}

/// Stored records for the last `days` days, ending today
async fn history_window(store: &StateStore<SqliteKv>, days: u32) -> AppResult<Vec<DailyRecord>> {
    let end = Utc::now().date_naive();
    let start = end
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(end);
    store.scan(start, end).await
}

fn load_catalog(path: &Path) -> AppResult<Vec<CandidateFood>> {
    let raw = std::fs::read_to_string(path)?;
    let candidates = serde_json::from_str(&raw)?;
    Ok(candidates)
}
