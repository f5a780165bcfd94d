use std::fs;
use std::path::Path;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use home_meal_planner_rs::cli::{CatalogArgs, Cli, Command, PlanArgs};
use home_meal_planner_rs::error::Result;
use home_meal_planner_rs::interface::{
    collect_plan_request, display_meal_detail, display_meal_list, display_report, format_report,
    report_unmatched_excludes,
};
use home_meal_planner_rs::models::PlanReport;
use home_meal_planner_rs::planner::{filter_meals, generate_plan, PlannerConfig};
use home_meal_planner_rs::state::{
    load_catalog, load_config, load_report, save_report, ResultStore,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };

    match command {
        Command::Plan(args) => cmd_plan(&cli.catalog, &config, &args),
        Command::Catalog(args) => cmd_catalog(&cli.catalog, &args),
        Command::Show { report } => {
            display_report(&load_report(&report)?, None);
            Ok(())
        }
    }
}

/// Generate a meal plan and grocery list.
fn cmd_plan(catalog_path: &Path, config: &PlannerConfig, args: &PlanArgs) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    println!("Loaded {} meals", catalog.len());

    let request = if args.interactive {
        collect_plan_request(&catalog)?
    } else {
        let request = args.to_request();
        report_unmatched_excludes(&catalog, &request.preferences);
        request
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = generate_plan(&catalog, &request, config, &mut rng)?;
    if outcome.used_fallback {
        println!("No meals match your preferences; using the full catalog instead.");
    }

    let store = ResultStore::default();
    let token = store.insert(outcome.to_report());

    // Read back through the store, the same path an exporter uses.
    let report = store.get(&token)?;
    display_report(&report, Some(&token));

    if let Some(path) = &args.export {
        export_report(path, &report, &token)?;
        println!("Plan exported to {}", path.display());
    }

    Ok(())
}

/// Write a report as JSON or plain text depending on the file extension.
fn export_report(path: &Path, report: &PlanReport, token: &str) -> Result<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        save_report(path, report)
    } else {
        fs::write(path, format_report(report, Some(token)))?;
        Ok(())
    }
}

/// List catalog meals, optionally filtered by preferences, or show one meal.
fn cmd_catalog(catalog_path: &Path, args: &CatalogArgs) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    if let Some(id) = &args.meal {
        display_meal_detail(catalog.require(id)?);
        return Ok(());
    }

    let prefs = args.preferences.to_preferences();

    if prefs.is_unrestricted() {
        display_meal_list(&catalog.all(), "Catalog");
        return Ok(());
    }

    report_unmatched_excludes(&catalog, &prefs);
    let pool = filter_meals(&catalog, &prefs);
    display_meal_list(&pool, "Matching meals");
    Ok(())
}
