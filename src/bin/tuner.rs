use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use home_meal_planner_rs::state::load_catalog;
use home_meal_planner_rs::tuner::{
    print_pareto_frontier, print_topk, run_tuner, write_best_json, write_csv, HillClimbConfig,
    KnobRanges, TunerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tuner")]
#[command(about = "Tunes day-selection knobs for the meal planner")]
struct Args {
    /// Number of random search iterations
    #[arg(long, default_value = "200")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Daily calorie targets to evaluate (comma-separated)
    #[arg(long, default_value = "1400,1800,2200,2600")]
    targets: String,

    /// Meals per day to evaluate (comma-separated)
    #[arg(long, default_value = "2,3,5")]
    meals_per_day: String,

    /// Days selected per scenario
    #[arg(long, default_value = "10")]
    repeats: usize,

    /// Path to the meal catalog
    #[arg(long, default_value = "data/meals.json")]
    catalog: PathBuf,

    /// Output CSV file for all results
    #[arg(long, default_value = "tuner_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the recommended planner config
    #[arg(long, default_value = "tuner_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,

    /// Disable hill climbing refinement
    #[arg(long)]
    no_hill_climb: bool,
}

fn parse_list<T: std::str::FromStr>(s: &str) -> Vec<T> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match load_catalog(&args.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog {:?}: {}", args.catalog, e);
            std::process::exit(1);
        }
    };
    if catalog.is_empty() {
        eprintln!("Error: catalog {:?} has no meals", args.catalog);
        std::process::exit(1);
    }
    println!("Loaded {} meals from {:?}", catalog.len(), args.catalog);

    let targets: Vec<u32> = parse_list(&args.targets);
    let meals_per_day: Vec<usize> = parse_list(&args.meals_per_day);
    if targets.is_empty() || meals_per_day.is_empty() {
        eprintln!("Error: no valid targets or meals-per-day values provided");
        std::process::exit(1);
    }
    println!("Testing targets {:?} x meals/day {:?}", targets, meals_per_day);

    let hill_climb = if args.no_hill_climb {
        None
    } else {
        Some(HillClimbConfig::default())
    };

    let config = TunerConfig {
        iterations: args.iters,
        seed: args.seed,
        targets,
        meals_per_day,
        repeats: args.repeats,
        ranges: KnobRanges::default(),
        topk: args.topk,
        hill_climb,
    };

    let tuner_results = match run_tuner(&config, &catalog) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_pareto_frontier(
        &tuner_results.results,
        &tuner_results.pareto_indices,
        tuner_results.balanced_idx,
    );
    print_topk(&tuner_results.results, config.topk);

    let best = tuner_results.recommended();
    let baseline = &tuner_results.baseline;

    println!("=== Comparison: Balanced vs Baseline ===");
    println!(
        "Baseline: deviation={:.1} kcal distinct={:.2} cost={}",
        baseline.avg_deviation,
        baseline.avg_distinct,
        baseline.knobs.cost()
    );
    println!(
        "Balanced: deviation={:.1} kcal distinct={:.2} cost={}",
        best.avg_deviation,
        best.avg_distinct,
        best.knobs.cost()
    );
    println!(
        "Change:   deviation {:+.1} kcal  distinct {:+.2}",
        best.avg_deviation - baseline.avg_deviation,
        best.avg_distinct - baseline.avg_distinct
    );
    println!();

    if let Err(e) = write_csv(&tuner_results.results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Err(e) = write_best_json(best, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote recommended config to {:?} (use with --config)", args.json);
    }
}
