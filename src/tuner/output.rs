use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::tuner::evaluation::EvaluationResult;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file.
pub fn write_csv(results: &[EvaluationResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "trials",
        "sample_size",
        "cost",
        "avg_deviation_kcal",
        "avg_distinct_meals",
    ])?;

    for (i, result) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            result.knobs.trials.to_string(),
            result.knobs.sample_size.to_string(),
            result.knobs.cost().to_string(),
            format!("{:.2}", result.avg_deviation),
            format!("{:.2}", result.avg_distinct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the chosen result as a planner config the CLI can load with `--config`.
pub fn write_best_json(best: &EvaluationResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "trials": best.knobs.trials,
        "sample_size": best.knobs.sample_size,
        "metrics": {
            "avg_deviation_kcal": truncate(best.avg_deviation, 2),
            "avg_distinct_meals": truncate(best.avg_distinct, 2),
            "cost": best.knobs.cost(),
        },
        "per_scenario": best.per_scenario.iter().map(|r| {
            serde_json::json!({
                "target_kcal": r.target_kcal,
                "meals_per_day": r.meals_per_day,
                "mean_deviation_kcal": truncate(r.mean_deviation, 2),
                "mean_distinct_meals": truncate(r.mean_distinct, 2),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[EvaluationResult], k: usize) {
    println!("\n=== Top {} Results (by deviation) ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: deviation={:.1} kcal distinct={:.2} cost={}",
            i + 1,
            result.avg_deviation,
            result.avg_distinct,
            result.knobs.cost()
        );
        println!("    {}", result.knobs.display());
        println!();
    }
}

/// Print Pareto frontier with the balanced pick highlighted.
pub fn print_pareto_frontier(
    results: &[EvaluationResult],
    pareto_indices: &[usize],
    balanced_idx: Option<usize>,
) {
    println!(
        "\n=== Pareto Frontier ({} non-dominated solutions) ===\n",
        pareto_indices.len()
    );

    // Cheapest first
    let mut sorted_indices: Vec<usize> = pareto_indices.to_vec();
    sorted_indices.sort_by_key(|&i| results[i].knobs.cost());

    for (display_rank, &idx) in sorted_indices.iter().enumerate() {
        let result = &results[idx];
        let label = if balanced_idx == Some(idx) {
            " ★ BALANCED (recommended)"
        } else {
            ""
        };

        println!(
            "#{}: deviation={:.1} kcal distinct={:.2} cost={}{}",
            display_rank + 1,
            result.avg_deviation,
            result.avg_distinct,
            result.knobs.cost(),
            label
        );
        println!("    {}", result.knobs.display());
        println!();
    }

    if balanced_idx.is_some() {
        println!("─────────────────────────────────────────────────────────────");
        println!("★ Balanced pick trades calorie accuracy against selection cost.");
        println!("  The JSON output uses the balanced configuration.");
    }
}
