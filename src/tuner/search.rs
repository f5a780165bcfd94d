use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::planner::constants::{DEFAULT_MEALS_PER_DAY, MAX_MEALS_PER_DAY, MIN_MEALS_PER_DAY};
use crate::state::MealCatalog;
use crate::tuner::evaluation::{
    evaluate_knobs, hill_climb, pareto_frontier, select_balanced, EvaluationResult,
    ScenarioGrid, HillClimbConfig,
};
use crate::tuner::knobs::{KnobRanges, TunerKnobs};

/// Configuration for the tuner.
pub struct TunerConfig {
    pub iterations: usize,
    pub seed: u64,
    pub targets: Vec<u32>,
    pub meals_per_day: Vec<usize>,
    /// Days selected per (target, meals per day) scenario.
    pub repeats: usize,
    pub ranges: KnobRanges,
    pub topk: usize,
    /// Hill climbing configuration. Set to None to disable.
    pub hill_climb: Option<HillClimbConfig>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            seed: 123,
            targets: vec![1400, 1800, 2200, 2600],
            meals_per_day: vec![MIN_MEALS_PER_DAY, DEFAULT_MEALS_PER_DAY, MAX_MEALS_PER_DAY],
            repeats: 10,
            ranges: KnobRanges::default(),
            topk: 10,
            hill_climb: Some(HillClimbConfig::default()),
        }
    }
}

impl TunerConfig {
    fn scenario_grid(&self) -> ScenarioGrid {
        ScenarioGrid {
            targets: self.targets.clone(),
            meals_per_day: self.meals_per_day.clone(),
            repeats: self.repeats,
            seed: self.seed,
        }
    }
}

/// Results from a tuning run.
pub struct TunerResults {
    /// All evaluation results, sorted best to worst by lexicographic comparison.
    pub results: Vec<EvaluationResult>,
    /// The baseline result using default constants.
    pub baseline: EvaluationResult,
    /// Indices of Pareto-optimal (non-dominated) results.
    pub pareto_indices: Vec<usize>,
    /// Index of the most balanced Pareto-optimal result (recommended).
    pub balanced_idx: Option<usize>,
}

impl TunerResults {
    /// The recommended result: the balanced pick, else the top-ranked one.
    pub fn recommended(&self) -> &EvaluationResult {
        self.balanced_idx
            .and_then(|idx| self.results.get(idx))
            .or_else(|| self.results.first())
            .unwrap_or(&self.baseline)
    }
}

/// Run random-search tuning over the whole catalog.
///
/// An empty catalog fails with `NoMealsAvailable`.
pub fn run_tuner(config: &TunerConfig, catalog: &MealCatalog) -> Result<TunerResults> {
    if catalog.is_empty() {
        return Err(PlannerError::NoMealsAvailable);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let pool = catalog.all();
    let grid = config.scenario_grid();
    let mut results = Vec::with_capacity(config.iterations);

    let baseline_knobs = TunerKnobs::default();
    let baseline = evaluate_knobs(&baseline_knobs, &pool, &grid)?;

    println!(
        "Baseline: deviation={:.1} kcal distinct={:.2} cost={}",
        baseline.avg_deviation,
        baseline.avg_distinct,
        baseline_knobs.cost()
    );
    println!("    {}\n", baseline_knobs.display());

    println!("Running {} iterations...", config.iterations);

    let mut best_deviation = baseline.avg_deviation;

    for i in 0..config.iterations {
        let knobs = TunerKnobs::random(&mut rng, &config.ranges);
        let result = evaluate_knobs(&knobs, &pool, &grid)?;

        if result.avg_deviation < best_deviation {
            best_deviation = result.avg_deviation;
            println!(
                "[{}/{}] New best: deviation={:.1} kcal distinct={:.2} ({})",
                i + 1,
                config.iterations,
                result.avg_deviation,
                result.avg_distinct,
                knobs.display()
            );
        }

        results.push(result);

        if (i + 1) % (config.iterations / 10).max(1) == 0 {
            let pct = ((i + 1) as f64 / config.iterations as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    eprintln!();

    results.sort_by(|a, b| b.cmp_score(a));
    let mut pareto_indices = pareto_frontier(&results);

    println!(
        "\nPareto frontier: {} non-dominated solutions",
        pareto_indices.len()
    );

    if let Some(hc_config) = &config.hill_climb {
        let mut refined = Vec::new();
        for &idx in &pareto_indices {
            let original = &results[idx];
            let candidate = hill_climb(original, &pool, &grid, &config.ranges, hc_config)?;
            if original.is_dominated_by(&candidate) {
                refined.push(candidate);
            }
        }

        if refined.is_empty() {
            println!("  No improvements found (already at local optima)");
        } else {
            println!("  {} results improved by hill climbing", refined.len());
            results.extend(refined);
            results.sort_by(|a, b| b.cmp_score(a));
            pareto_indices = pareto_frontier(&results);
        }
    }

    let balanced_idx = select_balanced(&results, &pareto_indices);

    if let Some(idx) = balanced_idx {
        info!(
            "balanced pick #{}: {}",
            idx + 1,
            results[idx].knobs.display()
        );
    }

    Ok(TunerResults {
        results,
        baseline,
        pareto_indices,
        balanced_idx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Meal;

    fn catalog() -> MealCatalog {
        let meals = [("a", 300), ("b", 450), ("c", 600), ("d", 750), ("e", 200)]
            .into_iter()
            .map(|(id, calories)| Meal {
                id: id.to_string(),
                name: id.to_string(),
                calories,
                protein: 0,
                carbs: 0,
                fat: 0,
                tags: Default::default(),
                ingredients: vec![],
            })
            .collect();
        MealCatalog::new(meals)
    }

    #[test]
    fn test_run_tuner_small() {
        let config = TunerConfig {
            iterations: 8,
            targets: vec![1500],
            meals_per_day: vec![3],
            repeats: 3,
            hill_climb: None,
            ..TunerConfig::default()
        };
        let results = run_tuner(&config, &catalog()).unwrap();

        assert_eq!(results.results.len(), 8);
        assert!(!results.pareto_indices.is_empty());
        assert!(results.balanced_idx.is_some());
        for pair in results.results.windows(2) {
            assert_ne!(pair[0].cmp_score(&pair[1]), std::cmp::Ordering::Less);
        }
    }

    #[test]
    fn test_run_tuner_empty_catalog() {
        let config = TunerConfig {
            iterations: 2,
            hill_climb: None,
            ..TunerConfig::default()
        };
        let result = run_tuner(&config, &MealCatalog::new(vec![]));
        assert!(matches!(result, Err(PlannerError::NoMealsAvailable)));
    }
}
