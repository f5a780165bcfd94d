use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::models::Meal;
use crate::planner::selection::{deviation, select_day};
use crate::tuner::knobs::{KnobRanges, TunerKnobs};

/// Result of evaluating one (target, meals per day) scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub target_kcal: u32,
    pub meals_per_day: usize,
    /// Mean absolute deviation from the target over the repeats.
    pub mean_deviation: f64,
    /// Mean number of distinct meals per selected day.
    pub mean_distinct: f64,
}

/// Aggregated result of evaluating knobs across all scenarios.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub knobs: TunerKnobs,
    pub avg_deviation: f64,
    pub avg_distinct: f64,
    pub per_scenario: Vec<ScenarioResult>,
}

impl EvaluationResult {
    /// Lexicographic comparison: (avg_deviation, avg_distinct, cost).
    /// Greater means better: lower deviation, more variety, lower cost.
    pub fn cmp_score(&self, other: &Self) -> std::cmp::Ordering {
        match other.avg_deviation.partial_cmp(&self.avg_deviation) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        match self.avg_distinct.partial_cmp(&other.avg_distinct) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        other.knobs.cost().cmp(&self.knobs.cost())
    }

    /// True when `other` is at least as good on deviation and cost, and
    /// strictly better on one of them.
    pub fn is_dominated_by(&self, other: &Self) -> bool {
        let no_worse = other.avg_deviation <= self.avg_deviation
            && other.knobs.cost() <= self.knobs.cost();
        let better = other.avg_deviation < self.avg_deviation
            || other.knobs.cost() < self.knobs.cost();
        no_worse && better
    }
}

/// Scenario grid and sampling settings shared by every evaluation.
#[derive(Debug, Clone)]
pub struct ScenarioGrid {
    pub targets: Vec<u32>,
    pub meals_per_day: Vec<usize>,
    /// Days selected per scenario.
    pub repeats: usize,
    /// Seed for the selection RNG, identical for every knob set.
    pub seed: u64,
}

/// Evaluate one scenario. Fails with `NoMealsAvailable` on an empty pool.
pub fn evaluate_scenario<R: Rng + ?Sized>(
    pool: &[&Meal],
    target_kcal: u32,
    meals_per_day: usize,
    knobs: &TunerKnobs,
    repeats: usize,
    rng: &mut R,
) -> Result<ScenarioResult> {
    let config = knobs.to_config();
    let repeats = repeats.max(1);
    let mut total_deviation = 0.0;
    let mut total_distinct = 0.0;

    for _ in 0..repeats {
        let day = select_day(target_kcal, pool, meals_per_day, &config, rng)?;
        total_deviation += f64::from(deviation(day.total_kcal, target_kcal));
        let distinct: HashSet<&str> = day.meals.iter().map(|m| m.id.as_str()).collect();
        total_distinct += distinct.len() as f64;
    }

    Ok(ScenarioResult {
        target_kcal,
        meals_per_day,
        mean_deviation: total_deviation / repeats as f64,
        mean_distinct: total_distinct / repeats as f64,
    })
}

/// Evaluate knobs over every scenario of the grid.
pub fn evaluate_knobs(
    knobs: &TunerKnobs,
    pool: &[&Meal],
    grid: &ScenarioGrid,
) -> Result<EvaluationResult> {
    let mut rng = StdRng::seed_from_u64(grid.seed);

    let per_scenario: Vec<ScenarioResult> = grid
        .targets
        .iter()
        .flat_map(|&target| grid.meals_per_day.iter().map(move |&mpd| (target, mpd)))
        .map(|(target, mpd)| {
            evaluate_scenario(pool, target, mpd, knobs, grid.repeats, &mut rng)
        })
        .collect::<Result<_>>()?;

    let n = per_scenario.len().max(1) as f64;
    let avg_deviation = per_scenario.iter().map(|r| r.mean_deviation).sum::<f64>() / n;
    let avg_distinct = per_scenario.iter().map(|r| r.mean_distinct).sum::<f64>() / n;

    debug!(
        "{}: deviation={:.1} distinct={:.2}",
        knobs.display(),
        avg_deviation,
        avg_distinct
    );

    Ok(EvaluationResult {
        knobs: *knobs,
        avg_deviation,
        avg_distinct,
        per_scenario,
    })
}

/// Indices of results not dominated on (deviation, cost).
pub fn pareto_frontier(results: &[EvaluationResult]) -> Vec<usize> {
    (0..results.len())
        .filter(|&i| {
            !results
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && results[i].is_dominated_by(other))
        })
        .collect()
}

/// Pick the frontier point with the smallest normalized deviation + cost.
pub fn select_balanced(results: &[EvaluationResult], frontier: &[usize]) -> Option<usize> {
    let max_dev = frontier
        .iter()
        .map(|&i| results[i].avg_deviation)
        .fold(0.0, f64::max)
        .max(f64::EPSILON);
    let max_cost = frontier
        .iter()
        .map(|&i| results[i].knobs.cost())
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let balance = |i: usize| {
        results[i].avg_deviation / max_dev + results[i].knobs.cost() as f64 / max_cost
    };

    frontier
        .iter()
        .copied()
        .min_by(|&a, &b| {
            balance(a)
                .partial_cmp(&balance(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Hill climbing configuration.
#[derive(Debug, Clone)]
pub struct HillClimbConfig {
    /// Step sizes tried in both directions for every knob.
    pub steps: Vec<isize>,
    pub max_rounds: usize,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            steps: vec![1, 2, 5],
            max_rounds: 10,
        }
    }
}

/// Refine a result by single-knob moves that dominate the current point.
pub fn hill_climb(
    start: &EvaluationResult,
    pool: &[&Meal],
    grid: &ScenarioGrid,
    ranges: &KnobRanges,
    config: &HillClimbConfig,
) -> Result<EvaluationResult> {
    let mut current = start.clone();

    for _ in 0..config.max_rounds {
        let mut improved = false;

        for knob_idx in 0..TunerKnobs::NUM_KNOBS {
            for &step in &config.steps {
                for signed in [step, -step] {
                    let knobs = current.knobs.perturb(knob_idx, signed, ranges);
                    if knobs == current.knobs {
                        continue;
                    }
                    let candidate = evaluate_knobs(&knobs, pool, grid)?;
                    if current.is_dominated_by(&candidate) {
                        current = candidate;
                        improved = true;
                    }
                }
            }
        }

        if !improved {
            break;
        }
    }

    Ok(current)
}
