use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{PlannerError, Result};
use crate::models::{DayPlan, Meal};
use crate::planner::constants::{DEFAULT_SAMPLE_SIZE, DEFAULT_TRIALS};

/// Runtime-configurable knobs for day selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Randomized trials per day.
    pub trials: usize,
    /// Candidates drawn (with replacement) per meal slot.
    pub sample_size: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Absolute distance between a calorie total and the target.
#[inline]
pub fn deviation(total_kcal: u32, target_kcal: u32) -> u32 {
    total_kcal.abs_diff(target_kcal)
}

/// Draw a few random candidates and keep the one closest to `per_slot`.
///
/// Ties go to the first candidate drawn.
fn pick_slot<'a, R: Rng + ?Sized>(
    pool: &[&'a Meal],
    per_slot: f64,
    sample_size: usize,
    rng: &mut R,
) -> &'a Meal {
    let mut best = pool[rng.gen_range(0..pool.len())];
    let mut best_gap = (f64::from(best.calories) - per_slot).abs();

    for _ in 1..sample_size {
        let candidate = pool[rng.gen_range(0..pool.len())];
        let gap = (f64::from(candidate.calories) - per_slot).abs();
        if gap < best_gap {
            best = candidate;
            best_gap = gap;
        }
    }

    best
}

/// Build one randomized trial day.
fn run_trial<'a, R: Rng + ?Sized>(
    pool: &[&'a Meal],
    per_slot: f64,
    meals_per_day: usize,
    sample_size: usize,
    rng: &mut R,
) -> DayPlan<'a> {
    let meals = (0..meals_per_day)
        .map(|_| pick_slot(pool, per_slot, sample_size, rng))
        .collect();
    DayPlan::new(meals)
}

/// Select `meals_per_day` meals whose calories approximate `target_kcal`.
///
/// Greedy randomized construction repeated over `config.trials` trials:
/// 1. Split the target evenly across slots
/// 2. Per slot, sample candidates and keep the one closest to the slot share
/// 3. Keep the trial with the smallest absolute deviation from the target
///
/// Meals may repeat. Results vary between calls unless `rng` is seeded.
pub fn select_day<'a, R: Rng + ?Sized>(
    target_kcal: u32,
    pool: &[&'a Meal],
    meals_per_day: usize,
    config: &PlannerConfig,
    rng: &mut R,
) -> Result<DayPlan<'a>> {
    if pool.is_empty() {
        return Err(PlannerError::NoMealsAvailable);
    }
    if meals_per_day == 0 {
        return Ok(DayPlan::default());
    }

    let per_slot = f64::from(target_kcal) / meals_per_day as f64;
    let trials = config.trials.max(1);
    let sample_size = config.sample_size.max(1);

    let mut best: Option<(u32, DayPlan<'a>)> = None;

    for trial in 0..trials {
        let day = run_trial(pool, per_slot, meals_per_day, sample_size, rng);
        let score = deviation(day.total_kcal, target_kcal);
        trace!("Trial {}: {} kcal (off by {})", trial + 1, day.total_kcal, score);

        let improves = best.as_ref().is_none_or(|(best_score, _)| score < *best_score);
        if improves {
            best = Some((score, day));
        }

        if score == 0 {
            break;
        }
    }

    // trials >= 1, so a winner always exists
    let (score, day) = best.ok_or(PlannerError::NoMealsAvailable)?;
    debug!(
        "Selected {} meals totalling {} kcal (target {}, off by {})",
        day.len(),
        day.total_kcal,
        target_kcal,
        score
    );
    Ok(day)
}
