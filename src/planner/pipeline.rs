use rand::Rng;
use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{
    DayReport, GroceryList, MacroTargets, MealSummary, Plan, PlanReport, PlanRequest,
};
use crate::planner::calculations::{grams_from_kcal, resolve_tdee, target_kcal_from_tdee};
use crate::planner::filter::filter_meals;
use crate::planner::grocery::aggregate_grocery;
use crate::planner::selection::{select_day, PlannerConfig};
use crate::state::MealCatalog;

/// Everything a planning run produces, borrowing meals from the catalog.
#[derive(Debug, Clone)]
pub struct PlanOutcome<'a> {
    pub tdee: i64,
    pub target_kcal: u32,
    pub macros: MacroTargets,
    pub days: usize,
    pub meals_per_day: usize,
    pub plan: Plan<'a>,
    pub grocery: GroceryList,
    /// True when no meal satisfied the preferences and the full catalog was used.
    pub used_fallback: bool,
}

impl PlanOutcome<'_> {
    /// Detach the outcome from the catalog.
    pub fn to_report(&self) -> PlanReport {
        PlanReport {
            tdee: self.tdee,
            target_kcal: self.target_kcal,
            days: self.days,
            meals_per_day: self.meals_per_day,
            macros: self.macros,
            plan: self
                .plan
                .days
                .iter()
                .map(|day| DayReport {
                    meals: day.meals.iter().map(|m| MealSummary::from(*m)).collect(),
                    total_kcal: day.total_kcal,
                })
                .collect(),
            grocery: self.grocery.clone(),
        }
    }
}

/// Generate a full plan for a request.
///
/// Steps:
/// 1. Resolve TDEE, derive the calorie target and macro grams
/// 2. Filter the catalog once, falling back to all meals if nothing survives
/// 3. Select each day independently
/// 4. Aggregate the grocery list over the whole plan
pub fn generate_plan<'a, R: Rng + ?Sized>(
    catalog: &'a MealCatalog,
    request: &PlanRequest,
    config: &PlannerConfig,
    rng: &mut R,
) -> Result<PlanOutcome<'a>> {
    if catalog.is_empty() {
        return Err(PlannerError::NoMealsAvailable);
    }

    let tdee = resolve_tdee(&request.energy);
    let target_kcal = target_kcal_from_tdee(tdee);
    let macros = grams_from_kcal(target_kcal);

    info!(
        "TDEE {} kcal, target {} kcal (P {}g / C {}g / F {}g)",
        tdee, target_kcal, macros.protein_g, macros.carbs_g, macros.fat_g
    );

    let mut pool = filter_meals(catalog, &request.preferences);
    let used_fallback = pool.is_empty();
    if used_fallback {
        warn!("No meals match the preferences, planning from the full catalog");
        pool = catalog.all();
    } else {
        info!("{} of {} meals match the preferences", pool.len(), catalog.len());
    }

    let days = (0..request.days)
        .map(|_| select_day(target_kcal, &pool, request.meals_per_day, config, rng))
        .collect::<Result<Vec<_>>>()?;
    let plan = Plan::new(days);
    let grocery = aggregate_grocery(&plan);

    Ok(PlanOutcome {
        tdee,
        target_kcal,
        macros,
        days: request.days,
        meals_per_day: request.meals_per_day,
        plan,
        grocery,
        used_fallback,
    })
}
