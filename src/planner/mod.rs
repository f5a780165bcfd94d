pub mod calculations;
pub mod constants;
pub mod filter;
pub mod grocery;
pub mod pipeline;
pub mod selection;

pub use calculations::{
    basal_metabolic_rate, grams_from_kcal, height_cm_from_imperial, kg_from_lb, resolve_tdee,
    target_kcal_from_tdee, total_daily_energy_expenditure,
};
pub use constants::*;
pub use filter::{filter_meals, is_compatible, matching_exclude};
pub use grocery::{aggregate_grocery, aggregate_meals};
pub use pipeline::{generate_plan, PlanOutcome};
pub use selection::{deviation, select_day, PlannerConfig};
