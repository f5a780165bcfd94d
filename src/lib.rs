pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;
pub mod tuner;

pub use error::{PlannerError, Result};
pub use models::{Meal, PlanReport, PlanRequest, Preferences};
pub use planner::{generate_plan, PlanOutcome, PlannerConfig};
pub use state::{MealCatalog, ResultStore};
