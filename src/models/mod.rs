pub mod meal;
pub mod plan;
pub mod request;

pub use meal::{Ingredient, Meal, TAG_DAIRY_FREE, TAG_GLUTEN_FREE, TAG_VEGAN, TAG_VEGETARIAN};
pub use plan::{DayPlan, DayReport, GroceryList, MacroTargets, MealSummary, Plan, PlanReport};
pub use request::{ActivityLevel, Biometrics, EnergySource, PlanRequest, Preferences, Sex};
