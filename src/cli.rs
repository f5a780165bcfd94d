use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{ActivityLevel, Biometrics, EnergySource, PlanRequest, Preferences, Sex};
use crate::planner::calculations::{height_cm_from_imperial, kg_from_lb};
use crate::planner::constants::*;

/// Home Meal Planner: calorie targets, multi-day meal plans and grocery lists.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal catalog JSON file.
    #[arg(short, long, global = true, default_value = "data/meals.json")]
    pub catalog: PathBuf,

    /// Optional planner config JSON (e.g. written by the tuner).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a meal plan and grocery list.
    Plan(PlanArgs),

    /// List the meals in the catalog, optionally filtered by preferences.
    Catalog(CatalogArgs),

    /// Print a plan previously exported as JSON.
    Show {
        /// Path to the exported JSON report.
        report: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

/// Dietary preference flags shared by `plan` and `catalog`.
#[derive(Args, Debug, Clone, Default)]
pub struct PreferenceArgs {
    /// Only vegetarian (or vegan) meals.
    #[arg(long)]
    pub vegetarian: bool,

    /// Only vegan meals.
    #[arg(long)]
    pub vegan: bool,

    /// Only dairy-free meals.
    #[arg(long)]
    pub dairy_free: bool,

    /// Only gluten-free meals.
    #[arg(long)]
    pub gluten_free: bool,

    /// Comma-separated ingredient or meal-name substrings to avoid.
    #[arg(long, default_value = "")]
    pub excludes: String,
}

impl PreferenceArgs {
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            dairy_free: self.dairy_free,
            gluten_free: self.gluten_free,
            excludes: Vec::new(),
        }
        .with_excludes(&self.excludes)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Show one meal in detail by id.
    #[arg(long)]
    pub meal: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Known TDEE in kcal; skips the biometric estimate.
    #[arg(long)]
    pub tdee: Option<f64>,

    /// Sex for the BMR formula (male, female, other).
    #[arg(long, default_value = "male")]
    pub sex: String,

    /// Age in years.
    #[arg(long)]
    pub age: Option<u32>,

    /// Height in centimetres.
    #[arg(long)]
    pub height_cm: Option<f64>,

    /// Height in feet (combined with --height-in).
    #[arg(long)]
    pub height_ft: Option<f64>,

    /// Additional height in inches.
    #[arg(long)]
    pub height_in: Option<f64>,

    /// Weight in kilograms.
    #[arg(long)]
    pub weight_kg: Option<f64>,

    /// Weight in pounds (takes precedence over --weight-kg).
    #[arg(long)]
    pub weight_lb: Option<f64>,

    /// Activity level: sedentary, light, moderate, active, very_active.
    #[arg(long, default_value = "sedentary")]
    pub activity: String,

    /// Days to plan (1-7).
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: usize,

    /// Meals per day (2-5).
    #[arg(long, default_value_t = DEFAULT_MEALS_PER_DAY)]
    pub meals_per_day: usize,

    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Seed the meal selection for a reproducible plan.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ask for every input interactively.
    #[arg(short, long)]
    pub interactive: bool,

    /// Export the plan to a file (.json for JSON, anything else for text).
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            tdee: None,
            sex: "male".to_string(),
            age: None,
            height_cm: None,
            height_ft: None,
            height_in: None,
            weight_kg: None,
            weight_lb: None,
            activity: ActivityLevel::default().key().to_string(),
            days: DEFAULT_DAYS,
            meals_per_day: DEFAULT_MEALS_PER_DAY,
            preferences: PreferenceArgs::default(),
            seed: None,
            interactive: false,
            export: None,
        }
    }
}

impl PlanArgs {
    /// Metric height: imperial flags win when they give a positive height.
    fn height_cm(&self) -> f64 {
        let imperial = match (self.height_ft, self.height_in) {
            (None, None) => None,
            (ft, inch) => Some(height_cm_from_imperial(
                ft.unwrap_or(0.0),
                inch.unwrap_or(0.0),
            )),
        };

        imperial
            .filter(|h| *h > 0.0)
            .or(self.height_cm.filter(|h| *h > 0.0))
            .unwrap_or(DEFAULT_HEIGHT_CM)
    }

    fn weight_kg(&self) -> f64 {
        self.weight_lb
            .filter(|lb| *lb > 0.0)
            .map(kg_from_lb)
            .or(self.weight_kg.filter(|kg| *kg > 0.0))
            .unwrap_or(DEFAULT_WEIGHT_KG)
    }

    /// Energy source from the flags: a positive `--tdee` bypasses the estimate.
    pub fn energy_source(&self) -> EnergySource {
        if let Some(tdee) = self.tdee.filter(|t| *t > 0.0) {
            return EnergySource::KnownTdee(tdee);
        }

        EnergySource::Estimated {
            biometrics: Biometrics {
                sex: Sex::parse(&self.sex),
                age_years: self.age.unwrap_or(DEFAULT_AGE_YEARS),
                height_cm: self.height_cm(),
                weight_kg: self.weight_kg(),
            },
            activity: ActivityLevel::parse(&self.activity),
        }
    }

    pub fn to_request(&self) -> PlanRequest {
        PlanRequest::new(
            self.energy_source(),
            self.days,
            self.meals_per_day,
            self.preferences.to_preferences(),
        )
    }
}
