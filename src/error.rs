use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Invalid meal '{id}': {reason}")]
    InvalidMeal { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No meals available")]
    NoMealsAvailable,

    #[error("Session expired: no plan stored under token {0}. Please regenerate.")]
    SessionExpired(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
