// ─────────────────────────────────────────────────────────────────────────────
// Energy estimation (Mifflin–St Jeor)
// ─────────────────────────────────────────────────────────────────────────────

pub const MSJ_WEIGHT_COEF: f64 = 10.0;
pub const MSJ_HEIGHT_COEF: f64 = 6.25;
pub const MSJ_AGE_COEF: f64 = 5.0;

/// Sex offsets added after the weighted terms.
pub const MSJ_MALE_OFFSET: f64 = 5.0;
pub const MSJ_FEMALE_OFFSET: f64 = -161.0;

/// TDEE multipliers per activity level.
pub const ACTIVITY_SEDENTARY: f64 = 1.2;
pub const ACTIVITY_LIGHT: f64 = 1.375;
pub const ACTIVITY_MODERATE: f64 = 1.55;
pub const ACTIVITY_ACTIVE: f64 = 1.725;
pub const ACTIVITY_VERY_ACTIVE: f64 = 1.9;

// ─────────────────────────────────────────────────────────────────────────────
// Target policy
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of TDEE used as the daily calorie target (a deficit).
pub const DEFICIT_RATIO: f64 = 0.75;

/// Share of target energy per macro. Sums to 1.0.
pub const PROTEIN_SHARE: f64 = 0.30;
pub const CARB_SHARE: f64 = 0.40;
pub const FAT_SHARE: f64 = 0.30;

/// Energy density per gram.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ─────────────────────────────────────────────────────────────────────────────
// Input defaults and bounds
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_AGE_YEARS: u32 = 30;
pub const DEFAULT_HEIGHT_CM: f64 = 175.0;
pub const DEFAULT_WEIGHT_KG: f64 = 80.0;

pub const CM_PER_INCH: f64 = 2.54;
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const KG_PER_LB: f64 = 0.45359237;

pub const MIN_DAYS: usize = 1;
pub const MAX_DAYS: usize = 7;
pub const DEFAULT_DAYS: usize = 3;

/// Upper bounds accepted for a single catalog meal.
pub const MAX_MEAL_KCAL: u32 = 10_000;
pub const MAX_MACRO_GRAMS: u32 = 1_000;

pub const MIN_MEALS_PER_DAY: usize = 2;
pub const MAX_MEALS_PER_DAY: usize = 5;
pub const DEFAULT_MEALS_PER_DAY: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Day selection (defaults for PlannerConfig, see `tuner`)
// ─────────────────────────────────────────────────────────────────────────────

/// Randomized trials per day; the best-scoring trial wins.
pub const DEFAULT_TRIALS: usize = 20;

/// Candidates drawn per slot within a trial.
pub const DEFAULT_SAMPLE_SIZE: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Result store and interface
// ─────────────────────────────────────────────────────────────────────────────

/// Tokens are 10-digit decimal numbers in [TOKEN_MIN, TOKEN_MAX).
pub const TOKEN_MIN: u64 = 1_000_000_000;
pub const TOKEN_MAX: u64 = 10_000_000_000;

/// Plans kept before the oldest one is evicted.
pub const DEFAULT_STORE_CAPACITY: usize = 256;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.7;
