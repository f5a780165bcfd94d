use serde::{Deserialize, Serialize};

use crate::planner::constants::*;

/// Sex used by the Mifflin–St Jeor offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
    Other,
}

impl Sex {
    /// Parse free text; anything that is not recognisably male or female is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "male" | "m" => Sex::Male,
            "female" | "f" => Sex::Female,
            _ => Sex::Other,
        }
    }
}

/// Activity level selecting the TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Parse an activity key. Unknown keys fall back to sedentary.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => ACTIVITY_SEDENTARY,
            ActivityLevel::Light => ACTIVITY_LIGHT,
            ActivityLevel::Moderate => ACTIVITY_MODERATE,
            ActivityLevel::Active => ACTIVITY_ACTIVE,
            ActivityLevel::VeryActive => ACTIVITY_VERY_ACTIVE,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

/// Raw body measurements, already converted to metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    pub sex: Sex,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Default for Biometrics {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            age_years: DEFAULT_AGE_YEARS,
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
        }
    }
}

/// Where the daily energy expenditure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnergySource {
    /// TDEE supplied directly by the user.
    KnownTdee(f64),
    /// TDEE estimated from biometrics and activity.
    Estimated {
        biometrics: Biometrics,
        activity: ActivityLevel,
    },
}

impl Default for EnergySource {
    fn default() -> Self {
        EnergySource::Estimated {
            biometrics: Biometrics::default(),
            activity: ActivityLevel::default(),
        }
    }
}

/// Dietary constraints for a planning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub vegetarian: bool,
    pub vegan: bool,
    pub dairy_free: bool,
    pub gluten_free: bool,
    /// Lowercased substrings rejected in meal or ingredient names.
    pub excludes: Vec<String>,
}

impl Preferences {
    /// Parse a comma-separated exclude list. Blank entries are dropped.
    pub fn parse_excludes(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect()
    }

    pub fn with_excludes(mut self, raw: &str) -> Self {
        self.excludes = Self::parse_excludes(raw);
        self
    }

    /// True when no flag is set and nothing is excluded.
    pub fn is_unrestricted(&self) -> bool {
        !self.vegetarian
            && !self.vegan
            && !self.dairy_free
            && !self.gluten_free
            && self.excludes.is_empty()
    }
}

/// A single planning request. Day and meal counts are clamped on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub energy: EnergySource,
    pub days: usize,
    pub meals_per_day: usize,
    pub preferences: Preferences,
}

impl PlanRequest {
    pub fn new(
        energy: EnergySource,
        days: usize,
        meals_per_day: usize,
        preferences: Preferences,
    ) -> Self {
        Self {
            energy,
            days: days.clamp(MIN_DAYS, MAX_DAYS),
            meals_per_day: meals_per_day.clamp(MIN_MEALS_PER_DAY, MAX_MEALS_PER_DAY),
            preferences,
        }
    }
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self::new(
            EnergySource::default(),
            DEFAULT_DAYS,
            DEFAULT_MEALS_PER_DAY,
            Preferences::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_parse_unknown_is_sedentary() {
        assert_eq!(ActivityLevel::parse("very_active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::parse("Very-Active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::parse("couch"), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::parse(""), ActivityLevel::Sedentary);
    }

    #[test]
    fn test_activity_keys_round_trip() {
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::parse(level.key()), level);
        }
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("M"), Sex::Male);
        assert_eq!(Sex::parse("female"), Sex::Female);
        assert_eq!(Sex::parse("nonbinary"), Sex::Other);
    }

    #[test]
    fn test_parse_excludes() {
        let excludes = Preferences::parse_excludes(" Peanut, ,shrimp ,");
        assert_eq!(excludes, vec!["peanut".to_string(), "shrimp".to_string()]);
        assert!(Preferences::parse_excludes("").is_empty());
    }

    #[test]
    fn test_request_clamps_counts() {
        let req = PlanRequest::new(EnergySource::KnownTdee(2000.0), 12, 1, Preferences::default());
        assert_eq!(req.days, MAX_DAYS);
        assert_eq!(req.meals_per_day, MIN_MEALS_PER_DAY);

        let req = PlanRequest::new(EnergySource::KnownTdee(2000.0), 0, 9, Preferences::default());
        assert_eq!(req.days, MIN_DAYS);
        assert_eq!(req.meals_per_day, MAX_MEALS_PER_DAY);
    }
}
