use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::{Meal, PlanReport};
use crate::planner::PlannerConfig;
use crate::state::MealCatalog;

/// Load the meal catalog from a JSON array of meals.
///
/// Every meal is validated; duplicate ids keep the last occurrence.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<MealCatalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    info!("Loaded {} meals from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Parse and validate catalog JSON.
pub fn parse_catalog(content: &str) -> Result<MealCatalog> {
    let meals: Vec<Meal> = serde_json::from_str(content)?;

    for meal in &meals {
        if let Some(reason) = meal.validate() {
            return Err(PlannerError::InvalidMeal {
                id: meal.id.clone(),
                reason,
            });
        }
    }

    Ok(MealCatalog::new(meals))
}

/// Load planner knobs, e.g. the best result written by the tuner.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)?;
    let config: PlannerConfig = serde_json::from_str(&content)?;

    if config.trials == 0 || config.sample_size == 0 {
        return Err(PlannerError::InvalidInput(format!(
            "trials and sample_size must be at least 1 (got {} and {})",
            config.trials, config.sample_size
        )));
    }

    info!("Loaded planner config: {:?}", config);
    Ok(config)
}

/// Save a plan report as pretty JSON.
pub fn save_report<P: AsRef<Path>>(path: P, report: &PlanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a plan report saved with [`save_report`].
pub fn load_report<P: AsRef<Path>>(path: P) -> Result<PlanReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::models::{DayReport, MacroTargets, MealSummary};

    #[test]
    fn test_load_catalog() {
        let json = r#"[
            {"id": "A", "name": "Rice Bowl", "kcal": 400, "protein": 10, "carbs": 80, "fat": 4,
             "tags": ["vegan"], "ingredients": [{"name": "rice", "qty": 100}]},
            {"id": "B", "name": "Bean Chili", "calories": 600,
             "ingredients": [{"name": "beans", "quantity": 50}]}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A").unwrap().calories, 400);
        assert_eq!(catalog.get("B").unwrap().ingredients[0].quantity, 50.0);
    }

    #[test]
    fn test_invalid_meal_rejected() {
        let json = r#"[{"id": "Z", "name": "Air", "kcal": 0}]"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidMeal { ref id, .. } if id == "Z"));
    }

    #[test]
    fn test_oversized_values_rejected() {
        let kcal = r#"[{"id": "A", "name": "Big", "kcal": 3000000000,
                        "ingredients": [{"name": "rice", "qty": 100}]}]"#;
        let err = parse_catalog(kcal).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidMeal { ref id, .. } if id == "A"));

        let protein = r#"[{"id": "P", "name": "Shake", "kcal": 300, "protein": 2000000000}]"#;
        let err = parse_catalog(protein).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidMeal { ref reason, .. } if reason.contains("protein")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_catalog("{not json"), Err(PlannerError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_catalog("/definitely/not/here/meals.json"),
            Err(PlannerError::Io(_))
        ));
    }

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"trials": 12, "sample_size": 3}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.trials, 12);
        assert_eq!(config.sample_size, 3);
    }

    #[test]
    fn test_load_config_rejects_zero_knobs() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"trials": 0}"#).unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_report_roundtrip() {
        let report = PlanReport {
            tdee: 2000,
            target_kcal: 1500,
            days: 1,
            meals_per_day: 2,
            macros: MacroTargets {
                protein_g: 113,
                carbs_g: 150,
                fat_g: 50,
            },
            plan: vec![DayReport {
                meals: vec![
                    MealSummary {
                        id: "A".to_string(),
                        name: "Rice Bowl".to_string(),
                        calories: 700,
                    },
                    MealSummary {
                        id: "B".to_string(),
                        name: "Bean Chili".to_string(),
                        calories: 800,
                    },
                ],
                total_kcal: 1500,
            }],
            grocery: BTreeMap::from([("rice".to_string(), 100.0), ("beans".to_string(), 50.0)]),
        };

        let file = NamedTempFile::new().unwrap();
        save_report(file.path(), &report).unwrap();
        let reloaded = load_report(file.path()).unwrap();
        assert_eq!(reloaded, report);
    }
}
