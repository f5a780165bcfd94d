use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::models::{ActivityLevel, Biometrics, EnergySource, PlanRequest, Preferences, Sex};
use crate::planner::calculations::{height_cm_from_imperial, kg_from_lb};
use crate::planner::constants::*;
use crate::state::MealCatalog;

/// Parse a trimmed answer, falling back to `default` when blank or malformed.
pub fn parse_or<T: FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}

/// Parse a positive number; blank, malformed, zero or negative gives `None`.
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| *v > 0.0)
}

fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?)
}

fn prompt_optional(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt for a directly known TDEE. Blank or unparseable means "estimate it".
pub fn prompt_known_tdee() -> Result<Option<f64>> {
    let input = prompt_optional("Known TDEE in kcal (press Enter to estimate from biometrics)")?;
    Ok(parse_positive(&input))
}

/// Prompt for sex, age, height and weight.
pub fn prompt_biometrics() -> Result<Biometrics> {
    let sexes = ["male", "female", "other"];
    let sex_idx = Select::new()
        .with_prompt("Sex")
        .items(&sexes[..])
        .default(0)
        .interact()?;
    let sex = Sex::parse(sexes[sex_idx]);

    let age = prompt_text("Age (years)", &DEFAULT_AGE_YEARS.to_string())?;
    let age_years = parse_or(&age, DEFAULT_AGE_YEARS);

    let imperial = Select::new()
        .with_prompt("Units")
        .items(&["metric (cm, kg)", "imperial (ft/in, lb)"][..])
        .default(0)
        .interact()?
        == 1;

    let (height_cm, weight_kg) = if imperial {
        let feet = parse_or(&prompt_text("Height (feet)", "5")?, 0.0);
        let inches = parse_or(&prompt_text("Height (inches)", "9")?, 0.0);
        let height = Some(height_cm_from_imperial(feet, inches)).filter(|h| *h > 0.0);
        let weight = parse_positive(&prompt_text("Weight (lb)", "176")?).map(kg_from_lb);
        (
            height.unwrap_or(DEFAULT_HEIGHT_CM),
            weight.unwrap_or(DEFAULT_WEIGHT_KG),
        )
    } else {
        let height = parse_positive(&prompt_text("Height (cm)", &DEFAULT_HEIGHT_CM.to_string())?);
        let weight = parse_positive(&prompt_text("Weight (kg)", &DEFAULT_WEIGHT_KG.to_string())?);
        (
            height.unwrap_or(DEFAULT_HEIGHT_CM),
            weight.unwrap_or(DEFAULT_WEIGHT_KG),
        )
    };

    Ok(Biometrics {
        sex,
        age_years,
        height_cm,
        weight_kg,
    })
}

/// Prompt for the activity level.
pub fn prompt_activity() -> Result<ActivityLevel> {
    let options: Vec<String> = ActivityLevel::ALL
        .iter()
        .map(|level| format!("{} (x{})", level.key(), level.factor()))
        .collect();

    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(ActivityLevel::ALL
        .get(selection)
        .copied()
        .unwrap_or_default())
}

/// Prompt for dietary flags and exclusions.
///
/// Exclude terms that match nothing in the catalog get a "did you mean" hint.
pub fn prompt_preferences(catalog: &MealCatalog) -> Result<Preferences> {
    let vegetarian = prompt_yes_no("Vegetarian?", false)?;
    let vegan = prompt_yes_no("Vegan?", false)?;
    let dairy_free = prompt_yes_no("Dairy free?", false)?;
    let gluten_free = prompt_yes_no("Gluten free?", false)?;

    let raw = prompt_optional("Exclude ingredients or meals (comma-separated, Enter for none)")?;
    let prefs = Preferences {
        vegetarian,
        vegan,
        dairy_free,
        gluten_free,
        excludes: Vec::new(),
    }
    .with_excludes(&raw);

    report_unmatched_excludes(catalog, &prefs);
    Ok(prefs)
}

/// Tell the user about exclude terms that will have no effect.
pub fn report_unmatched_excludes(catalog: &MealCatalog, prefs: &Preferences) {
    for term in catalog.unmatched_excludes(&prefs.excludes) {
        match catalog.suggest(term) {
            Some(suggestion) => {
                println!("'{}' matches nothing. Did you mean '{}'?", term, suggestion)
            }
            None => println!("'{}' matches nothing in the catalog.", term),
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a complete planning request interactively.
pub fn collect_plan_request(catalog: &MealCatalog) -> Result<PlanRequest> {
    let energy = match prompt_known_tdee()? {
        Some(tdee) => EnergySource::KnownTdee(tdee),
        None => EnergySource::Estimated {
            biometrics: prompt_biometrics()?,
            activity: prompt_activity()?,
        },
    };

    let days = parse_or(
        &prompt_text(
            &format!("Days to plan ({}-{})", MIN_DAYS, MAX_DAYS),
            &DEFAULT_DAYS.to_string(),
        )?,
        DEFAULT_DAYS,
    );
    let meals_per_day = parse_or(
        &prompt_text(
            &format!("Meals per day ({}-{})", MIN_MEALS_PER_DAY, MAX_MEALS_PER_DAY),
            &DEFAULT_MEALS_PER_DAY.to_string(),
        )?,
        DEFAULT_MEALS_PER_DAY,
    );

    let preferences = prompt_preferences(catalog)?;

    Ok(PlanRequest::new(energy, days, meals_per_day, preferences))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or() {
        assert_eq!(parse_or(" 42 ", 30u32), 42);
        assert_eq!(parse_or("forty", 30u32), 30);
        assert_eq!(parse_or("", 3usize), 3);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("2100.5"), Some(2100.5));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-5"), None);
        assert_eq!(parse_positive("abc"), None);
        assert_eq!(parse_positive(""), None);
    }
}
