use crate::models::{ActivityLevel, Biometrics, EnergySource, MacroTargets, Sex};
use crate::planner::constants::*;

/// Basal metabolic rate via Mifflin–St Jeor.
///
/// Inputs are not validated; nonsensical measurements give nonsensical results.
pub fn basal_metabolic_rate(sex: Sex, age_years: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let base = MSJ_WEIGHT_COEF * weight_kg + MSJ_HEIGHT_COEF * height_cm
        - MSJ_AGE_COEF * f64::from(age_years);

    match sex {
        Sex::Male => base + MSJ_MALE_OFFSET,
        Sex::Female | Sex::Other => base + MSJ_FEMALE_OFFSET,
    }
}

/// Total daily energy expenditure: BMR scaled by the activity factor.
pub fn total_daily_energy_expenditure(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.factor()
}

/// Resolve the TDEE for a request, rounded to the nearest kcal.
pub fn resolve_tdee(energy: &EnergySource) -> i64 {
    match *energy {
        EnergySource::KnownTdee(tdee) => tdee.round() as i64,
        EnergySource::Estimated {
            biometrics:
                Biometrics {
                    sex,
                    age_years,
                    height_cm,
                    weight_kg,
                },
            activity,
        } => {
            let bmr = basal_metabolic_rate(sex, age_years, height_cm, weight_kg);
            total_daily_energy_expenditure(bmr, activity).round() as i64
        }
    }
}

/// Daily calorie target: a fixed deficit below TDEE. Never negative.
pub fn target_kcal_from_tdee(tdee: i64) -> u32 {
    (tdee as f64 * DEFICIT_RATIO).round().max(0.0) as u32
}

/// Split a calorie target into macro grams (30/40/30 by energy).
pub fn grams_from_kcal(target_kcal: u32) -> MacroTargets {
    let kcal = f64::from(target_kcal);
    let grams = |share: f64, density: f64| (kcal * share / density).round().max(0.0) as u32;

    MacroTargets {
        protein_g: grams(PROTEIN_SHARE, KCAL_PER_G_PROTEIN),
        carbs_g: grams(CARB_SHARE, KCAL_PER_G_CARB),
        fat_g: grams(FAT_SHARE, KCAL_PER_G_FAT),
    }
}

/// Height in centimetres from feet and inches.
pub fn height_cm_from_imperial(feet: f64, inches: f64) -> f64 {
    (feet * INCHES_PER_FOOT + inches) * CM_PER_INCH
}

/// Weight in kilograms from pounds.
pub fn kg_from_lb(lb: f64) -> f64 {
    lb * KG_PER_LB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male_female_offset() {
        let male = basal_metabolic_rate(Sex::Male, 30, 175.0, 80.0);
        let female = basal_metabolic_rate(Sex::Female, 30, 175.0, 80.0);
        // 800 + 1093.75 - 150 + 5
        assert!((male - 1748.75).abs() < 1e-9);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_other_uses_female_offset() {
        let other = basal_metabolic_rate(Sex::Other, 40, 160.0, 60.0);
        let female = basal_metabolic_rate(Sex::Female, 40, 160.0, 60.0);
        assert_eq!(other, female);
    }

    #[test]
    fn test_tdee_factors() {
        let bmr = 1500.0;
        assert!((total_daily_energy_expenditure(bmr, ActivityLevel::Sedentary) - 1800.0).abs() < 1e-9);
        assert!((total_daily_energy_expenditure(bmr, ActivityLevel::VeryActive) - 2850.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_known_tdee_bypasses_bmr() {
        assert_eq!(resolve_tdee(&EnergySource::KnownTdee(2199.6)), 2200);
    }

    #[test]
    fn test_resolve_estimated() {
        let energy = EnergySource::Estimated {
            biometrics: Biometrics::default(),
            activity: ActivityLevel::Moderate,
        };
        // 1748.75 * 1.55 = 2710.5625
        assert_eq!(resolve_tdee(&energy), 2711);
    }

    #[test]
    fn test_target_kcal() {
        assert_eq!(target_kcal_from_tdee(2000), 1500);
        assert_eq!(target_kcal_from_tdee(2711), 2033);
        assert_eq!(target_kcal_from_tdee(0), 0);
        assert_eq!(target_kcal_from_tdee(-100), 0);
    }

    #[test]
    fn test_grams_from_kcal() {
        let macros = grams_from_kcal(2000);
        assert_eq!(macros.protein_g, 150);
        assert_eq!(macros.carbs_g, 200);
        assert_eq!(macros.fat_g, 67);
    }

    #[test]
    fn test_unit_conversions() {
        assert!((height_cm_from_imperial(5.0, 10.0) - 177.8).abs() < 1e-9);
        assert!((kg_from_lb(100.0) - 45.359237).abs() < 1e-9);
    }
}
