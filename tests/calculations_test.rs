use assert_float_eq::*;

use home_meal_planner_rs::models::{ActivityLevel, Biometrics, EnergySource, Sex};
use home_meal_planner_rs::planner::{
    basal_metabolic_rate, grams_from_kcal, height_cm_from_imperial, kg_from_lb, resolve_tdee,
    target_kcal_from_tdee, total_daily_energy_expenditure,
};

#[test]
fn test_bmr_positive_for_realistic_inputs() {
    for sex in [Sex::Male, Sex::Female, Sex::Other] {
        for age in [18, 30, 55, 80] {
            for (height, weight) in [(150.0, 45.0), (175.0, 80.0), (200.0, 120.0)] {
                assert!(basal_metabolic_rate(sex, age, height, weight) > 0.0);
            }
        }
    }
}

#[test]
fn test_female_offset() {
    let male = basal_metabolic_rate(Sex::Male, 40, 165.0, 60.0);
    let female = basal_metabolic_rate(Sex::Female, 40, 165.0, 60.0);
    assert_float_absolute_eq!(male - female, 166.0, 1e-9);
}

#[test]
fn test_sedentary_tdee_is_bmr_times_factor() {
    for bmr in [1200.0, 1500.5, 1748.75, 2100.0] {
        let tdee = total_daily_energy_expenditure(bmr, ActivityLevel::Sedentary);
        assert_float_absolute_eq!(tdee, bmr * 1.2, 1e-9);
    }
}

#[test]
fn test_activity_factors_increase() {
    let bmr = 1600.0;
    let tdees: Vec<f64> = ActivityLevel::ALL
        .iter()
        .map(|&level| total_daily_energy_expenditure(bmr, level))
        .collect();
    for pair in tdees.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn test_known_tdee_bypasses_estimate() {
    assert_eq!(resolve_tdee(&EnergySource::KnownTdee(2400.4)), 2400);
    assert_eq!(target_kcal_from_tdee(2400), 1800);
}

#[test]
fn test_default_biometrics_estimate() {
    // Male, 30 y, 175 cm, 80 kg, sedentary: 1748.75 * 1.2 = 2098.5
    let energy = EnergySource::Estimated {
        biometrics: Biometrics::default(),
        activity: ActivityLevel::Sedentary,
    };
    let tdee = resolve_tdee(&energy);
    assert!((2098..=2099).contains(&tdee));
}

#[test]
fn test_macros_sum_close_to_target() {
    for kcal in [1200, 1500, 2000, 2033, 2750] {
        let macros = grams_from_kcal(kcal);
        let diff = (i64::from(macros.kcal()) - i64::from(kcal)).abs();
        assert!(diff <= 6, "{} kcal -> {:?} ({} kcal)", kcal, macros, macros.kcal());
    }
}

#[test]
fn test_imperial_conversions() {
    assert_float_absolute_eq!(height_cm_from_imperial(5.0, 9.0), 175.26, 1e-9);
    assert_float_absolute_eq!(kg_from_lb(176.0), 79.83225712, 1e-6);
}
