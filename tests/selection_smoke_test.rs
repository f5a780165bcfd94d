use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use home_meal_planner_rs::models::{DayPlan, Ingredient, Meal, Plan};
use home_meal_planner_rs::planner::{aggregate_grocery, select_day, PlannerConfig};

fn make_meal(id: &str, calories: u32, ingredients: &[(&str, f64)]) -> Meal {
    Meal {
        id: id.to_string(),
        name: id.to_string(),
        calories,
        protein: 0,
        carbs: 0,
        fat: 0,
        tags: BTreeSet::new(),
        ingredients: ingredients
            .iter()
            .map(|(name, qty)| Ingredient::new(*name, *qty))
            .collect(),
    }
}

fn sample_meals() -> Vec<Meal> {
    vec![
        make_meal("porridge", 320, &[("oats", 80.0), ("milk", 200.0)]),
        make_meal("omelette", 410, &[("egg", 3.0), ("spinach", 40.0)]),
        make_meal("lentil_soup", 520, &[("lentils", 120.0), ("carrot", 1.0)]),
        make_meal("chicken_rice", 680, &[("chicken", 150.0), ("rice", 90.0)]),
        make_meal("yogurt", 180, &[("yogurt", 170.0)]),
    ]
}

#[test]
fn test_select_day_count_and_total() {
    let meals = sample_meals();
    let pool: Vec<&Meal> = meals.iter().collect();
    let config = PlannerConfig::default();
    let mut rng = StdRng::seed_from_u64(7);

    for meals_per_day in 2..=5 {
        for target in [900, 1500, 2100, 2800] {
            let day = select_day(target, &pool, meals_per_day, &config, &mut rng).unwrap();
            assert_eq!(day.meals.len(), meals_per_day);
            let sum: u32 = day.meals.iter().map(|m| m.calories).sum();
            assert_eq!(day.total_kcal, sum);
        }
    }
}

#[test]
fn test_two_meal_scenario_hits_target() {
    let a = make_meal("A", 400, &[("rice", 100.0)]);
    let b = make_meal("B", 600, &[("beans", 50.0)]);
    let pool = vec![&a, &b];
    let config = PlannerConfig::default();

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let day = select_day(1000, &pool, 2, &config, &mut rng).unwrap();
        assert_eq!(day.total_kcal, 1000, "seed {}", seed);
    }
}

#[test]
fn test_single_trial_config_still_fills_day() {
    let meals = sample_meals();
    let pool: Vec<&Meal> = meals.iter().collect();
    let one = PlannerConfig {
        trials: 1,
        sample_size: 1,
    };

    let mut rng = StdRng::seed_from_u64(3);
    let day = select_day(1700, &pool, 3, &one, &mut rng).unwrap();
    assert_eq!(day.meals.len(), 3);
}

#[test]
fn test_identical_meals_double_quantities() {
    let meal = make_meal("stew", 500, &[("beef", 200.0), ("potato", 2.5)]);
    let plan = Plan::new(vec![DayPlan::new(vec![&meal, &meal])]);

    let grocery = aggregate_grocery(&plan);
    assert_eq!(grocery["beef"], 400.0);
    assert_eq!(grocery["potato"], 5.0);
}

#[test]
fn test_grocery_round_trip_recovers_per_meal_quantities() {
    let meals = sample_meals();
    let pool: Vec<&Meal> = meals.iter().collect();
    let config = PlannerConfig::default();
    let mut rng = StdRng::seed_from_u64(11);

    let days = (0..4)
        .map(|_| select_day(1800, &pool, 4, &config, &mut rng).unwrap())
        .collect();
    let plan = Plan::new(days);
    let grocery = aggregate_grocery(&plan);
    let counts = plan.meal_counts();

    // Every ingredient name in the sample belongs to exactly one meal.
    for meal in &meals {
        let Some(&count) = counts.get(meal.id.as_str()) else {
            continue;
        };
        for ingredient in &meal.ingredients {
            let per_meal = grocery[&ingredient.name] / count as f64;
            assert!((per_meal - ingredient.quantity).abs() < 1e-9);
        }
    }
}

#[test]
fn test_different_seeds_vary_the_day() {
    let meals = sample_meals();
    let pool: Vec<&Meal> = meals.iter().collect();
    let config = PlannerConfig {
        trials: 1,
        sample_size: 1,
    };

    let days: BTreeSet<Vec<String>> = (0..20)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let day = select_day(1500, &pool, 3, &config, &mut rng).unwrap();
            day.meals.iter().map(|m| m.id.clone()).collect()
        })
        .collect();

    assert!(days.len() > 1);
}
