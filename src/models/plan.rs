use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::meal::macro_kcal;
use crate::models::Meal;

/// Ingredient name to total quantity, sorted by name.
pub type GroceryList = BTreeMap<String, f64>;

/// Daily macro targets in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl MacroTargets {
    /// Energy implied by the targets.
    pub fn kcal(&self) -> u32 {
        macro_kcal(self.protein_g, self.carbs_g, self.fat_g)
    }
}

/// The meals chosen for one day.
#[derive(Debug, Clone, Default)]
pub struct DayPlan<'a> {
    pub meals: Vec<&'a Meal>,
    pub total_kcal: u32,
}

impl<'a> DayPlan<'a> {
    pub fn new(meals: Vec<&'a Meal>) -> Self {
        let total_kcal = meals
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(m.calories));
        Self { meals, total_kcal }
    }

    /// Occurrences of each meal id in this day.
    pub fn meal_counts(&self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for meal in &self.meals {
            *counts.entry(meal.id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// A full multi-day plan.
#[derive(Debug, Clone, Default)]
pub struct Plan<'a> {
    pub days: Vec<DayPlan<'a>>,
}

impl<'a> Plan<'a> {
    pub fn new(days: Vec<DayPlan<'a>>) -> Self {
        Self { days }
    }

    /// Every meal instance across all days, in order.
    pub fn meals(&self) -> impl Iterator<Item = &'a Meal> + '_ {
        self.days.iter().flat_map(|d| d.meals.iter().copied())
    }

    /// Occurrences of each meal id across the plan.
    pub fn meal_counts(&self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for meal in self.meals() {
            *counts.entry(meal.id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn total_kcal(&self) -> u32 {
        self.days
            .iter()
            .fold(0u32, |acc, d| acc.saturating_add(d.total_kcal))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Owned summary of one planned meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    pub calories: u32,
}

impl From<&Meal> for MealSummary {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id.clone(),
            name: meal.name.clone(),
            calories: meal.calories,
        }
    }
}

/// Owned summary of one planned day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub meals: Vec<MealSummary>,
    pub total_kcal: u32,
}

/// The plain-data output of a planning run, detached from the catalog.
///
/// This is what gets stored under a token and handed to exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub tdee: i64,
    pub target_kcal: u32,
    pub days: usize,
    pub meals_per_day: usize,
    pub macros: MacroTargets,
    pub plan: Vec<DayReport>,
    pub grocery: GroceryList,
}
