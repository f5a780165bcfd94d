use std::collections::{BTreeSet, HashMap};

use strsim::jaro_winkler;
use tracing::warn;

use crate::error::{PlannerError, Result};
use crate::models::Meal;
use crate::planner::constants::SUGGESTION_THRESHOLD;
use crate::planner::filter::matching_exclude;

/// Read-only table of meals, indexed by identifier.
///
/// Built once at startup; planning only ever borrows from it.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    meals: Vec<Meal>,
    index: HashMap<String, usize>,
}

impl MealCatalog {
    /// Build a catalog. A repeated id replaces the earlier entry in place.
    pub fn new(meals: Vec<Meal>) -> Self {
        let mut catalog = Self::default();
        for meal in meals {
            match catalog.index.get(&meal.id) {
                Some(&idx) => {
                    warn!("Duplicate meal id '{}', keeping the last definition", meal.id);
                    catalog.meals[idx] = meal;
                }
                None => {
                    catalog.index.insert(meal.id.clone(), catalog.meals.len());
                    catalog.meals.push(meal);
                }
            }
        }
        catalog
    }

    /// Get a meal by id.
    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.index.get(id).map(|&idx| &self.meals[idx])
    }

    /// Get a meal by id, or fail with `MealNotFound`.
    pub fn require(&self, id: &str) -> Result<&Meal> {
        self.get(id)
            .ok_or_else(|| PlannerError::MealNotFound(id.to_string()))
    }

    /// All meals in catalog order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Meal> {
        self.meals.iter()
    }

    /// Borrow every meal, e.g. as an unfiltered planning pool.
    pub fn all(&self) -> Vec<&Meal> {
        self.meals.iter().collect()
    }

    /// Distinct ingredient names across the catalog.
    pub fn ingredient_names(&self) -> BTreeSet<&str> {
        self.meals
            .iter()
            .flat_map(|m| m.ingredients.iter().map(|i| i.name.as_str()))
            .collect()
    }

    /// Exclude terms that match no meal name or ingredient at all.
    pub fn unmatched_excludes<'p>(&self, excludes: &'p [String]) -> Vec<&'p str> {
        excludes
            .iter()
            .filter(|term| !term.trim().is_empty())
            .filter(|term| {
                let single = std::slice::from_ref(*term);
                !self
                    .meals
                    .iter()
                    .any(|m| matching_exclude(m, single).is_some())
            })
            .map(|term| term.as_str())
            .collect()
    }

    /// Closest ingredient or meal name to a term, if similar enough.
    pub fn suggest(&self, term: &str) -> Option<String> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }

        let names = self
            .ingredient_names()
            .into_iter()
            .chain(self.meals.iter().map(|m| m.name.as_str()));

        names
            .map(|name| (name, jaro_winkler(&name.to_lowercase(), &term)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name.to_string())
    }

    /// Count of meals in the catalog.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Check if the catalog has no meals.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

impl<'a> IntoIterator for &'a MealCatalog {
    type Item = &'a Meal;
    type IntoIter = std::slice::Iter<'a, Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.iter()
    }
}
