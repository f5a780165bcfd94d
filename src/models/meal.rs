use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::planner::constants::{
    KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN, MAX_MACRO_GRAMS, MAX_MEAL_KCAL,
};

pub const TAG_VEGETARIAN: &str = "vegetarian";
pub const TAG_VEGAN: &str = "vegan";
pub const TAG_DAIRY_FREE: &str = "dairy_free";
pub const TAG_GLUTEN_FREE: &str = "gluten_free";

/// Energy of the given macro grams, saturating at `u32::MAX`.
pub fn macro_kcal(protein_g: u32, carbs_g: u32, fat_g: u32) -> u32 {
    let kcal = f64::from(protein_g) * KCAL_PER_G_PROTEIN
        + f64::from(carbs_g) * KCAL_PER_G_CARB
        + f64::from(fat_g) * KCAL_PER_G_FAT;
    kcal.round() as u32
}

/// One ingredient line of a meal.
///
/// Quantities are opaque magnitudes; ingredients sharing a name are assumed
/// to share a unit across the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    #[serde(alias = "qty")]
    pub quantity: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A catalog meal with its nutrition and dietary tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,

    pub name: String,

    #[serde(alias = "kcal")]
    pub calories: u32,

    #[serde(default)]
    pub protein: u32,

    #[serde(default, alias = "carb")]
    pub carbs: u32,

    #[serde(default)]
    pub fat: u32,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Meal {
    /// Whether the meal carries the given dietary tag.
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Calories implied by the macro grams.
    pub fn macro_calories(&self) -> u32 {
        macro_kcal(self.protein, self.carbs, self.fat)
    }

    /// Catalog-level validation: bounded calories and macros, unique ingredient names.
    ///
    /// Returns the reason the meal is rejected, if any.
    pub fn validate(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("empty identifier".to_string());
        }
        if self.calories == 0 {
            return Some("calories must be positive".to_string());
        }
        if self.calories > MAX_MEAL_KCAL {
            return Some(format!("calories exceed {}", MAX_MEAL_KCAL));
        }
        let macros = [("protein", self.protein), ("carbs", self.carbs), ("fat", self.fat)];
        for (label, grams) in macros {
            if grams > MAX_MACRO_GRAMS {
                return Some(format!("{} exceeds {} g", label, MAX_MACRO_GRAMS));
            }
        }

        let mut seen = HashSet::new();
        for ingredient in &self.ingredients {
            if !seen.insert(ingredient.name.as_str()) {
                return Some(format!("duplicate ingredient '{}'", ingredient.name));
            }
            if ingredient.quantity < 0.0 {
                return Some(format!("negative quantity for '{}'", ingredient.name));
            }
        }

        None
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal, P:{} C:{} F:{}, tags:[{}]",
            self.name,
            self.id,
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.tags.iter().cloned().collect::<Vec<_>>().join(",")
        )
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Meal {}

impl std::hash::Hash for Meal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
