use tracing::debug;

use crate::models::{
    Meal, Preferences, TAG_DAIRY_FREE, TAG_GLUTEN_FREE, TAG_VEGAN, TAG_VEGETARIAN,
};

/// Check the tag flags of a preference set against one meal.
fn satisfies_tags(meal: &Meal, prefs: &Preferences) -> bool {
    if prefs.vegan && !meal.has_tag(TAG_VEGAN) {
        return false;
    }
    if prefs.vegetarian && !(meal.has_tag(TAG_VEGETARIAN) || meal.has_tag(TAG_VEGAN)) {
        return false;
    }
    if prefs.dairy_free && !meal.has_tag(TAG_DAIRY_FREE) {
        return false;
    }
    if prefs.gluten_free && !meal.has_tag(TAG_GLUTEN_FREE) {
        return false;
    }
    true
}

/// Find the first exclude term hitting the meal name or one of its ingredients.
///
/// Matching is case-insensitive substring search on Unicode lowercase.
pub fn matching_exclude<'p>(meal: &Meal, excludes: &'p [String]) -> Option<&'p str> {
    if excludes.is_empty() {
        return None;
    }

    let name = meal.name.to_lowercase();
    let ingredients: Vec<String> = meal
        .ingredients
        .iter()
        .map(|i| i.name.to_lowercase())
        .collect();

    excludes
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .find(|term| {
            let term = term.to_lowercase();
            name.contains(&term) || ingredients.iter().any(|i| i.contains(&term))
        })
}

/// Whether a meal is compatible with the preferences.
pub fn is_compatible(meal: &Meal, prefs: &Preferences) -> bool {
    satisfies_tags(meal, prefs) && matching_exclude(meal, &prefs.excludes).is_none()
}

/// Narrow the catalog to meals compatible with the preferences.
///
/// Never fails; the result may be empty and the caller decides the fallback.
pub fn filter_meals<'a, I>(meals: I, prefs: &Preferences) -> Vec<&'a Meal>
where
    I: IntoIterator<Item = &'a Meal>,
{
    meals
        .into_iter()
        .filter(|meal| {
            let keep = is_compatible(meal, prefs);
            if !keep {
                debug!("Filtered out {}", meal.debug_string());
            }
            keep
        })
        .collect()
}
