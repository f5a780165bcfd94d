use crate::models::{GroceryList, Meal, Plan};

/// Sum ingredient quantities over every meal instance in the plan.
///
/// Repeated meals contribute once per occurrence. No unit conversion is done.
pub fn aggregate_grocery(plan: &Plan) -> GroceryList {
    aggregate_meals(plan.meals())
}

/// Sum ingredient quantities over an arbitrary sequence of meal instances.
pub fn aggregate_meals<'a, I>(meals: I) -> GroceryList
where
    I: IntoIterator<Item = &'a Meal>,
{
    let mut grocery = GroceryList::new();
    for meal in meals {
        for ingredient in &meal.ingredients {
            *grocery.entry(ingredient.name.clone()).or_insert(0.0) += ingredient.quantity;
        }
    }
    grocery
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, Ingredient};

    fn meal(id: &str, ingredients: &[(&str, f64)]) -> Meal {
        Meal {
            id: id.to_string(),
            name: id.to_string(),
            calories: 400,
            protein: 0,
            carbs: 0,
            fat: 0,
            tags: Default::default(),
            ingredients: ingredients
                .iter()
                .map(|(name, qty)| Ingredient::new(*name, *qty))
                .collect(),
        }
    }

    #[test]
    fn test_empty_plan() {
        assert!(aggregate_grocery(&Plan::default()).is_empty());
    }

    #[test]
    fn test_duplicate_meal_doubles() {
        let a = meal("a", &[("rice", 100.0), ("beans", 50.0)]);
        let plan = Plan::new(vec![DayPlan::new(vec![&a, &a])]);
        let grocery = aggregate_grocery(&plan);
        assert_eq!(grocery["rice"], 200.0);
        assert_eq!(grocery["beans"], 100.0);
    }

    #[test]
    fn test_shared_ingredients_sum_across_days() {
        let a = meal("a", &[("rice", 100.0)]);
        let b = meal("b", &[("rice", 75.0), ("egg", 2.0)]);
        let plan = Plan::new(vec![DayPlan::new(vec![&a, &b]), DayPlan::new(vec![&b, &b])]);
        let grocery = aggregate_grocery(&plan);
        assert_eq!(grocery.len(), 2);
        assert_eq!(grocery["rice"], 325.0);
        assert_eq!(grocery["egg"], 6.0);
    }

    #[test]
    fn test_keys_sorted() {
        let a = meal("a", &[("zucchini", 1.0), ("apple", 1.0)]);
        let grocery = aggregate_meals([&a]);
        let keys: Vec<&String> = grocery.keys().collect();
        assert_eq!(keys, vec!["apple", "zucchini"]);
    }
}
