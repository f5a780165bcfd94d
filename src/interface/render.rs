use crate::models::{Meal, PlanReport};

/// Format a quantity without a trailing `.0` for whole numbers.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        format!("{:.2}", quantity)
    }
}

/// Render a plan report as plain text.
///
/// This is the human-readable export; JSON export goes through `state::save_report`.
pub fn format_report(report: &PlanReport, token: Option<&str>) -> String {
    let mut lines = vec!["=== Meal Plan ===".to_string()];
    if let Some(token) = token {
        lines.push(format!("Plan token: {}", token));
    }

    lines.push(String::new());
    lines.push(format!("TDEE:   {} kcal", report.tdee));
    lines.push(format!("Target: {} kcal/day", report.target_kcal));
    lines.push(format!(
        "Macros: P {}g | C {}g | F {}g",
        report.macros.protein_g, report.macros.carbs_g, report.macros.fat_g
    ));

    // Align meal names across all days
    let max_name_len = report
        .plan
        .iter()
        .flat_map(|d| d.meals.iter().map(|m| m.name.len()))
        .max()
        .unwrap_or(10);

    for (i, day) in report.plan.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("--- Day {} ({} kcal) ---", i + 1, day.total_kcal));
        for (slot, meal) in day.meals.iter().enumerate() {
            lines.push(format!(
                "{:>3}. {:<width$} - {:>4} kcal",
                slot + 1,
                meal.name,
                meal.calories,
                width = max_name_len
            ));
        }
    }

    lines.push(String::new());
    lines.push("--- Grocery List ---".to_string());
    if report.grocery.is_empty() {
        lines.push("(nothing to buy)".to_string());
    }
    for (name, quantity) in &report.grocery {
        lines.push(format!("  {} x {}", name, format_quantity(*quantity)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Print a plan report to stdout.
pub fn display_report(report: &PlanReport, token: Option<&str>) {
    println!();
    print!("{}", format_report(report, token));
    println!();
}

/// Display a list of meals with their details.
pub fn display_meal_list(meals: &[&Meal], title: &str) {
    if meals.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} meals) ===", title, meals.len());
    println!();

    for meal in meals {
        let tags = meal.tags.iter().cloned().collect::<Vec<_>>().join(", ");
        println!(
            "  [{}] {} - {} kcal, P:{} C:{} F:{}{}",
            meal.id,
            meal.name,
            meal.calories,
            meal.protein,
            meal.carbs,
            meal.fat,
            if tags.is_empty() {
                String::new()
            } else {
                format!("  ({})", tags)
            }
        );
    }

    println!();
}

/// Print one meal with its ingredients.
pub fn display_meal_detail(meal: &Meal) {
    println!();
    println!("=== {} [{}] ===", meal.name, meal.id);
    println!(
        "{} kcal  |  P {}g  C {}g  F {}g  ({} kcal from macros)",
        meal.calories,
        meal.protein,
        meal.carbs,
        meal.fat,
        meal.macro_calories()
    );
    if !meal.tags.is_empty() {
        let tags: Vec<&str> = meal.tags.iter().map(String::as_str).collect();
        println!("Tags: {}", tags.join(", "));
    }
    println!("Ingredients:");
    for ingredient in &meal.ingredients {
        println!("  {} x {}", ingredient.name, format_quantity(ingredient.quantity));
    }
    println!();
}
