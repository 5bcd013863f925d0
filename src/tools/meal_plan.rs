use crate::mcp::{McpClient, Recipe};
use crate::tools::registry::ToolSettings;
use chrono::Local;
use colored::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical meal-type ordering; anything else renders after these, in
/// encounter order, with the default icon.
pub const MEAL_ORDER: [&str; 4] = ["snídaně", "oběd", "večeře", "svačina"];

pub fn meal_emoji(meal_type: &str) -> &'static str {
    match meal_type {
        "snídaně" => "🥐",
        "oběd" => "🍽️",
        "večeře" => "🌙",
        "svačina" => "🍪",
        _ => "🍽️",
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealPlan {
    pub title: String,
    pub days: Vec<MealPlanDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanDay {
    pub day_name: String,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meal {
    pub meal_type: String,
    pub recipe_name: String,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Meal types present in a day: the canonical four first, then unknown types
/// in the order they appear.
fn ordered_meal_types(day: &MealPlanDay) -> Vec<&str> {
    let present: Vec<&str> = day.meals.iter().map(|m| m.meal_type.as_str()).collect();
    let mut ordered: Vec<&str> = MEAL_ORDER
        .iter()
        .copied()
        .filter(|t| present.contains(t))
        .collect();
    for meal_type in present {
        if !MEAL_ORDER.contains(&meal_type) && !ordered.contains(&meal_type) {
            ordered.push(meal_type);
        }
    }
    ordered
}

fn recipes_for<'a>(day: &'a MealPlanDay, meal_type: &str) -> Vec<&'a str> {
    day.meals
        .iter()
        .filter(|m| m.meal_type == meal_type)
        .map(|m| m.recipe_name.as_str())
        .collect()
}

/// Distinct recipe names across all days, first-encounter order.
pub fn distinct_recipe_names(plan: &MealPlan) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for day in &plan.days {
        for meal in &day.meals {
            if seen.insert(meal.recipe_name.clone()) {
                names.push(meal.recipe_name.clone());
            }
        }
    }
    names
}

/// Short console rendering returned to the model as the tool result.
pub fn render_console(plan: &MealPlan) -> String {
    let mut output = format!("📅 JÍDELNÍČEK: {}\n\n", plan.title);

    for day in &plan.days {
        output.push_str(&format!("🗓️ {}:\n", day.day_name));
        for meal_type in ordered_meal_types(day) {
            let recipes = recipes_for(day, meal_type).join(", ");
            output.push_str(&format!("  • {}: {}\n", capitalize(meal_type), recipes));
        }
        output.push('\n');
    }

    output
}

pub struct RenderedDocument {
    pub content: String,
    pub recipes_count: usize,
    pub ingredients_count: usize,
}

/// The durable Markdown document: day listing with icons, a section with
/// every recipe the lookup actually found, and a summary with timestamp.
pub fn render_document(
    plan: &MealPlan,
    details: &[(String, Recipe)],
    timestamp: &str,
) -> RenderedDocument {
    let found: Vec<&Recipe> = details
        .iter()
        .map(|(_, recipe)| recipe)
        .filter(|recipe| !recipe.ingredients.is_empty())
        .collect();
    let found_names: HashSet<&str> = found.iter().map(|r| r.name.as_str()).collect();

    let mut text = format!("# {}\n\n", plan.title);
    text.push_str(&format!("*Počet dní: {}*\n\n", plan.days.len()));

    for day in &plan.days {
        text.push_str(&format!("🗓️ **{}:**\n", day.day_name));
        for meal_type in ordered_meal_types(day) {
            for recipe_name in recipes_for(day, meal_type) {
                let marker = if found_names.contains(recipe_name) {
                    ""
                } else {
                    " *(recept nenalezen)*"
                };
                text.push_str(&format!(
                    "  • {} {}: {}{}\n",
                    meal_emoji(meal_type),
                    capitalize(meal_type),
                    recipe_name,
                    marker
                ));
            }
        }
        text.push('\n');
    }

    text.push_str("---\n\n## Recepty\n\n");

    let mut all_ingredients: HashSet<&str> = HashSet::new();
    for recipe in &found {
        text.push_str(&format!("### {}\n\n", recipe.name));

        text.push_str("**Ingredience:**\n");
        for ingredient in &recipe.ingredients {
            all_ingredients.insert(ingredient.as_str());
            text.push_str(&format!("- {}\n", ingredient));
        }
        text.push('\n');

        if let Some(steps) = &recipe.steps {
            text.push_str(&format!("**Postup:**\n{}\n\n", steps));
        }
    }

    text.push_str("---\n\n## Shrnutí\n\n");
    text.push_str(&format!("- **Celkem receptů:** {}\n", found.len()));
    text.push_str(&format!(
        "- **Celkem ingrediencí:** {}\n\n",
        all_ingredients.len()
    ));
    text.push_str(&format!("*Jídelníček vytvořen: {}*\n", timestamp));

    RenderedDocument {
        ingredients_count: all_ingredients.len(),
        recipes_count: found.len(),
        content: text,
    }
}

/// Write the document under the plans directory, creating it if needed.
/// Filenames are timestamped so repeated plans never overwrite each other.
pub fn save_plan_document(plans_dir: &Path, content: &str) -> std::io::Result<PathBuf> {
    if !plans_dir.exists() {
        fs::create_dir_all(plans_dir)?;
    }

    let filename = format!(
        "jidelnicek_{}.md",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let filepath = plans_dir.join(filename);
    fs::write(&filepath, content)?;
    Ok(filepath)
}

/// Best-effort per-recipe enrichment: a lookup failure or empty match yields
/// a placeholder so one missing recipe never blocks the rest of the plan.
pub async fn fetch_recipe_details(
    client: &McpClient,
    names: &[String],
    verbose: bool,
) -> Vec<(String, Recipe)> {
    let mut details = Vec::with_capacity(names.len());

    for name in names {
        let detail = match client.find_recipe(name).await {
            Ok(Some(recipe)) => recipe,
            Ok(None) => {
                if verbose {
                    eprintln!(
                        "{}",
                        format!("[tools] No recipe found for '{}'", name).dimmed()
                    );
                }
                Recipe::not_found(name)
            }
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{}",
                        format!("[tools] Recipe lookup failed for '{}': {}", name, e).dimmed()
                    );
                }
                Recipe::not_found(name)
            }
        };
        details.push((name.clone(), detail));
    }

    details
}

/// The `create_meal_plan` tool body: render, persist, update the shopping
/// list, and return the console summary. Persistence and shopping-list
/// failures degrade the output text but never fail the tool.
pub async fn create_meal_plan(
    client: &McpClient,
    settings: &ToolSettings,
    plan: &MealPlan,
) -> String {
    let names = distinct_recipe_names(plan);
    let details = fetch_recipe_details(client, &names, settings.verbose).await;

    let mut output = render_console(plan);

    let missing: Vec<&str> = details
        .iter()
        .filter(|(_, recipe)| recipe.ingredients.is_empty())
        .map(|(name, _)| name.as_str())
        .collect();
    if !missing.is_empty() {
        output.push_str(&format!(
            "⚠️ Recepty nenalezeny v databázi: {}\n",
            missing.join(", ")
        ));
    }

    let timestamp = Local::now().format("%d.%m.%Y %H:%M:%S").to_string();
    let document = render_document(plan, &details, &timestamp);

    match save_plan_document(&settings.plans_dir, &document.content) {
        Ok(path) => {
            output.push_str(&format!(
                "\n💾 Kompletní jídelníček byl uložen jako: {}\n",
                path.display()
            ));
        }
        Err(e) => {
            if settings.verbose {
                eprintln!(
                    "{}",
                    format!("[tools] Failed to save meal plan document: {}", e).dimmed()
                );
            }
        }
    }

    // Every ingredient of every found recipe goes onto the shopping list
    let mut seen = HashSet::new();
    let mut all_ingredients: Vec<String> = Vec::new();
    for (_, recipe) in &details {
        for ingredient in &recipe.ingredients {
            if seen.insert(ingredient.clone()) {
                all_ingredients.push(ingredient.clone());
            }
        }
    }

    if !all_ingredients.is_empty() {
        match client.add_ingredients(&all_ingredients).await {
            Ok(_) => {
                output.push_str(&format!(
                    "\n🛒 NÁKUPNÍ SEZNAM AKTUALIZOVÁN:\nPřidáno {} ingrediencí na nákupní seznam.\n",
                    all_ingredients.len()
                ));
            }
            Err(e) => {
                output.push_str(&format!(
                    "\n⚠️ Nepodařilo se přidat ingredience na nákupní seznam: {}\n",
                    e
                ));
            }
        }
    }

    output
}
