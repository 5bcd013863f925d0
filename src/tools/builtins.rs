use crate::error::Result as RbResult;
use crate::mcp::McpClient;
use crate::tools::meal_plan::{self, MealPlan};
use crate::tools::registry::ToolSettings;
use serde_json::Value;

/// Re-serialize a service payload so the model sees readable JSON.
fn pretty(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

/// Adapter error policy: remote failures become descriptive text results,
/// never faults, so the model can retry or explain them to the user.
fn absorb(result: RbResult<Value>, context: &str) -> String {
    match result {
        Ok(data) => pretty(&data),
        Err(e) => format!("Error {}: {}", context, e),
    }
}

pub async fn handle_search_recipes(client: &McpClient, args: &Value) -> Result<String, String> {
    let diet = args.get("diet").and_then(|v| v.as_str());
    let meal_type = args.get("meal_type").and_then(|v| v.as_str());
    let name = args.get("name").and_then(|v| v.as_str());

    Ok(absorb(
        client.search_recipes(diet, meal_type, name).await,
        "searching recipes",
    ))
}

pub async fn handle_get_all_recipes(client: &McpClient, _args: &Value) -> Result<String, String> {
    Ok(absorb(client.get_all_recipes().await, "getting recipes"))
}

fn ingredients_arg(args: &Value) -> Result<Vec<String>, String> {
    args.get("ingredients")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .ok_or_else(|| "Missing required argument: ingredients".to_string())
}

pub async fn handle_add_ingredients(client: &McpClient, args: &Value) -> Result<String, String> {
    let ingredients = ingredients_arg(args)?;
    Ok(absorb(
        client.add_ingredients(&ingredients).await,
        "adding ingredients",
    ))
}

pub async fn handle_remove_ingredients(client: &McpClient, args: &Value) -> Result<String, String> {
    let ingredients = ingredients_arg(args)?;
    Ok(absorb(
        client.remove_ingredients(&ingredients).await,
        "removing ingredients",
    ))
}

pub async fn handle_get_shopping_list(client: &McpClient, _args: &Value) -> Result<String, String> {
    Ok(absorb(
        client.get_shopping_list().await,
        "getting shopping list",
    ))
}

pub async fn handle_clear_shopping_list(
    client: &McpClient,
    _args: &Value,
) -> Result<String, String> {
    Ok(absorb(
        client.clear_shopping_list().await,
        "clearing shopping list",
    ))
}

pub async fn handle_create_meal_plan(
    client: &McpClient,
    settings: &ToolSettings,
    args: &Value,
) -> Result<String, String> {
    let plan: MealPlan = serde_json::from_value(args.clone())
        .map_err(|e| format!("Error creating meal plan: invalid arguments: {}", e))?;

    Ok(meal_plan::create_meal_plan(client, settings, &plan).await)
}
