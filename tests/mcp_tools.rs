mod common;

use rohbot::mcp::McpClient;
use rohbot::tools::{ToolRegistry, ToolSettings};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn registry_for(base_url: &str, plans_dir: &TempDir) -> ToolRegistry {
    let client = McpClient::new(base_url);
    let settings = ToolSettings {
        plans_dir: plans_dir.path().to_path_buf(),
        verbose: false,
    };
    ToolRegistry::new(client, settings)
}

#[tokio::test]
async fn search_sends_exactly_the_supplied_filters() {
    let service = common::spawn(|_| (200, r#"{"recipes":[]}"#.to_string())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    let result = registry
        .call_tool(
            "search_recipes",
            &json!({"diet": "vegan", "name": "salat"}),
        )
        .await
        .unwrap();
    assert!(result.contains("recipes"));

    let targets = service.targets();
    assert_eq!(targets.len(), 1);
    let target = &targets[0];
    assert!(target.starts_with("/search_recipes?"));
    assert!(target.contains("diet=vegan"));
    assert!(target.contains("name=salat"));
    assert!(!target.contains("meal_type"));
}

#[tokio::test]
async fn search_without_filters_sends_no_query() {
    let service = common::spawn(|_| (200, r#"{"recipes":[]}"#.to_string())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    registry
        .call_tool("search_recipes", &json!({}))
        .await
        .unwrap();

    assert_eq!(service.targets(), vec!["/search_recipes".to_string()]);
}

#[tokio::test]
async fn search_result_is_reserialized_without_loss() {
    let payload = json!({
        "recipes": [
            {"name": "Palačinky", "meal_type": "snídaně", "ingredients": ["mouka", "mléko"]},
            {"name": "Hummus", "diet": "vegan"}
        ]
    });
    let body = payload.to_string();
    let service = common::spawn(move |_| (200, body.clone())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    let result = registry
        .call_tool("search_recipes", &json!({"diet": "vegetarian"}))
        .await
        .unwrap();

    let round_tripped: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(round_tripped, payload);
}

#[tokio::test]
async fn get_all_recipes_hits_the_catalog_endpoint() {
    let service = common::spawn(|_| (200, r#"{"recipes":[{"name":"Hummus"}]}"#.to_string())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    let result = registry
        .call_tool("get_all_recipes", &json!({}))
        .await
        .unwrap();

    assert!(result.contains("Hummus"));
    assert_eq!(service.targets(), vec!["/get_recipes".to_string()]);
}

/// In-memory shopping-list behavior matching the remote service contract.
fn shopping_list_handler(
    list: Arc<Mutex<Vec<String>>>,
) -> impl Fn(&common::ReceivedRequest) -> (u16, String) + Send + Sync {
    move |request| {
        let mut list = list.lock().unwrap();
        match request.target.as_str() {
            "/add_ingredients" => {
                let payload: Value = serde_json::from_str(&request.body).unwrap();
                for item in payload["ingredients"].as_array().unwrap() {
                    list.push(item.as_str().unwrap().to_string());
                }
                (200, json!({"status": "ok"}).to_string())
            }
            "/remove_ingredients" => {
                let payload: Value = serde_json::from_str(&request.body).unwrap();
                let to_remove: Vec<&str> = payload["ingredients"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect();
                // Absent items are ignored, not an error
                list.retain(|item| !to_remove.contains(&item.as_str()));
                (200, json!({"status": "ok"}).to_string())
            }
            "/get_shopping_list" => (200, json!({"shopping_list": *list}).to_string()),
            "/clear_shopping_list" => {
                list.clear();
                (200, json!({"status": "cleared"}).to_string())
            }
            _ => (404, json!({"error": "unknown endpoint"}).to_string()),
        }
    }
}

#[tokio::test]
async fn removing_absent_ingredients_is_a_noop() {
    let list = Arc::new(Mutex::new(Vec::new()));
    let service = common::spawn(shopping_list_handler(list.clone())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    registry
        .call_tool(
            "add_ingredients_to_shopping_list",
            &json!({"ingredients": ["mrkev", "cibule"]}),
        )
        .await
        .unwrap();

    let result = registry
        .call_tool(
            "remove_ingredients_from_shopping_list",
            &json!({"ingredients": ["brambory"]}),
        )
        .await
        .unwrap();
    assert!(!result.starts_with("Error"));

    let listing = registry
        .call_tool("get_shopping_list", &json!({}))
        .await
        .unwrap();
    let listing: Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(listing["shopping_list"], json!(["mrkev", "cibule"]));
}

#[tokio::test]
async fn clearing_twice_matches_clearing_once() {
    let list = Arc::new(Mutex::new(vec!["mrkev".to_string()]));
    let service = common::spawn(shopping_list_handler(list.clone())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    let first = registry
        .call_tool("clear_shopping_list", &json!({}))
        .await
        .unwrap();
    let second = registry
        .call_tool("clear_shopping_list", &json!({}))
        .await
        .unwrap();
    assert!(!first.starts_with("Error"));
    assert!(!second.starts_with("Error"));

    let listing = registry
        .call_tool("get_shopping_list", &json!({}))
        .await
        .unwrap();
    let listing: Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(listing["shopping_list"], json!([]));
}

#[tokio::test]
async fn remote_failures_become_prefixed_text_results() {
    let base_url = common::refused_url().await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&base_url, &plans);

    let search = registry
        .call_tool("search_recipes", &json!({"diet": "vegan"}))
        .await
        .unwrap();
    assert!(search.starts_with("Error searching recipes:"), "{}", search);

    let clear = registry
        .call_tool("clear_shopping_list", &json!({}))
        .await
        .unwrap();
    assert!(clear.starts_with("Error clearing shopping list:"), "{}", clear);

    let all = registry
        .call_tool("get_all_recipes", &json!({}))
        .await
        .unwrap();
    assert!(all.starts_with("Error getting recipes:"), "{}", all);
}

#[tokio::test]
async fn non_success_status_becomes_text_result() {
    let service = common::spawn(|_| (500, r#"{"error":"down"}"#.to_string())).await;
    let plans = TempDir::new().unwrap();
    let registry = registry_for(&service.base_url, &plans);

    let result = registry
        .call_tool("get_shopping_list", &json!({}))
        .await
        .unwrap();
    assert!(
        result.starts_with("Error getting shopping list:"),
        "{}",
        result
    );
}

#[tokio::test]
async fn unknown_tool_is_a_protocol_error() {
    let plans = TempDir::new().unwrap();
    let registry = registry_for("http://127.0.0.1:1", &plans);

    let result = registry.call_tool("order_pizza", &json!({})).await;
    assert!(result.unwrap_err().contains("not found"));
}

#[tokio::test]
async fn schema_invalid_arguments_are_rejected_before_dispatch() {
    let plans = TempDir::new().unwrap();
    let registry = registry_for("http://127.0.0.1:1", &plans);

    // Not an array
    let result = registry
        .call_tool(
            "add_ingredients_to_shopping_list",
            &json!({"ingredients": "mrkev"}),
        )
        .await;
    assert!(result.is_err());

    // Empty array violates minItems
    let result = registry
        .call_tool(
            "add_ingredients_to_shopping_list",
            &json!({"ingredients": []}),
        )
        .await;
    assert!(result.is_err());
}

#[test]
fn registry_exposes_all_seven_tools() {
    let client = McpClient::new("http://127.0.0.1:1");
    let settings = ToolSettings {
        plans_dir: std::path::PathBuf::from("plans"),
        verbose: false,
    };
    let registry = ToolRegistry::new(client, settings);

    assert_eq!(
        registry.names(),
        vec![
            "add_ingredients_to_shopping_list",
            "clear_shopping_list",
            "create_meal_plan",
            "get_all_recipes",
            "get_shopping_list",
            "remove_ingredients_from_shopping_list",
            "search_recipes",
        ]
    );

    let definitions = registry.definitions();
    assert_eq!(definitions.len(), 7);
    for definition in &definitions {
        assert_eq!(definition["type"], "function");
        assert!(definition["function"]["parameters"].is_object());
    }
}
