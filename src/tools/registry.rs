use crate::mcp::McpClient;
use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use super::builtins;

/// Settings shared by all tool handlers.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub plans_dir: PathBuf,
    pub verbose: bool,
}

type ToolHandler = Box<
    dyn for<'a> Fn(
            &'a McpClient,
            &'a ToolSettings,
            &'a Value,
        ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>
        + Send
        + Sync,
>;

pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

/// The fixed set of operations the model may request. Every tool wraps the
/// remote recipe/shopping-list service; all of them return text, even on
/// failure, so the model can always reason about the outcome.
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
    client: McpClient,
    settings: ToolSettings,
}

impl ToolRegistry {
    pub fn new(client: McpClient, settings: ToolSettings) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
            client,
            settings,
        };
        registry.register_builtin_tools();
        registry
    }

    fn register_builtin_tools(&mut self) {
        self.insert(Tool {
            name: "search_recipes".to_string(),
            description: "Hledej recepty podle diety (diet), typu jídla nebo chodu (meal_type) \
                          nebo jména (name). Parametry vyhledávání se dají kombinovat. Pokud \
                          nenajdeš žádné recepty, můžeš použít nástroj get_all_recipes."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "diet": {
                        "type": "string",
                        "description": "Filtr podle diety nebo kategorie stravování. Možnosti: 'bez laktozy', 'bezlepkové', 'high-protein', 'low-carb', 'masité', 'tučné', 'vegan', 'vegetarian'"
                    },
                    "meal_type": {
                        "type": "string",
                        "description": "Filtr podle typu jídla. Možnosti: 'desert', 'dochucovadlo', 'hlavní chod', 'polévka', 'pomazánka', 'předkrm', 'příloha', 'salát', 'snídaně'"
                    },
                    "name": {
                        "type": "string",
                        "description": "Vyhledá recepty podle názvu (částečná shoda)"
                    }
                },
                "additionalProperties": false
            }),
            handler: Box::new(|client, _settings, args| {
                Box::pin(builtins::handle_search_recipes(client, args))
            }),
        });

        self.insert(Tool {
            name: "get_all_recipes".to_string(),
            description: "Vrátí seznam všech dostupných receptů v databázi. Seznam je dlouhý, \
                          proto tento nástroj používej pouze pokud nenajdeš žádné recepty přes \
                          search_recipes."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            handler: Box::new(|client, _settings, args| {
                Box::pin(builtins::handle_get_all_recipes(client, args))
            }),
        });

        self.insert(Tool {
            name: "add_ingredients_to_shopping_list".to_string(),
            description: "Přidá více ingrediencí na nákupní seznam. Užitečné při plánování \
                          jídel nebo když si uživatel přeje přidat konkrétní položky."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ingredients": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "Názvy ingrediencí k přidání na nákupní seznam"
                    }
                },
                "required": ["ingredients"],
                "additionalProperties": false
            }),
            handler: Box::new(|client, _settings, args| {
                Box::pin(builtins::handle_add_ingredients(client, args))
            }),
        });

        self.insert(Tool {
            name: "remove_ingredients_from_shopping_list".to_string(),
            description: "Odstraní specifické ingredience z nákupního seznamu. Ingredience, \
                          které v seznamu nejsou, budou ignorovány."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ingredients": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Názvy ingrediencí k odstranění z nákupního seznamu"
                    }
                },
                "required": ["ingredients"],
                "additionalProperties": false
            }),
            handler: Box::new(|client, _settings, args| {
                Box::pin(builtins::handle_remove_ingredients(client, args))
            }),
        });

        self.insert(Tool {
            name: "get_shopping_list".to_string(),
            description: "Vrátí obsah aktuálního nákupního seznamu se všemi položkami."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            handler: Box::new(|client, _settings, args| {
                Box::pin(builtins::handle_get_shopping_list(client, args))
            }),
        });

        self.insert(Tool {
            name: "clear_shopping_list".to_string(),
            description: "Odstraní všechny položky z nákupního seznamu. Použij, když chce \
                          uživatel začít znovu nebo již dokončil nákup."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            handler: Box::new(|client, _settings, args| {
                Box::pin(builtins::handle_clear_shopping_list(client, args))
            }),
        });

        self.insert(Tool {
            name: "create_meal_plan".to_string(),
            description: "Vytvoří strukturovaný jídelníček na více dní, uloží jeho kompletní \
                          verzi s recepty do souboru a přidá ingredience na nákupní seznam. \
                          Použij po sestavení jídelníčku na několik dní dopředu."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Název jídelníčku"
                    },
                    "days": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "day_name": { "type": "string" },
                                "meals": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "meal_type": { "type": "string" },
                                            "recipe_name": { "type": "string" }
                                        },
                                        "required": ["meal_type", "recipe_name"]
                                    }
                                }
                            },
                            "required": ["day_name", "meals"]
                        },
                        "description": "Dny jídelníčku v pořadí, každý s jídly podle typu"
                    }
                },
                "required": ["title", "days"],
                "additionalProperties": false
            }),
            handler: Box::new(|client, settings, args| {
                Box::pin(builtins::handle_create_meal_plan(client, settings, args))
            }),
        });
    }

    fn insert(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn client(&self) -> &McpClient {
        &self.client
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Tool definitions in the chat-completions `tools` array shape.
    pub fn definitions(&self) -> Vec<Value> {
        let mut tools: Vec<&Tool> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.input_schema,
                    }
                })
            })
            .collect()
    }

    pub fn validate_arguments(&self, tool_name: &str, arguments: &Value) -> Result<(), String> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| format!("Tool '{}' not found", tool_name))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&tool.input_schema)
            .map_err(|e| format!("Invalid tool schema: {}", e))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(error_messages.join("; "));
        }

        Ok(())
    }

    /// Validate and dispatch one tool request. `Err` here means a protocol
    /// error (unknown tool, schema-invalid arguments); remote-service failures
    /// come back as `Ok` text per the adapter contract.
    pub async fn call_tool(&self, tool_name: &str, arguments: &Value) -> Result<String, String> {
        self.validate_arguments(tool_name, arguments)?;

        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| format!("Tool '{}' not found", tool_name))?;

        (tool.handler)(&self.client, &self.settings, arguments).await
    }
}
