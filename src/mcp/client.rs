use crate::error::{Result, RohBotError};
use crate::mcp::types::{IngredientsPayload, Recipe, RecipeList};
use serde_json::Value;

/// Thin HTTP wrapper over the recipe/shopping-list service. The service is
/// externally authoritative: no caching, every read hits the remote state.
pub struct McpClient {
    base_url: String,
    http: reqwest::Client,
}

impl McpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RohBotError::ApiError { status, message });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn post_json(&self, path: &str, body: Option<&IngredientsPayload>) -> Result<Value> {
        let mut request = self.http.post(format!("{}{}", self.base_url, path));
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RohBotError::ApiError { status, message });
        }

        Ok(response.json::<Value>().await?)
    }

    /// Search recipes by any combination of diet, meal type and name. Only
    /// the supplied non-empty filters end up in the query string.
    pub async fn search_recipes(
        &self,
        diet: Option<&str>,
        meal_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(diet) = diet.filter(|s| !s.is_empty()) {
            query.push(("diet", diet));
        }
        if let Some(meal_type) = meal_type.filter(|s| !s.is_empty()) {
            query.push(("meal_type", meal_type));
        }
        if let Some(name) = name.filter(|s| !s.is_empty()) {
            query.push(("name", name));
        }
        self.get_json("/search_recipes", &query).await
    }

    pub async fn get_all_recipes(&self) -> Result<Value> {
        self.get_json("/get_recipes", &[]).await
    }

    pub async fn add_ingredients(&self, ingredients: &[String]) -> Result<Value> {
        let payload = IngredientsPayload {
            ingredients: ingredients.to_vec(),
        };
        self.post_json("/add_ingredients", Some(&payload)).await
    }

    /// Ingredients absent from the list are ignored by the service; removal
    /// is a no-op for them, not an error.
    pub async fn remove_ingredients(&self, ingredients: &[String]) -> Result<Value> {
        let payload = IngredientsPayload {
            ingredients: ingredients.to_vec(),
        };
        self.post_json("/remove_ingredients", Some(&payload)).await
    }

    pub async fn get_shopping_list(&self) -> Result<Value> {
        self.get_json("/get_shopping_list", &[]).await
    }

    pub async fn clear_shopping_list(&self) -> Result<Value> {
        self.post_json("/clear_shopping_list", None).await
    }

    /// Look up one recipe by (partial) name. The first match wins when the
    /// service returns several; `Ok(None)` when there is no match at all.
    pub async fn find_recipe(&self, name: &str) -> Result<Option<Recipe>> {
        let value = self.search_recipes(None, None, Some(name)).await?;
        let list: RecipeList = serde_json::from_value(value)?;
        Ok(list.recipes.into_iter().next())
    }
}
