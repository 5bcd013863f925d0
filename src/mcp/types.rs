use serde::{Deserialize, Serialize};

/// A recipe as returned by the remote service. Only `name` is guaranteed;
/// everything else depends on how complete the catalog entry is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
}

impl Recipe {
    /// Placeholder for a recipe the service could not find; keeps the name so
    /// rendering can still reference it.
    pub fn not_found(name: &str) -> Self {
        Self {
            name: name.to_string(),
            meal_type: None,
            diet: None,
            ingredients: Vec::new(),
            steps: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeList {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsPayload {
    pub ingredients: Vec<String>,
}
