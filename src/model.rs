use serde::{Deserialize, Serialize};

/// One instruction unit of a recipe, optionally carrying a countdown duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub timer_seconds: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Full recipe as returned by `GET /api/recipes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub servings: Option<String>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub total_time: Option<u32>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub created_at: String,
}

impl Recipe {
    /// Steps sorted by their `order` field; the backend usually returns them
    /// sorted already, but the session depends on it.
    pub fn ordered_steps(&self) -> Vec<Step> {
        let mut steps = self.steps.clone();
        steps.sort_by_key(|s| s.order);
        steps
    }
}

/// Slim recipe as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub total_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub household_id: String,
}

/// Events delivered to the UI thread. API results, status messages and cook
/// ticks all flow through the same channel so UI state mutations stay
/// serialized on one thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    RecipesLoaded {
        recipes: Vec<RecipeSummary>,
    },
    RecipeLoaded {
        // Box to keep AppEvent small; Recipe carries full step/ingredient lists.
        recipe: Box<Recipe>,
    },
    RecipeImported {
        recipe: Box<Recipe>,
    },
    ShoppingLoaded {
        lists: Vec<ShoppingList>,
    },
    ShoppingUpdated {
        list: Box<ShoppingList>,
    },
    ShoppingDeleted {
        list_id: String,
    },
    UserLoaded {
        user: UserInfo,
    },
    /// One-second cook timer tick, tagged with the session epoch it was
    /// scheduled under. Stale epochs are dropped by the session controller.
    CookTick {
        epoch: u64,
    },
    Info(InfoEvent),
}

/// Structured status events surfaced on the UI info line.
#[derive(Debug, Clone)]
pub enum InfoEvent {
    Message(String),
    ApiError { action: &'static str, error: String },
}

impl InfoEvent {
    /// Render a human-readable message for the status line.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::ApiError { action, error } => format!("{action} failed: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_deserializes_from_backend_shape() {
        let raw = r##"{
            "id": "r1",
            "household_id": "h1",
            "title": "Shakshuka",
            "description": "Eggs poached in tomato sauce",
            "image_url": null,
            "source_url": "https://example.com/shakshuka",
            "author": null,
            "servings": "4",
            "prep_time": 10,
            "cook_time": 25,
            "total_time": 35,
            "cuisine": "Middle Eastern",
            "category": "Breakfast",
            "cooking_method": null,
            "suitable_for_diet": null,
            "nutrition": null,
            "created_at": "2025-11-02T09:15:00",
            "updated_at": "2025-11-02T09:15:00",
            "tags": [{"id": "t1", "name": "eggs", "color": "#f59e0b"}],
            "ingredients": [
                {"id": "i1", "name": "Eggs", "quantity": "4", "unit": null, "notes": null, "order": 0}
            ],
            "steps": [
                {"id": "s1", "title": null, "description": "Soften the onions", "order": 0, "timer_seconds": null},
                {"id": "s2", "title": "Simmer", "description": "Simmer the sauce", "order": 1, "timer_seconds": 600}
            ]
        }"##;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.title, "Shakshuka");
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.steps[1].timer_seconds, Some(600));
        assert_eq!(recipe.tags[0].name, "eggs");
    }

    #[test]
    fn ordered_steps_sorts_by_order_field() {
        let mut recipe: Recipe = serde_json::from_str(
            r#"{"id": "r1", "title": "t", "steps": [
                {"id": "b", "description": "second", "order": 1},
                {"id": "a", "description": "first", "order": 0}
            ]}"#,
        )
        .unwrap();
        recipe.steps.reverse();
        let steps = recipe.ordered_steps();
        assert_eq!(steps[0].id, "a");
        assert_eq!(steps[1].id, "b");
    }

    #[test]
    fn summary_tolerates_missing_optionals() {
        let summary: RecipeSummary =
            serde_json::from_str(r#"{"id": "r2", "title": "Toast"}"#).unwrap();
        assert!(summary.tags.is_empty());
        assert_eq!(summary.total_time, None);
    }
}
