//! Recipe types
//!
//! Field names follow the RecipeBox API's JSON (`_id`, `createdBy`).

use serde::{Deserialize, Serialize};

use crate::errors::{RecipeBoxError, Result};

/// Recipe as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub created_by: String,
    /// Only present on listings that know the caller's favorites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl Recipe {
    pub fn is_favorite(&self) -> bool {
        self.favorite.unwrap_or(false)
    }
}

/// Image attached to a recipe create/edit submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for creating or editing a recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub duration: String,
    pub instructions: String,
    /// Sent as repeated `image` multipart fields; never serialized as JSON
    #[serde(skip)]
    pub images: Vec<ImageUpload>,
}

impl RecipeDraft {
    /// Drop blank ingredient rows left behind by the form and check the
    /// fields the API rejects outright.
    ///
    /// # Errors
    /// Returns `RecipeBoxError::InvalidInput` when the name is blank or no
    /// ingredient remains.
    pub fn normalized(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.ingredients = self
            .ingredients
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();

        if self.name.is_empty() {
            return Err(RecipeBoxError::InvalidInput("recipe name is required".into()));
        }
        if self.ingredients.is_empty() {
            return Err(RecipeBoxError::InvalidInput(
                "at least one ingredient is required".into(),
            ));
        }

        Ok(self)
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_shape() {
        let json = r#"{
            "_id": "r1",
            "name": "Pancakes",
            "description": "Fluffy",
            "ingredients": ["flour", "milk"],
            "duration": "20 min",
            "instructions": "Mix and fry",
            "image": "https://cdn.example.com/p.png",
            "createdBy": "u42"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, "r1");
        assert_eq!(recipe.created_by, "u42");
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(!recipe.is_favorite());
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let recipe: Recipe = serde_json::from_str(r#"{"_id":"r2","name":"Toast"}"#).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.favorite, None);
    }

    #[test]
    fn normalized_trims_and_drops_blank_ingredients() {
        let draft = RecipeDraft {
            name: "  Soup ".into(),
            ingredients: vec!["water".into(), "  ".into(), " salt".into()],
            ..Default::default()
        };

        let draft = draft.normalized().unwrap();
        assert_eq!(draft.name, "Soup");
        assert_eq!(draft.ingredients, vec!["water".to_string(), "salt".to_string()]);
    }

    #[test]
    fn normalized_rejects_empty_name_and_ingredients() {
        let no_name = RecipeDraft { ingredients: vec!["egg".into()], ..Default::default() };
        assert!(matches!(no_name.normalized(), Err(RecipeBoxError::InvalidInput(_))));

        let no_ingredients =
            RecipeDraft { name: "Air".into(), ingredients: vec![" ".into()], ..Default::default() };
        assert!(matches!(no_ingredients.normalized(), Err(RecipeBoxError::InvalidInput(_))));
    }

    #[test]
    fn draft_json_omits_images() {
        let draft = RecipeDraft {
            name: "Salad".into(),
            ingredients: vec!["lettuce".into()],
            images: vec![ImageUpload {
                filename: "s.png".into(),
                content_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("images").is_none());
        assert_eq!(json["name"], "Salad");
    }
}
