//! Response envelopes used by the RecipeBox API
//!
//! The server is inconsistent about wrapping: single resources arrive either
//! bare or under a named key depending on the endpoint.

use recipebox_domain::{Recipe, UserProfile};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecipeList {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Some endpoints answer with a list only wrapped, a few with a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecipeListEnvelope {
    Wrapped(RecipeList),
    Bare(Vec<Recipe>),
}

impl RecipeListEnvelope {
    pub(crate) fn into_recipes(self) -> Vec<Recipe> {
        match self {
            Self::Wrapped(list) => list.recipes,
            Self::Bare(recipes) => recipes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecipeEnvelope {
    Data { data: Recipe },
    Recipe { recipe: Recipe },
    Bare(Recipe),
}

impl RecipeEnvelope {
    pub(crate) fn into_recipe(self) -> Recipe {
        match self {
            Self::Data { data } => data,
            Self::Recipe { recipe } => recipe,
            Self::Bare(recipe) => recipe,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserEnvelope {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl UserEnvelope {
    pub(crate) fn into_user(self) -> UserProfile {
        match self {
            Self::Wrapped { user } => user,
            Self::Bare(user) => user,
        }
    }
}
