//! Domain types and models

pub mod recipe;
pub mod user;

pub use recipe::{ImageUpload, Recipe, RecipeDraft};
pub use user::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, UserProfile};
