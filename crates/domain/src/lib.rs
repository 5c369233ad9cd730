//! # RecipeBox Domain
//!
//! Business domain types and models for the RecipeBox client.
//!
//! This crate contains:
//! - Recipe and user data types exchanged with the RecipeBox API
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and listing helpers (search, pagination)
//!
//! ## Architecture
//! - No dependencies on other RecipeBox crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::listing::{filter_by_name, paginate, Page};
