//! Typed RecipeBox API
//!
//! Thin collaborators over [`crate::gateway::RequestGateway`]: they build
//! request specs, unwrap the server's response envelopes and leave session
//! recovery entirely to the gateway.

pub mod auth;
mod envelope;
pub mod profile;
pub mod recipes;

pub use auth::AuthApi;
pub use profile::ProfileApi;
pub use recipes::RecipeApi;
