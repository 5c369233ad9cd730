//! # RecipeBox Infrastructure
//!
//! Everything that talks to the outside world on behalf of the client.
//!
//! This crate contains:
//! - HTTP transport with a fixed per-call timeout and a cookie jar
//! - The request gateway: credential attachment and single-flight session
//!   refresh with replay
//! - Typed recipe, favorites, profile and authentication endpoints
//! - Configuration loading and credential store selection
//!
//! ## Architecture
//! - Depends on `recipebox-domain` and `recipebox-common`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod context;
pub mod credentials;
pub mod errors;
pub mod gateway;
pub mod http;

// Re-export commonly used items
pub use api::{AuthApi, ProfileApi, RecipeApi};
pub use context::ClientContext;
pub use credentials::build_credential_store;
pub use errors::InfraError;
pub use gateway::{
    FormPart, GatewayError, GatewayErrorCategory, GatewayResponse, RequestBody, RequestGateway,
    RequestSpec,
};
pub use http::{HttpClient, HttpClientBuilder};
