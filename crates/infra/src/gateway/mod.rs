//! Request gateway
//!
//! Attaches credentials to outgoing calls and recovers from expired sessions
//! with a single shared refresh call.

pub mod client;
pub mod errors;
mod refresh;
pub mod request;

pub use client::{RequestGateway, RequestGatewayBuilder};
pub use errors::{GatewayError, GatewayErrorCategory};
pub use request::{FormPart, GatewayResponse, RequestBody, RequestSpec};
