//! HTTP transport shared by the gateway

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
