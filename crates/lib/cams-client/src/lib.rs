//! HTTP client and wire types for the CAMS metadata catalog.
//!
//! This crate defines the canonical wire model shared by the control plane
//! and the MCP surface, the `CatalogService` lookup contract, and the
//! reqwest-backed `CamsClient` implementation of it.

pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use client::CamsClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use service::CatalogService;
pub use types::*;
