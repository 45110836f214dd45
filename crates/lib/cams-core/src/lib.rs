//! Core control plane for cams-mcp.
//!
//! This crate owns identifier resolution (names to UUIDs, with
//! mutual-exclusivity and exact-match guarantees), decoding of the nested
//! CAMS asset-metadata document, and assembly of metadata enrichment
//! creation requests. It is generic over the `CatalogService` lookup
//! contract defined in `cams-client`.

pub mod control;

pub use control::{CatalogControlPlane, ControlError};
