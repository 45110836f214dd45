//! MCP tool modules.
//!
//! Tools are grouped by domain: asset-metadata retrieval and metadata
//! enrichment. Each tool exists in an object-parameter form and a `*_flat`
//! form for orchestrators that cannot pass nested objects; both are thin
//! adapters over the same control-plane operation.

pub mod enrichment;
pub mod search;
