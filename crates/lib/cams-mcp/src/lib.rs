//! MCP server implementation for cams-mcp.
//!
//! This crate wires the catalog control plane into rmcp tool handlers and
//! exposes the MCP-facing API surface for asset retrieval and metadata
//! enrichment.

mod helpers;
mod tools;
pub mod server;

use cams_client::CatalogService;
use cams_core::CatalogControlPlane;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"cams-mcp provides MCP tools for working with assets in a CAMS metadata catalog.

Workflow:
1. Retrieve asset metadata with `get_asset_details`:
   - `asset` is required, either a name or a UUID.
   - Pass at most one of `catalog` / `project` (name or UUID); with neither,
     the platform assets catalog is used.
   - The response carries usage statistics, rights-of-visibility info
     (collaborators, member roles), source-asset lineage, and the raw
     `entity` section of the asset document.
2. Create enrichment jobs with `create_metadata_enrichment_asset`:
   - `project_name`, `metadata_enrichment_name`, `category_names`,
     `dataset_names`, and `objective_names` are required.
   - Name lists accept a single string, a comma-joined string, or an array.
   - Supported objectives: `profile`, `dq_gen_constraints`,
     `analyze_quality`, `semantic_expansion`.
   - Datasets already assigned to another enrichment asset in the project
     are rejected before anything is created.

Notes:
- Every tool has a `*_flat` twin taking the same parameters at the top level,
  for orchestrators that cannot pass nested objects.
- Names are matched exactly; when several entities share a name, the call
  fails and the UUID must be passed instead.
- `health` returns `ok`.";

/// MCP server wrapper around the catalog control plane and tool routers.
pub struct CamsMcp<S: CatalogService> {
    tool_router: ToolRouter<Self>,
    control: CatalogControlPlane<S>,
}

impl<S: CatalogService> Clone for CamsMcp<S> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<S: CatalogService + 'static> CamsMcp<S> {
    /// Creates a new server over a control plane.
    #[must_use]
    pub fn new(control: CatalogControlPlane<S>) -> Self {
        let tool_router =
            Self::tool_router_core() + Self::tool_router_search() + Self::tool_router_enrichment();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) const fn control(&self) -> &CatalogControlPlane<S> {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<S: CatalogService + 'static> CamsMcp<S> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<S: CatalogService + 'static> ServerHandler for CamsMcp<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
