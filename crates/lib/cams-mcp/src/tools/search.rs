use cams_client::CatalogService;
use cams_core::control::GetAssetDetailsRequest;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{CamsMcp, helpers};

/// Asset-details request: the asset (name or UUID) plus at most one of
/// catalog/project. With neither, the platform assets catalog is searched.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AssetDetailsRequestParams {
    /// Asset name or UUID.
    pub asset: String,
    /// Catalog name or UUID; mutually exclusive with `project`.
    pub catalog: Option<String>,
    /// Project name or UUID; mutually exclusive with `catalog`.
    pub project: Option<String>,
}

impl From<AssetDetailsRequestParams> for GetAssetDetailsRequest {
    fn from(params: AssetDetailsRequestParams) -> Self {
        Self {
            asset: params.asset,
            catalog: params.catalog,
            project: params.project,
        }
    }
}

/// Object-parameter wrapper for `get_asset_details`.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetAssetDetailsParams {
    pub request: AssetDetailsRequestParams,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl<S: CatalogService + 'static> CamsMcp<S> {
    #[tool(description = "Retrieve the metadata of an asset in a catalog or \
project. Possible details include: asset usage, rov, member roles, collaborators, name, \
description, tags, type, origin country, resource key, ratings, creation time, owner, size, \
version, state, attributes, source-asset lineage, and entity information (columns etc.). \
`asset` is required (name or UUID). Pass at most one of `catalog`/`project`; with neither, the \
platform assets catalog is used.")]
    async fn get_asset_details(
        &self,
        Parameters(params): Parameters<GetAssetDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .control()
            .get_asset_details(params.request.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(response)?]))
    }

    #[tool(description = "Retrieve the metadata of an asset in a catalog or \
project. Possible details include: asset usage, rov, member roles, collaborators, name, \
description, tags, type, origin country, resource key, ratings, creation time, owner, size, \
version, state, attributes, source-asset lineage, and entity information (columns etc.). \
`asset` is required (name or UUID). Pass at most one of `catalog`/`project`; with neither, the \
platform assets catalog is used.")]
    async fn get_asset_details_flat(
        &self,
        Parameters(params): Parameters<AssetDetailsRequestParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .control()
            .get_asset_details(params.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(response)?]))
    }
}
