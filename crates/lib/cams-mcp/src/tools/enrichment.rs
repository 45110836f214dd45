use cams_client::CatalogService;
use cams_core::control::{MetadataEnrichmentCreationRequest, NameList};
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

/// A name list accepted as a single string, a comma-joined string, or an
/// array of strings.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum NamesParam {
    One(String),
    Many(Vec<String>),
}

impl From<NamesParam> for NameList {
    fn from(param: NamesParam) -> Self {
        match param {
            NamesParam::One(value) => Self::One(value),
            NamesParam::Many(values) => Self::Many(values),
        }
    }
}

/// Enrichment-creation request fields.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct EnrichmentCreationRequestParams {
    /// Project name or UUID the asset is created in.
    pub project_name: String,
    /// Name of the new metadata enrichment asset.
    pub metadata_enrichment_name: String,
    /// Category names or UUIDs to associate.
    pub category_names: NamesParam,
    /// Dataset names or UUIDs to enrich; resolved within the project.
    pub dataset_names: NamesParam,
    /// Objective names: profile, dq_gen_constraints, analyze_quality,
    /// semantic_expansion.
    pub objective_names: NamesParam,
}

impl From<EnrichmentCreationRequestParams> for MetadataEnrichmentCreationRequest {
    fn from(params: EnrichmentCreationRequestParams) -> Self {
        Self {
            project_name: params.project_name,
            metadata_enrichment_name: params.metadata_enrichment_name,
            category_names: params.category_names.into(),
            dataset_names: params.dataset_names.into(),
            objective_names: params.objective_names.into(),
        }
    }
}

/// Object-parameter wrapper for `create_metadata_enrichment_asset`.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateMetadataEnrichmentAssetParams {
    pub request: EnrichmentCreationRequestParams,
}

#[tool_router(router = tool_router_enrichment, vis = "pub")]
impl<S: CatalogService + 'static> CamsMcp<S> {
    #[tool(description = "Create a new metadata enrichment asset within a \
project, defining its name, associated categories, datasets, and objectives. The datasets must \
exist within the project and must not already be assigned to another enrichment asset. Supported \
objectives are 'profile', 'dq_gen_constraints', 'analyze_quality', and 'semantic_expansion'. \
Returns the creation operation record; the enrichment job itself runs asynchronously in the \
catalog service.")]
    async fn create_metadata_enrichment_asset(
        &self,
        Parameters(params): Parameters<CreateMetadataEnrichmentAssetParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let operation = self
            .control()
            .create_metadata_enrichment_asset(params.request.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(operation)?]))
    }

    #[tool(description = "Create a new metadata enrichment asset within a \
project, defining its name, associated categories, datasets, and objectives. The datasets must \
exist within the project and must not already be assigned to another enrichment asset. Supported \
objectives are 'profile', 'dq_gen_constraints', 'analyze_quality', and 'semantic_expansion'. \
Returns the creation operation record; the enrichment job itself runs asynchronously in the \
catalog service.")]
    async fn create_metadata_enrichment_asset_flat(
        &self,
        Parameters(params): Parameters<EnrichmentCreationRequestParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let operation = self
            .control()
            .create_metadata_enrichment_asset(params.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(operation)?]))
    }
}
