//! Lookup-service contract consumed by the control plane.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::types::{
    AssetRef,
    ContainerScope,
    DataScopeOperation,
    EnrichmentAssetPayload,
    EnrichmentAssignment,
    EntityKind,
};

/// Narrow contract the identifier resolver and asset builder depend on.
///
/// `CamsClient` is the canonical implementation; tests substitute in-memory
/// fakes. Exactness is the implementor's responsibility: `find_by_exact_name`
/// must only return entities whose name equals `name` exactly.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Looks up entities of `kind` named exactly `name`, optionally scoped
    /// to a container. Returns every match; the caller decides how to treat
    /// zero or multiple hits.
    async fn find_by_exact_name(
        &self,
        kind: EntityKind,
        name: &str,
        scope: Option<&ContainerScope>,
    ) -> Result<Vec<AssetRef>, ClientError>;

    /// Identifier of the well-known platform assets catalog.
    async fn platform_assets_catalog_id(&self) -> Result<String, ClientError>;

    /// Fetches the raw asset document for `asset_id` within a container.
    async fn get_asset(
        &self,
        asset_id: &str,
        scope: &ContainerScope,
    ) -> Result<Value, ClientError>;

    /// Lists existing enrichment assets in a project together with the
    /// dataset ids attached to each.
    async fn enrichment_assignments(
        &self,
        project_id: &str,
    ) -> Result<Vec<EnrichmentAssignment>, ClientError>;

    /// Submits a single enrichment-asset creation call.
    async fn create_enrichment_asset(
        &self,
        project_id: &str,
        payload: &EnrichmentAssetPayload,
    ) -> Result<DataScopeOperation, ClientError>;
}
