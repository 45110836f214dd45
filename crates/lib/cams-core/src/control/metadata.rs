//! Decoding of the CAMS asset-metadata document and the asset-details
//! retrieval flow.
//!
//! The decoder is total over any JSON object as far as optional keys go:
//! missing scalars fall back to per-field defaults, and the three nested
//! substructures (usage, rov, source asset) are decoded by dedicated
//! sub-decoders that tolerate absent input. Only a record with no identity
//! (`name`/`asset_id`) is rejected outright.

use cams_client::{CatalogService, EntityKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use super::resolve::ContainerRule;
use super::{CatalogControlPlane, ControlError};

const DEFAULT_ASSET_STATE: &str = "available";
const DEFAULT_ASSET_CATEGORY: &str = "USER";

/// Request surfaced to tool callers for asset-details retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAssetDetailsRequest {
    /// Asset name or UUID.
    pub asset: String,
    /// Catalog name or UUID; mutually exclusive with `project`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// Project name or UUID; mutually exclusive with `catalog`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Usage statistics attached to an asset. Atomic: either the document has
/// all seven fields or usage is treated as absent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUsage {
    pub last_updated_at: i64,
    pub last_updater_id: String,
    pub last_update_time: i64,
    pub last_accessed_at: i64,
    pub last_access_time: i64,
    pub last_accessor_id: String,
    pub access_count: i64,
}

/// One entry of the rights-of-visibility member-role list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRoles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_iam_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Rights-of-visibility and collaboration info for an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rov {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collaborator_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_roles: Vec<MemberRoles>,
}

/// Lineage of the asset this one was derived from. Present only when the
/// source document carries it; every field is individually optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bss_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_key: Option<String>,
}

/// Normalized asset metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub name: String,
    pub asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_linked_with_sub_container: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_processing_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ratings: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
    pub asset_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_attributes: Option<Vec<String>>,
    pub asset_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_shards: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_branched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_managed_asset: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<AssetUsage>,
    #[serde(default)]
    pub rov: Rov,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_asset: Option<SourceAsset>,
}

/// Full response surfaced to tool callers: normalized metadata plus the
/// untouched `entity` section of the asset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAssetDetailsResponse {
    #[serde(flatten)]
    pub metadata: AssetMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Value>,
}

impl<S: CatalogService> CatalogControlPlane<S> {
    /// Retrieves and decodes the metadata document for a named or
    /// UUID-identified asset.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty asset reference or an ambiguous
    /// container pair; resolution and decode failures otherwise.
    pub async fn get_asset_details(
        &self,
        request: GetAssetDetailsRequest,
    ) -> Result<GetAssetDetailsResponse, ControlError> {
        let asset = request.asset.trim();
        if asset.is_empty() {
            return Err(ControlError::InvalidArgument(
                "asset identifier must not be empty; pass an asset name or UUID".to_string(),
            ));
        }

        info!(
            asset,
            catalog = request.catalog.as_deref(),
            project = request.project.as_deref(),
            "retrieving asset details"
        );

        let scope = self
            .select_container(
                request.catalog.as_deref(),
                request.project.as_deref(),
                ContainerRule::DefaultPlatformCatalog,
            )
            .await?;
        let asset_id = self.resolve(asset, EntityKind::Dataset, Some(&scope)).await?;
        let document = self.service().get_asset(&asset_id, &scope).await?;

        let metadata = document
            .get("metadata")
            .filter(|value| value.as_object().is_some_and(|map| !map.is_empty()))
            .ok_or_else(|| {
                ControlError::MalformedMetadata(format!("no metadata found for asset {asset}"))
            })?;
        let metadata = decode_metadata(metadata)?;
        let entity = document.get("entity").cloned();

        Ok(GetAssetDetailsResponse { metadata, entity })
    }
}

/// Decodes the `metadata` section of an asset document.
///
/// # Errors
/// `MalformedMetadata` if the input is not an object, if `name` or
/// `asset_id` is missing, or if a non-empty usage substructure is
/// incomplete.
pub fn decode_metadata(raw: &Value) -> Result<AssetMetadata, ControlError> {
    let map = raw.as_object().ok_or_else(|| {
        ControlError::MalformedMetadata("asset metadata must be a JSON object".to_string())
    })?;

    Ok(AssetMetadata {
        name: required_str(map, "name")?,
        asset_id: required_str(map, "asset_id")?,
        description: opt_str(map, "description"),
        tags: opt_str_list(map, "tags"),
        asset_type: opt_str(map, "asset_type"),
        sub_container_id: opt_str(map, "sub_container_id"),
        is_linked_with_sub_container: opt_bool(map, "is_linked_with_sub_container"),
        origin_country: opt_str(map, "origin_country"),
        resource_key: opt_str(map, "resource_key"),
        identity_key: opt_str(map, "identity_key"),
        delete_processing_state: opt_str(map, "delete_processing_state"),
        delete_reason: opt_str(map, "delete_reason"),
        rating: opt_f64(map, "rating"),
        total_ratings: opt_i64(map, "total_ratings"),
        catalog_id: opt_str(map, "catalog_id"),
        project_id: opt_str(map, "project_id"),
        space_id: opt_str(map, "space_id"),
        created: opt_i64(map, "created"),
        created_at: opt_str(map, "created_at"),
        owner_id: opt_str(map, "owner_id"),
        creator_id: opt_str(map, "creator_id"),
        size: opt_i64(map, "size"),
        version: opt_f64(map, "version"),
        asset_state: opt_str(map, "asset_state")
            .unwrap_or_else(|| DEFAULT_ASSET_STATE.to_string()),
        asset_attributes: opt_str_list(map, "asset_attributes"),
        asset_category: opt_str(map, "asset_category")
            .unwrap_or_else(|| DEFAULT_ASSET_CATEGORY.to_string()),
        revision_id: opt_i64(map, "revision_id"),
        number_of_shards: opt_i64(map, "number_of_shards"),
        is_branched: opt_bool(map, "is_branched"),
        set_id: opt_str(map, "set_id"),
        is_managed_asset: opt_bool(map, "is_managed_asset"),
        usage: decode_usage(map.get("usage"))?,
        rov: decode_rov(map.get("rov")),
        source_asset: decode_source_asset(map.get("source_asset")),
    })
}

/// Decodes the usage substructure. Absent or empty input yields `None`;
/// a non-empty object must carry all seven fields, since consumers assume
/// a present usage record is complete.
///
/// # Errors
/// `MalformedMetadata` naming the first missing field.
pub fn decode_usage(raw: Option<&Value>) -> Result<Option<AssetUsage>, ControlError> {
    let Some(map) = non_empty_object(raw) else {
        return Ok(None);
    };

    Ok(Some(AssetUsage {
        last_updated_at: required_i64(map, "last_updated_at")?,
        last_updater_id: required_str(map, "last_updater_id")?,
        last_update_time: required_i64(map, "last_update_time")?,
        last_accessed_at: required_i64(map, "last_accessed_at")?,
        last_access_time: required_i64(map, "last_access_time")?,
        last_accessor_id: required_str(map, "last_accessor_id")?,
        access_count: required_i64(map, "access_count")?,
    }))
}

/// Decodes the rights-of-visibility substructure. Always yields a record,
/// possibly empty. `member_roles` arrives keyed by an internal id: the keys
/// are discarded and the values kept in encounter order. `collaborator_ids`
/// arrives as a mapping of which only the key set matters.
#[must_use]
pub fn decode_rov(raw: Option<&Value>) -> Rov {
    let Some(map) = non_empty_object(raw) else {
        return Rov::default();
    };

    let member_roles = map
        .get("member_roles")
        .and_then(Value::as_object)
        .map(|members| {
            members
                .values()
                .map(|member| MemberRoles {
                    user_iam_id: member
                        .get("user_iam_id")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    roles: member.get("roles").and_then(Value::as_array).map(|roles| {
                        roles
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    }),
                })
                .collect()
        })
        .unwrap_or_default();

    let collaborator_ids = map
        .get("collaborator_ids")
        .and_then(Value::as_object)
        .map(|ids| ids.keys().cloned().collect())
        .unwrap_or_default();

    Rov {
        mode: map.get("mode").and_then(Value::as_i64),
        collaborator_ids,
        member_roles,
    }
}

/// Decodes the source-asset lineage substructure; absent or empty input
/// yields `None`, and every field inside is individually optional.
#[must_use]
pub fn decode_source_asset(raw: Option<&Value>) -> Option<SourceAsset> {
    let map = non_empty_object(raw)?;

    Some(SourceAsset {
        action: opt_str(map, "action"),
        catalog_id: opt_str(map, "catalog_id"),
        project_id: opt_str(map, "project_id"),
        space_id: opt_str(map, "space_id"),
        asset_id: opt_str(map, "asset_id"),
        revision_id: opt_str(map, "revision_id"),
        bss_account_id: opt_str(map, "bss_account_id"),
        asset_name: opt_str(map, "asset_name"),
        source_url: opt_str(map, "source_url"),
        resource_key: opt_str(map, "resource_key"),
        identity_key: opt_str(map, "identity_key"),
    })
}

fn non_empty_object(raw: Option<&Value>) -> Option<&Map<String, Value>> {
    raw.and_then(Value::as_object).filter(|map| !map.is_empty())
}

fn required_str(map: &Map<String, Value>, key: &str) -> Result<String, ControlError> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ControlError::MalformedMetadata(format!("missing required field '{key}'")))
}

fn required_i64(map: &Map<String, Value>, key: &str) -> Result<i64, ControlError> {
    map.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| ControlError::MalformedMetadata(format!("missing required field '{key}'")))
}

fn opt_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn opt_bool(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

fn opt_i64(map: &Map<String, Value>, key: &str) -> Option<i64> {
    map.get(key).and_then(Value::as_i64)
}

fn opt_f64(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn opt_str_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    map.get(key).and_then(Value::as_array).map(|values| {
        values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}
