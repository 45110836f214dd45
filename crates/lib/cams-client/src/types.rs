use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity kinds the resolver can look up by exact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Catalog,
    Project,
    Category,
    Dataset,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Project => "project",
            Self::Category => "category",
            Self::Dataset => "dataset",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container kinds an asset can live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerType {
    Catalog,
    Project,
}

impl ContainerType {
    /// Query-parameter name CAMS expects for this container kind.
    #[must_use]
    pub const fn id_param(self) -> &'static str {
        match self {
            Self::Catalog => "catalog_id",
            Self::Project => "project_id",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => f.write_str("catalog"),
            Self::Project => f.write_str("project"),
        }
    }
}

/// A resolved container identifier plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerScope {
    pub container_type: ContainerType,
    pub id: String,
}

impl ContainerScope {
    #[must_use]
    pub fn catalog(id: impl Into<String>) -> Self {
        Self {
            container_type: ContainerType::Catalog,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn project(id: impl Into<String>) -> Self {
        Self {
            container_type: ContainerType::Project,
            id: id.into(),
        }
    }
}

/// A single exact-name lookup hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: String,
    pub name: String,
}

/// Datasets already attached to an existing metadata enrichment asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentAssignment {
    pub asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dataset_ids: Vec<String>,
}

/// Creation payload for a metadata enrichment asset, in CAMS wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentAssetPayload {
    pub metadata: EnrichmentAssetHeader,
    pub entity: EnrichmentAssetEntity,
}

/// `metadata` section of the creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentAssetHeader {
    pub name: String,
    pub asset_type: String,
    pub asset_category: String,
}

/// `entity` section of the creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentAssetEntity {
    pub objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<String>,
    pub data_scope: EnrichmentDataScope,
}

/// Dataset scope of an enrichment asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentDataScope {
    pub container_asset_ids: Vec<String>,
}

/// Creation/operation record returned by CAMS for an enrichment asset.
///
/// Known fields are typed; everything else the service returns is carried
/// through unchanged in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataScopeOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, Value>,
}
