//! Metadata enrichment asset construction and submission.

use std::fmt;
use std::str::FromStr;

use cams_client::{
    CatalogService,
    ContainerScope,
    DataScopeOperation,
    EnrichmentAssetEntity,
    EnrichmentAssetHeader,
    EnrichmentAssetPayload,
    EnrichmentDataScope,
    EntityKind,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::resolve::NameList;
use super::{CatalogControlPlane, ControlError};

const ENRICHMENT_ASSET_TYPE: &str = "metadata_enrichment_area";
const ENRICHMENT_ASSET_CATEGORY: &str = "USER";

/// Objectives an enrichment job can run against its datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataEnrichmentObjective {
    Profile,
    DqGenConstraints,
    AnalyzeQuality,
    SemanticExpansion,
}

impl MetadataEnrichmentObjective {
    pub const ALL: [Self; 4] = [
        Self::Profile,
        Self::DqGenConstraints,
        Self::AnalyzeQuality,
        Self::SemanticExpansion,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::DqGenConstraints => "dq_gen_constraints",
            Self::AnalyzeQuality => "analyze_quality",
            Self::SemanticExpansion => "semantic_expansion",
        }
    }
}

impl fmt::Display for MetadataEnrichmentObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataEnrichmentObjective {
    type Err = ControlError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|objective| objective.as_str() == name)
            .ok_or_else(|| {
                let supported: Vec<&str> =
                    Self::ALL.into_iter().map(Self::as_str).collect();
                ControlError::InvalidArgument(format!(
                    "unknown enrichment objective '{name}'; supported objectives are {}",
                    supported.join(", ")
                ))
            })
    }
}

/// Request surfaced to tool callers for enrichment-asset creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEnrichmentCreationRequest {
    /// Project name or UUID the asset is created in.
    pub project_name: String,
    /// Name of the new enrichment asset.
    pub metadata_enrichment_name: String,
    /// Category names or UUIDs to associate.
    pub category_names: NameList,
    /// Dataset names or UUIDs to enrich; resolved within the project.
    pub dataset_names: NameList,
    /// Objective names from the supported set.
    pub objective_names: NameList,
}

/// Fully resolved specification of a new enrichment asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentAssetSpec {
    pub name: String,
    pub dataset_ids: Vec<String>,
    pub category_ids: Vec<String>,
    pub objectives: Vec<MetadataEnrichmentObjective>,
}

impl EnrichmentAssetSpec {
    /// Converts the resolved inputs into the CAMS creation payload.
    #[must_use]
    pub fn into_payload(self) -> EnrichmentAssetPayload {
        EnrichmentAssetPayload {
            metadata: EnrichmentAssetHeader {
                name: self.name,
                asset_type: ENRICHMENT_ASSET_TYPE.to_string(),
                asset_category: ENRICHMENT_ASSET_CATEGORY.to_string(),
            },
            entity: EnrichmentAssetEntity {
                objectives: self
                    .objectives
                    .into_iter()
                    .map(|objective| objective.as_str().to_string())
                    .collect(),
                category_ids: self.category_ids,
                data_scope: EnrichmentDataScope {
                    container_asset_ids: self.dataset_ids,
                },
            },
        }
    }
}

impl<S: CatalogService> CatalogControlPlane<S> {
    /// Builds and submits a metadata enrichment asset.
    ///
    /// Objective names and name lists are validated before any lookup is
    /// made, so a malformed request never reaches the network. Resolution
    /// is fail-fast and order-preserving; the pre-flight assignment check
    /// runs before the single creation call, which is never issued when the
    /// check fails.
    ///
    /// # Errors
    /// `InvalidArgument` for empty names, empty dataset lists, or unknown
    /// objectives; resolution failures; `DatasetAlreadyAssigned` naming the
    /// conflicting datasets; `Client` for transport faults.
    pub async fn create_metadata_enrichment_asset(
        &self,
        request: MetadataEnrichmentCreationRequest,
    ) -> Result<DataScopeOperation, ControlError> {
        let name = request.metadata_enrichment_name.trim();
        if name.is_empty() {
            return Err(ControlError::InvalidArgument(
                "metadata enrichment asset name must not be empty".to_string(),
            ));
        }

        info!(
            project = %request.project_name,
            asset = name,
            "creating metadata enrichment asset"
        );

        // Construction-time validation first: no partial objective list is
        // ever submitted, and a bogus request makes zero network calls.
        let objectives = parse_objectives(request.objective_names)?;
        let category_names = request.category_names;
        let dataset_names = request.dataset_names.into_names()?;
        if dataset_names.is_empty() {
            return Err(ControlError::InvalidArgument(
                "at least one dataset name is required".to_string(),
            ));
        }

        let project_id = self
            .resolve(&request.project_name, EntityKind::Project, None)
            .await?;
        let scope = ContainerScope::project(project_id.clone());

        let category_ids = self
            .resolve_list(category_names, EntityKind::Category, None)
            .await?;

        // Resolved ids keep their originating names so conflict errors can
        // point at the input the caller actually typed.
        let mut dataset_ids: Vec<String> = Vec::with_capacity(dataset_names.len());
        let mut resolved: Vec<(String, String)> = Vec::with_capacity(dataset_names.len());
        for dataset_name in &dataset_names {
            let id = self
                .resolve(dataset_name, EntityKind::Dataset, Some(&scope))
                .await?;
            if !dataset_ids.contains(&id) {
                dataset_ids.push(id.clone());
                resolved.push((dataset_name.clone(), id));
            }
        }

        self.check_datasets_unassigned(&resolved, &project_id).await?;

        let spec = EnrichmentAssetSpec {
            name: name.to_string(),
            dataset_ids,
            category_ids,
            objectives,
        };
        Ok(self
            .service()
            .create_enrichment_asset(&project_id, &spec.into_payload())
            .await?)
    }

    /// Pre-flight check: none of the resolved datasets may already belong
    /// to another enrichment asset in the project. Not transactional with
    /// the creation call; a concurrent caller can still race this check.
    async fn check_datasets_unassigned(
        &self,
        resolved: &[(String, String)],
        project_id: &str,
    ) -> Result<(), ControlError> {
        let assignments = self.service().enrichment_assignments(project_id).await?;
        let offending: Vec<String> = resolved
            .iter()
            .filter(|(_, id)| {
                assignments
                    .iter()
                    .any(|assignment| assignment.dataset_ids.iter().any(|d| d == id))
            })
            .map(|(name, _)| name.clone())
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(ControlError::DatasetAlreadyAssigned {
                datasets: offending,
            })
        }
    }
}

fn parse_objectives(
    names: NameList,
) -> Result<Vec<MetadataEnrichmentObjective>, ControlError> {
    let names = names.into_names()?;
    if names.is_empty() {
        return Err(ControlError::InvalidArgument(
            "at least one enrichment objective is required".to_string(),
        ));
    }

    let mut objectives = Vec::with_capacity(names.len());
    for name in names {
        let objective = name.parse::<MetadataEnrichmentObjective>()?;
        if !objectives.contains(&objective) {
            objectives.push(objective);
        }
    }
    Ok(objectives)
}
