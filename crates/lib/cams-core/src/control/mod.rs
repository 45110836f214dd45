use std::{error::Error, fmt, sync::Arc};

use cams_client::{CatalogService, ClientError, EntityKind};

pub mod enrichment;
pub mod metadata;
pub mod resolve;

pub use enrichment::{
    EnrichmentAssetSpec,
    MetadataEnrichmentCreationRequest,
    MetadataEnrichmentObjective,
};
pub use metadata::{
    AssetMetadata,
    AssetUsage,
    GetAssetDetailsRequest,
    GetAssetDetailsResponse,
    MemberRoles,
    Rov,
    SourceAsset,
};
pub use resolve::{ContainerRule, NameList};

/// Errors raised by the control plane.
///
/// Every variant is raised at the point of detection and surfaces to the
/// tool caller unrecovered; messages name the offending identifier or field.
#[derive(Debug)]
pub enum ControlError {
    InvalidArgument(String),
    NotFound { kind: EntityKind, name: String },
    AmbiguousName { kind: EntityKind, name: String, matches: usize },
    MalformedMetadata(String),
    DatasetAlreadyAssigned { datasets: Vec<String> },
    Client(ClientError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::NotFound { kind, name } => {
                write!(f, "no {kind} found with the exact name '{name}'")
            }
            Self::AmbiguousName { kind, name, matches } => write!(
                f,
                "{matches} {kind}s share the exact name '{name}'; pass the UUID instead"
            ),
            Self::MalformedMetadata(message) => {
                write!(f, "malformed asset metadata: {message}")
            }
            Self::DatasetAlreadyAssigned { datasets } => write!(
                f,
                "dataset(s) already assigned to another metadata enrichment asset: {}",
                datasets.join(", ")
            ),
            Self::Client(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClientError> for ControlError {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

/// Control plane over a catalog lookup service.
///
/// All operations are request-scoped: the plane holds no mutable state, only
/// a shared handle to the service.
pub struct CatalogControlPlane<S> {
    service: Arc<S>,
}

impl<S> Clone for CatalogControlPlane<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S: CatalogService> CatalogControlPlane<S> {
    /// Creates a control plane owning the service.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    /// Creates a control plane over a shared service handle.
    #[must_use]
    pub const fn with_service(service: Arc<S>) -> Self {
        Self { service }
    }

    pub(crate) fn service(&self) -> &S {
        &self.service
    }
}
