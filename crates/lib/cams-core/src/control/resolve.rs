//! Identifier resolution and container selection.

use cams_client::{CatalogService, ContainerScope, EntityKind};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{CatalogControlPlane, ControlError};

/// A tool parameter that may arrive as a single string, a comma-joined
/// string, or a list of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameList {
    One(String),
    Many(Vec<String>),
}

impl NameList {
    /// Coerces the input into a uniform sequence of trimmed, non-empty names.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidArgument` if any entry is empty or
    /// whitespace-only.
    pub fn into_names(self) -> Result<Vec<String>, ControlError> {
        let entries: Vec<String> = match self {
            Self::One(value) => value.split(',').map(str::to_string).collect(),
            Self::Many(values) => values,
        };

        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                return Err(ControlError::InvalidArgument(
                    "name lists must not contain empty entries".to_string(),
                ));
            }
            names.push(trimmed.to_string());
        }
        Ok(names)
    }
}

impl From<&str> for NameList {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for NameList {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// What to do when neither a catalog nor a project reference is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRule {
    /// Retrieval flows: fall back to the platform assets catalog.
    DefaultPlatformCatalog,
    /// Creation flows: a container reference is mandatory.
    Required,
}

impl<S: CatalogService> CatalogControlPlane<S> {
    /// Turns a user-supplied name or UUID into a validated identifier.
    ///
    /// Inputs already in UUID form are returned unchanged without touching
    /// the catalog. Names go through a single exact-match lookup restricted
    /// to `kind` (and, for datasets, to the containing scope); zero matches
    /// and multiple matches both fail loud rather than guessing.
    ///
    /// # Errors
    /// `InvalidArgument` for empty input, `NotFound` for zero matches,
    /// `AmbiguousName` for more than one, `Client` for transport faults.
    pub async fn resolve(
        &self,
        name_or_id: &str,
        kind: EntityKind,
        scope: Option<&ContainerScope>,
    ) -> Result<String, ControlError> {
        let trimmed = name_or_id.trim();
        if trimmed.is_empty() {
            return Err(ControlError::InvalidArgument(format!(
                "{kind} identifier must not be empty"
            )));
        }
        if Uuid::parse_str(trimmed).is_ok() {
            return Ok(trimmed.to_string());
        }

        debug!(kind = %kind, name = trimmed, "resolving name to identifier");
        let hits = self.service().find_by_exact_name(kind, trimmed, scope).await?;
        match hits.len() {
            0 => Err(ControlError::NotFound {
                kind,
                name: trimmed.to_string(),
            }),
            1 => Ok(hits.into_iter().next().map(|hit| hit.id).unwrap_or_default()),
            matches => Err(ControlError::AmbiguousName {
                kind,
                name: trimmed.to_string(),
                matches,
            }),
        }
    }

    /// Resolves every entry of a possibly-scalar name list, preserving input
    /// order and failing fast on the first unresolvable entry.
    ///
    /// # Errors
    /// Propagates coercion and resolution failures.
    pub async fn resolve_list(
        &self,
        names: NameList,
        kind: EntityKind,
        scope: Option<&ContainerScope>,
    ) -> Result<Vec<String>, ControlError> {
        let names = names.into_names()?;
        let mut ids = Vec::with_capacity(names.len());
        for name in &names {
            ids.push(self.resolve(name, kind, scope).await?);
        }
        Ok(ids)
    }

    /// Picks and resolves the container an operation should run against.
    ///
    /// Exactly one of `catalog`/`project` may be set. When both are absent,
    /// `rule` decides between the platform assets catalog (retrieval flows,
    /// no name resolution involved) and a hard failure (creation flows).
    /// Blank references are treated as absent.
    ///
    /// # Errors
    /// `InvalidArgument` when both references are present, or both absent
    /// under `ContainerRule::Required`; resolution failures otherwise.
    pub async fn select_container(
        &self,
        catalog: Option<&str>,
        project: Option<&str>,
        rule: ContainerRule,
    ) -> Result<ContainerScope, ControlError> {
        let catalog = catalog.map(str::trim).filter(|value| !value.is_empty());
        let project = project.map(str::trim).filter(|value| !value.is_empty());

        match (catalog, project) {
            (Some(_), Some(_)) => Err(ControlError::InvalidArgument(
                "both catalog and project were provided; pass exactly one container".to_string(),
            )),
            (None, None) => match rule {
                ContainerRule::DefaultPlatformCatalog => {
                    let id = self.service().platform_assets_catalog_id().await?;
                    Ok(ContainerScope::catalog(id))
                }
                ContainerRule::Required => Err(ControlError::InvalidArgument(
                    "a catalog or project reference is required".to_string(),
                )),
            },
            (Some(catalog), None) => {
                let id = self.resolve(catalog, EntityKind::Catalog, None).await?;
                Ok(ContainerScope::catalog(id))
            }
            (None, Some(project)) => {
                let id = self.resolve(project, EntityKind::Project, None).await?;
                Ok(ContainerScope::project(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_name_list_splits_on_commas() {
        let names = NameList::from("orders, customers ,returns")
            .into_names()
            .expect("list should coerce");
        assert_eq!(names, ["orders", "customers", "returns"]);
    }

    #[test]
    fn list_entries_are_trimmed() {
        let names = NameList::from(vec!["  orders  ".to_string(), "returns".to_string()])
            .into_names()
            .expect("list should coerce");
        assert_eq!(names, ["orders", "returns"]);
    }

    #[test]
    fn whitespace_entries_are_rejected() {
        let err = NameList::from("orders,, returns").into_names().unwrap_err();
        assert!(matches!(err, ControlError::InvalidArgument(_)));

        let err = NameList::from(vec![" ".to_string()]).into_names().unwrap_err();
        assert!(matches!(err, ControlError::InvalidArgument(_)));
    }

    #[test]
    fn untagged_deserialization_accepts_both_shapes() {
        let one: NameList = serde_json::from_value(serde_json::json!("orders")).unwrap();
        assert_eq!(one.into_names().unwrap(), ["orders"]);

        let many: NameList =
            serde_json::from_value(serde_json::json!(["orders", "returns"])).unwrap();
        assert_eq!(many.into_names().unwrap(), ["orders", "returns"]);
    }
}
