//! Reqwest-backed implementation of the catalog service contract.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::CatalogService;
use crate::types::{
    AssetRef,
    ContainerScope,
    DataScopeOperation,
    EnrichmentAssetPayload,
    EnrichmentAssignment,
    EntityKind,
};

const ASSETS_BASE: &str = "/v2/assets";
const ASSET_SEARCH: &str = "/v2/asset_types/asset/search";
const ENRICHMENT_SEARCH: &str = "/v2/asset_types/metadata_enrichment_area/search";
const CATALOGS_BASE: &str = "/v2/catalogs";
const PROJECTS_BASE: &str = "/v2/projects";
const CATEGORIES_BASE: &str = "/v3/categories";
const PLATFORM_CATALOG: &str = "/v2/catalogs/default";
const SEARCH_LIMIT: u32 = 200;

/// HTTP client for the CAMS metadata catalog.
pub struct CamsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CamsClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    /// Returns `ClientError::Config` for invalid settings and
    /// `ClientError::Http` if the underlying client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("cams-client")),
        );
        if let Some(api_key) = config.api_key.as_deref() {
            let bearer = format!("Bearer {api_key}");
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&bearer)
                    .map_err(|_| ClientError::Config("API key contains invalid characters".to_string()))?,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<Value, ClientError> {
        debug!(path, context, "CAMS GET");
        let response = self.http.get(self.url(path)).query(query).send().await?;
        Self::read_json(response, context).await
    }

    async fn post_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
        context: &str,
    ) -> Result<Value, ClientError> {
        debug!(path, context, "CAMS POST");
        let response = self
            .http
            .post(self.url(path))
            .query(query)
            .json(body)
            .send()
            .await?;
        Self::read_json(response, context).await
    }

    async fn read_json(response: reqwest::Response, context: &str) -> Result<Value, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            context.to_string()
        } else {
            format!("{context}: {}", body.trim())
        };
        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited(message),
            status if status.is_server_error() => ClientError::ServerError {
                status: status.as_u16(),
                message,
            },
            status => ClientError::Unexpected {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl CatalogService for CamsClient {
    async fn find_by_exact_name(
        &self,
        kind: EntityKind,
        name: &str,
        scope: Option<&ContainerScope>,
    ) -> Result<Vec<AssetRef>, ClientError> {
        let context = format!("{kind} search for '{name}'");
        let response = match kind {
            EntityKind::Catalog => {
                self.get_json(CATALOGS_BASE, &[("name", name)], &context).await?
            }
            EntityKind::Project => {
                self.get_json(PROJECTS_BASE, &[("name", name)], &context).await?
            }
            EntityKind::Category => {
                self.get_json(CATEGORIES_BASE, &[("name", name)], &context).await?
            }
            EntityKind::Dataset => {
                let scope = scope.ok_or_else(|| {
                    ClientError::Config("dataset lookup requires a container scope".to_string())
                })?;
                let body = serde_json::json!({
                    "query": format!("asset.name:\"{name}\""),
                    "limit": SEARCH_LIMIT,
                });
                self.post_json(
                    ASSET_SEARCH,
                    &[(scope.container_type.id_param(), scope.id.as_str())],
                    &body,
                    &context,
                )
                .await?
            }
        };

        Ok(extract_refs(&response, list_key(kind))
            .into_iter()
            .filter(|hit| hit.name == name)
            .collect())
    }

    async fn platform_assets_catalog_id(&self) -> Result<String, ClientError> {
        if let Some(id) = self.config.platform_catalog_id.as_deref() {
            debug!(id, "using pinned platform assets catalog id");
            return Ok(id.to_string());
        }

        let response = self
            .get_json(PLATFORM_CATALOG, &[], "platform assets catalog")
            .await?;
        response
            .pointer("/metadata/guid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ClientError::InvalidResponse(
                    "platform assets catalog response is missing metadata.guid".to_string(),
                )
            })
    }

    async fn get_asset(
        &self,
        asset_id: &str,
        scope: &ContainerScope,
    ) -> Result<Value, ClientError> {
        let path = format!("{ASSETS_BASE}/{asset_id}");
        let context = format!("asset {asset_id}");
        self.get_json(
            &path,
            &[
                (scope.container_type.id_param(), scope.id.as_str()),
                ("hide_deprecated_response_fields", "false"),
            ],
            &context,
        )
        .await
    }

    async fn enrichment_assignments(
        &self,
        project_id: &str,
    ) -> Result<Vec<EnrichmentAssignment>, ClientError> {
        let body = serde_json::json!({ "query": "*:*", "limit": SEARCH_LIMIT });
        let response = self
            .post_json(
                ENRICHMENT_SEARCH,
                &[("project_id", project_id)],
                &body,
                "enrichment asset search",
            )
            .await?;

        let results = response
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut assignments = Vec::with_capacity(results.len());
        for result in &results {
            let Some(asset_id) = result
                .pointer("/metadata/asset_id")
                .and_then(Value::as_str)
            else {
                continue;
            };
            let asset_name = result
                .pointer("/metadata/name")
                .and_then(Value::as_str)
                .map(str::to_string);
            let dataset_ids = result
                .pointer("/entity/metadata_enrichment_area/data_scope/container_asset_ids")
                .and_then(Value::as_array)
                .map(|ids| {
                    ids.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            assignments.push(EnrichmentAssignment {
                asset_id: asset_id.to_string(),
                asset_name,
                dataset_ids,
            });
        }
        Ok(assignments)
    }

    async fn create_enrichment_asset(
        &self,
        project_id: &str,
        payload: &EnrichmentAssetPayload,
    ) -> Result<DataScopeOperation, ClientError> {
        let body = serde_json::to_value(payload)?;
        let response = self
            .post_json(
                ASSETS_BASE,
                &[("project_id", project_id)],
                &body,
                "enrichment asset creation",
            )
            .await?;
        Ok(serde_json::from_value(response)?)
    }
}

const fn list_key(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Catalog => "catalogs",
        EntityKind::Project => "resources",
        EntityKind::Category => "categories",
        EntityKind::Dataset => "results",
    }
}

/// Pulls `(id, name)` pairs out of a listing/search response. The id lives
/// under `metadata.guid`, `metadata.artifact_id`, or `metadata.asset_id`
/// depending on the endpoint; the name under `entity.name` or `metadata.name`.
fn extract_refs(response: &Value, key: &str) -> Vec<AssetRef> {
    let Some(entries) = response.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry
                .pointer("/metadata/guid")
                .or_else(|| entry.pointer("/metadata/artifact_id"))
                .or_else(|| entry.pointer("/metadata/asset_id"))
                .and_then(Value::as_str)?;
            let name = entry
                .pointer("/entity/name")
                .or_else(|| entry.pointer("/metadata/name"))
                .and_then(Value::as_str)?;
            Some(AssetRef {
                id: id.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}
