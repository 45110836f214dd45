//! HTTP-level tests for `CamsClient` using wiremock.

use std::time::Duration;

use cams_client::{
    CamsClient,
    CatalogService,
    ClientConfig,
    ClientError,
    ContainerScope,
    EnrichmentAssetEntity,
    EnrichmentAssetHeader,
    EnrichmentAssetPayload,
    EnrichmentDataScope,
    EntityKind,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> CamsClient {
    let config = ClientConfig::builder(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("test config should build");
    CamsClient::new(config).expect("test client should build")
}

#[tokio::test]
async fn get_asset_sends_container_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/assets/a1"))
        .and(query_param("catalog_id", "c1"))
        .and(query_param("hide_deprecated_response_fields", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": { "name": "orders", "asset_id": "a1" },
            "entity": {}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let doc = client
        .get_asset("a1", &ContainerScope::catalog("c1"))
        .await
        .expect("asset fetch should succeed");
    assert_eq!(
        doc.pointer("/metadata/name").and_then(serde_json::Value::as_str),
        Some("orders")
    );
}

#[tokio::test]
async fn get_asset_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/assets/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such asset"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get_asset("missing", &ContainerScope::project("p1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn find_by_exact_name_filters_fuzzy_hits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/asset_types/asset/search"))
        .and(query_param("project_id", "p1"))
        .and(body_partial_json(serde_json::json!({
            "query": "asset.name:\"orders\""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "metadata": { "asset_id": "d1", "name": "orders" } },
                { "metadata": { "asset_id": "d2", "name": "orders_v2" } },
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let scope = ContainerScope::project("p1");
    let hits = client
        .find_by_exact_name(EntityKind::Dataset, "orders", Some(&scope))
        .await
        .expect("search should succeed");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "d1");
}

#[tokio::test]
async fn dataset_lookup_without_scope_is_a_config_error() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let err = client
        .find_by_exact_name(EntityKind::Dataset, "orders", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[tokio::test]
async fn catalog_search_uses_listing_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/catalogs"))
        .and(query_param("name", "sales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "catalogs": [
                { "metadata": { "guid": "c9" }, "entity": { "name": "sales" } }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let hits = client
        .find_by_exact_name(EntityKind::Catalog, "sales", None)
        .await
        .expect("search should succeed");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "c9");
}

#[tokio::test]
async fn platform_catalog_id_requires_guid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/catalogs/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": { "guid": "platform-cat" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let id = client
        .platform_assets_catalog_id()
        .await
        .expect("platform catalog lookup should succeed");
    assert_eq!(id, "platform-cat");
}

#[tokio::test]
async fn pinned_platform_catalog_id_skips_the_lookup() {
    // No mock is mounted: any request against the server would 404.
    let server = MockServer::start().await;
    let config = ClientConfig::builder(server.uri())
        .platform_catalog_id("pinned-cat")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("test config should build");
    let client = CamsClient::new(config).expect("test client should build");

    let id = client
        .platform_assets_catalog_id()
        .await
        .expect("pinned id should be returned without a request");
    assert_eq!(id, "pinned-cat");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn platform_catalog_without_guid_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/catalogs/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.platform_assets_catalog_id().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/catalogs/default"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": { "guid": "platform-cat" }
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::builder(server.uri())
        .api_key("secret-token")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("test config should build");
    let client = CamsClient::new(config).expect("test client should build");
    let id = client
        .platform_assets_catalog_id()
        .await
        .expect("authenticated lookup should succeed");
    assert_eq!(id, "platform-cat");
}

#[tokio::test]
async fn server_errors_carry_status_and_retryability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .find_by_exact_name(EntityKind::Project, "agent", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ServerError { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn enrichment_assignment_search_flattens_data_scope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/asset_types/metadata_enrichment_area/search"))
        .and(query_param("project_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "metadata": { "asset_id": "mde1", "name": "nightly profiling" },
                    "entity": {
                        "metadata_enrichment_area": {
                            "data_scope": { "container_asset_ids": ["d1", "d2"] }
                        }
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let assignments = client
        .enrichment_assignments("p1")
        .await
        .expect("assignment search should succeed");
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].asset_id, "mde1");
    assert_eq!(assignments[0].dataset_ids, ["d1", "d2"]);
}

#[tokio::test]
async fn create_enrichment_asset_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/assets"))
        .and(query_param("project_id", "p1"))
        .and(body_partial_json(serde_json::json!({
            "metadata": { "name": "profiling run" },
            "entity": { "data_scope": { "container_asset_ids": ["d1"] } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "asset_id": "mde9",
            "state": "queued"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = EnrichmentAssetPayload {
        metadata: EnrichmentAssetHeader {
            name: "profiling run".to_string(),
            asset_type: "metadata_enrichment_area".to_string(),
            asset_category: "USER".to_string(),
        },
        entity: EnrichmentAssetEntity {
            objectives: vec!["profile".to_string()],
            category_ids: vec![],
            data_scope: EnrichmentDataScope {
                container_asset_ids: vec!["d1".to_string()],
            },
        },
    };
    let operation = client
        .create_enrichment_asset("p1", &payload)
        .await
        .expect("creation should succeed");
    assert_eq!(operation.asset_id.as_deref(), Some("mde9"));
    assert_eq!(operation.state.as_deref(), Some("queued"));
}
