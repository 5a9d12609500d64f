//! End-to-end lookups against a mock Rainforest endpoint
//!
//! Exercises the real HTTP client, the on-disk store, and index rebuilds together.

use std::sync::Arc;

use asin_cache::{
    CacheIndex, Config, Entry, IdKind, MissingPolicy, Partition, PartitionScan, RainforestClient,
    Retriever, Store,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, temp_dir: &TempDir) -> Config {
    let mut config = Config::new(temp_dir.path().to_path_buf(), "test-key");
    config.base_url = server.uri();
    config
}

fn open(config: &Config) -> Retriever<RainforestClient> {
    let client = RainforestClient::from_config(config).unwrap();
    Retriever::open(config, client).unwrap()
}

#[tokio::test]
async fn test_asin_lookup_is_cached_on_disk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("asin", "B000TEST"))
        .and(query_param("type", "product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {"asin": "B000TEST", "title": "Example Book"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let retriever = open(&config_for(&server, &temp_dir));

    let first = retriever.retrieve_by_asin("B000TEST").await.unwrap().unwrap();
    assert_eq!(first.product.asin, "B000TEST");
    assert_eq!(first.product.title, "Example Book");

    let file = temp_dir
        .path()
        .join(Partition::current().to_string())
        .join("B000TEST.json");
    assert!(file.exists(), "expected {} to exist", file.display());

    let second = retriever.retrieve_by_asin("B000TEST").await.unwrap().unwrap();
    assert_eq!(first, second);
    // MockServer verifies the single expected request on drop
}

#[tokio::test]
async fn test_fresh_index_serves_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("asin", "B000TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": {"success": true, "credits_reset_at": "2026-11-01T00:00:00Z"},
            "product": {
                "asin": "B000TEST",
                "title": "Example Book",
                "variants": [
                    {"asin": "B000HARD", "title": "Hardcover", "price": {"value": 24.0}},
                    {"asin": "B000PAPR", "title": "Paperback", "price": {"value": 12.5}}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&server, &temp_dir);
    let saved = open(&config)
        .retrieve_by_asin("B000TEST")
        .await
        .unwrap()
        .unwrap();

    // A new process would rebuild the index from disk
    let reopened = open(&config);
    assert!(matches!(
        reopened.index().lookup("B000TEST"),
        Some(Entry::Stored(_))
    ));
    let loaded = reopened.retrieve_by_asin("B000TEST").await.unwrap().unwrap();
    assert_eq!(loaded, saved);

    let variant = asin_cache::lookup_variant(&loaded, &["Kindle", "Paperback"]).unwrap();
    assert_eq!(variant.asin, "B000PAPR");
    assert_eq!(variant.price.value, 12.5);
}

#[tokio::test]
async fn test_missing_gtin_survives_restart_after_manifest_save() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("gtin", "9780000000002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"product": {"asin": ""}})))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&server, &temp_dir);

    let first = open(&config);
    assert!(first.retrieve_by_gtin("9780000000002").await.unwrap().is_none());
    first.save_missing_manifest().unwrap();

    let second = open(&config);
    assert_eq!(second.index().missing_ids(), vec!["9780000000002"]);
    assert!(second.retrieve_by_gtin("9780000000002").await.unwrap().is_none());
}

#[tokio::test]
async fn test_older_partition_visible_only_with_full_scan() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::new(temp_dir.path());
    let mut data = asin_cache::ProductData::default();
    data.product.asin = "B000OLD0".to_string();
    store
        .save(Partition::new(2001, 1).unwrap(), "B000OLD0", &data)
        .unwrap();

    let current_only = CacheIndex::build(&store, PartitionScan::CurrentMonth).unwrap();
    assert!(current_only.lookup("B000OLD0").is_none());

    let full = CacheIndex::build(&store, PartitionScan::All).unwrap();
    let server = MockServer::start().await;
    let client = RainforestClient::new(&server.uri(), "test-key", None).unwrap();
    let retriever = Retriever::new(Arc::new(full), store, client, MissingPolicy::default());

    let loaded = retriever
        .retrieve("B000OLD0", IdKind::Asin)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, data);
    // No mock mounted: any upstream request would have failed the lookup
}

#[tokio::test]
async fn test_provider_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let retriever = open(&config_for(&server, &temp_dir));

    let err = retriever.retrieve_by_asin("B000TEST").await.unwrap_err();
    assert!(err.to_string().contains("500"));
    assert!(retriever.index().lookup("B000TEST").is_none());
}
