use std::sync::Arc;

use sitemap_diff::{
    AsyncHttpClient, HttpClientConfig, Logger, S3Location, SitemapLocation, SourceFetcher,
};

use crate::common::mocks::MockObjectStore;

fn fetcher(store: &MockObjectStore) -> SourceFetcher {
    let http_client = AsyncHttpClient::new(HttpClientConfig::default()).unwrap();
    SourceFetcher::new(http_client, Arc::new(store.clone()))
}

fn location(input: &str) -> S3Location {
    match SitemapLocation::parse(input) {
        Some(SitemapLocation::ObjectStore(s3)) => s3,
        other => panic!("Expected an object storage location, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_object_by_location_string() {
    let store = MockObjectStore::new();
    store.add_object("bucket", "sitemap.xml", "<urlset/>");

    let content = fetcher(&store)
        .fetch_sitemap("s3://bucket/sitemap.xml", &Logger::default())
        .await;
    assert_eq!(content.as_deref(), Some("<urlset/>"));
}

#[tokio::test]
async fn test_missing_key_existence_is_false() {
    let store = MockObjectStore::new();
    store.add_object("bucket", "present.xml", "<urlset/>");
    let fetcher = fetcher(&store);
    let logger = Logger::default();

    assert!(
        !fetcher
            .object_exists(&location("s3://bucket/absent.xml"), &logger)
            .await
    );
    assert!(
        fetcher
            .object_exists(&location("s3://bucket/present.xml:region://us-west-2"), &logger)
            .await
    );
}

#[tokio::test]
async fn test_batch_existence_uses_one_listing() {
    let store = MockObjectStore::new();
    store.add_object("bucket", "a.xml", "x");
    store.add_object("bucket", "b.xml", "x");
    store.add_object("other", "c.xml", "x");

    let keys = vec!["c.xml".to_string(), "b.xml".to_string(), "a.xml".to_string()];
    let result = fetcher(&store)
        .objects_exist("bucket", &keys, Some("us-east-1"), &Logger::default())
        .await;

    assert_eq!(
        result,
        vec![
            ("c.xml".to_string(), false),
            ("b.xml".to_string(), true),
            ("a.xml".to_string(), true),
        ]
    );
    assert_eq!(store.requests(), vec!["LIST s3://bucket/"]);
}

#[tokio::test]
async fn test_failing_store_reports_absent() {
    let store = MockObjectStore::failing();
    let fetcher = fetcher(&store);
    let logger = Logger::default();

    assert!(
        !fetcher
            .object_exists(&location("s3://bucket/a.xml"), &logger)
            .await
    );
    let keys = vec!["a.xml".to_string()];
    assert_eq!(
        fetcher.objects_exist("bucket", &keys, None, &logger).await,
        vec![("a.xml".to_string(), false)]
    );
    assert!(
        fetcher
            .fetch_sitemap("s3://bucket/a.xml", &logger)
            .await
            .is_none()
    );
}
