use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sitemap_diff::{ObjectStore, Result, S3Location, SitemapError};

/// In-memory object store that records every request it receives
#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    request_log: Arc<Mutex<Vec<String>>>,
    fail_all: bool,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails as if access were denied
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn add_object(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    /// Requests in arrival order, as `OPERATION s3://bucket/key`
    pub fn requests(&self) -> Vec<String> {
        self.request_log.lock().unwrap().clone()
    }

    fn record(&self, operation: &str, bucket: &str, key: &str) {
        self.request_log
            .lock()
            .unwrap()
            .push(format!("{operation} s3://{bucket}/{key}"));
    }

    fn error(bucket: &str, key: &str, details: &str) -> SitemapError {
        SitemapError::ObjectStore {
            bucket: bucket.to_string(),
            key: key.to_string(),
            details: details.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn get_object(&self, location: &S3Location) -> Result<Vec<u8>> {
        self.record("GET", &location.bucket, &location.key);
        if self.fail_all {
            return Err(Self::error(&location.bucket, &location.key, "AccessDenied"));
        }
        self.objects
            .lock()
            .unwrap()
            .get(&(location.bucket.clone(), location.key.clone()))
            .cloned()
            .ok_or_else(|| Self::error(&location.bucket, &location.key, "NoSuchKey"))
    }

    async fn head_object(&self, location: &S3Location) -> Result<()> {
        self.record("HEAD", &location.bucket, &location.key);
        if self.fail_all {
            return Err(Self::error(&location.bucket, &location.key, "AccessDenied"));
        }
        let exists = self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(location.bucket.clone(), location.key.clone()));
        if exists {
            Ok(())
        } else {
            Err(Self::error(&location.bucket, &location.key, "NotFound"))
        }
    }

    async fn list_keys(&self, bucket: &str, _region: Option<&str>) -> Result<Vec<String>> {
        self.record("LIST", bucket, "");
        if self.fail_all {
            return Err(Self::error(bucket, "", "AccessDenied"));
        }
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, key)| key.clone())
            .collect())
    }
}
