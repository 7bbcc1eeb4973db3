//! Object storage backend
//!
//! The fetcher talks to object storage through the [`ObjectStore`] trait; the
//! production implementation is [`S3ObjectStore`], which resolves credentials
//! from the ambient AWS environment.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;

use crate::error::{Result, SitemapError};
use crate::location::S3Location;

/// Minimal object storage operations used by the fetcher
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the whole object
    async fn get_object(&self, location: &S3Location) -> Result<Vec<u8>>;

    /// Succeeds if the object exists and is accessible
    async fn head_object(&self, location: &S3Location) -> Result<()>;

    /// List every key in `bucket`
    async fn list_keys(&self, bucket: &str, region: Option<&str>) -> Result<Vec<String>>;
}

/// Amazon S3 backend, one client per call so each request can pick its region
#[derive(Debug, Clone, Default)]
pub struct S3ObjectStore {
    default_region: Option<String>,
}

impl S3ObjectStore {
    pub fn new(default_region: Option<String>) -> Self {
        Self { default_region }
    }

    async fn client(&self, region: Option<&str>) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region.or(self.default_region.as_deref()) {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }

    fn storage_error(bucket: &str, key: &str, details: String) -> SitemapError {
        SitemapError::ObjectStore {
            bucket: bucket.to_string(),
            key: key.to_string(),
            details,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, location: &S3Location) -> Result<Vec<u8>> {
        let client = self.client(location.region.as_deref()).await;
        let output = client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| {
                Self::storage_error(
                    &location.bucket,
                    &location.key,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let data = output.body.collect().await.map_err(|e| {
            Self::storage_error(&location.bucket, &location.key, e.to_string())
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn head_object(&self, location: &S3Location) -> Result<()> {
        let client = self.client(location.region.as_deref()).await;
        client
            .head_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| {
                Self::storage_error(
                    &location.bucket,
                    &location.key,
                    DisplayErrorContext(&e).to_string(),
                )
            })
    }

    async fn list_keys(&self, bucket: &str, region: Option<&str>) -> Result<Vec<String>> {
        let client = self.client(region).await;
        let mut pages = client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(|e| Self::storage_error(bucket, "", DisplayErrorContext(&e).to_string()))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }

        Ok(keys)
    }
}
