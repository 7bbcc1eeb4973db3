//! Source fetching for classified sitemap locations
//!
//! Every backend failure is logged at error level and reported as `None`;
//! nothing in this module returns an error to its caller.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::http_client::AsyncHttpClient;
use crate::location::{S3Location, SitemapLocation};
use crate::logger::Logger;
use crate::object_store::ObjectStore;

/// Retrieves raw sitemap XML from the file system, HTTP or object storage
pub struct SourceFetcher {
    http_client: AsyncHttpClient,
    object_store: Arc<dyn ObjectStore>,
}

impl SourceFetcher {
    pub fn new(http_client: AsyncHttpClient, object_store: Arc<dyn ObjectStore>) -> Self {
        Self {
            http_client,
            object_store,
        }
    }

    /// Classify `input` and fetch it
    pub async fn fetch_sitemap(&self, input: &str, logger: &Logger) -> Option<String> {
        if input.is_empty() {
            logger.error("No sitemap url or file path provided.");
            return None;
        }

        let Some(location) = SitemapLocation::parse(input) else {
            logger.error(format!("Invalid sitemap path: {input}"));
            return None;
        };

        logger.log(format!("\t{input} - Fetching {}", location.kind()));
        self.fetch(&location, logger).await
    }

    pub async fn fetch(&self, location: &SitemapLocation, logger: &Logger) -> Option<String> {
        match location {
            SitemapLocation::LocalFile { path } => Self::read_local(path, logger).await,
            SitemapLocation::HttpUrl { url } => self.fetch_url(url, logger).await,
            SitemapLocation::ObjectStore(s3) => self.fetch_object(s3, logger).await,
        }
    }

    async fn read_local(path: &Path, logger: &Logger) -> Option<String> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Some(content),
            Err(e) => {
                logger.error(format!("Error while reading {}: {e}", path.display()));
                None
            }
        }
    }

    async fn fetch_url(&self, url: &str, logger: &Logger) -> Option<String> {
        match self.http_client.fetch_text(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                logger.error(format!("Error fetching file {url}: {e}"));
                None
            }
        }
    }

    async fn fetch_object(&self, location: &S3Location, logger: &Logger) -> Option<String> {
        let bytes = match self.object_store.get_object(location).await {
            Ok(bytes) => bytes,
            Err(e) => {
                logger.error(format!("GetObject error: {e}"));
                return None;
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                logger.error(format!("{location} is not valid UTF-8: {e}"));
                None
            }
        }
    }

    /// HEAD check for a single object; `false` on any backend error
    pub async fn object_exists(&self, location: &S3Location, logger: &Logger) -> bool {
        match self.object_store.head_object(location).await {
            Ok(()) => true,
            Err(e) => {
                logger.debug(format!("HeadObject for {location} failed: {e}"));
                false
            }
        }
    }

    /// Check many keys against one listing of `bucket`, in input order.
    ///
    /// Every key reports `false` if the listing fails.
    pub async fn objects_exist(
        &self,
        bucket: &str,
        keys: &[String],
        region: Option<&str>,
        logger: &Logger,
    ) -> Vec<(String, bool)> {
        let listed: HashSet<String> = match self.object_store.list_keys(bucket, region).await {
            Ok(listed) => listed.into_iter().collect(),
            Err(e) => {
                logger.error(format!("ListObjects for bucket {bucket} failed: {e}"));
                HashSet::new()
            }
        };

        keys.iter()
            .map(|key| (key.clone(), listed.contains(key)))
            .collect()
    }
}
