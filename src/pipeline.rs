//! Fetch, extract and compare sitemaps end to end

use std::sync::Arc;

use crate::diff::DiffResult;
use crate::error::{Result, SitemapError};
use crate::extract::parse_paths;
use crate::fetcher::SourceFetcher;
use crate::logger::Logger;

/// Per-call options for the comparison pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Temporary log level for the duration of the call
    pub log_level: Option<String>,
    /// Paths dropped from every extracted path list (exact match)
    pub exclude_paths: Vec<String>,
}

impl PipelineOptions {
    pub fn with_exclude_paths(mut self, exclude_paths: Vec<String>) -> Self {
        self.exclude_paths = exclude_paths;
        self
    }

    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = Some(log_level.into());
        self
    }
}

pub struct SitemapComparer {
    fetcher: SourceFetcher,
    logger: Arc<Logger>,
}

impl SitemapComparer {
    pub fn new(fetcher: SourceFetcher, logger: Arc<Logger>) -> Self {
        Self { fetcher, logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Fetch one sitemap and return its paths.
    ///
    /// Fails with a location-prefixed error when the source cannot be read or
    /// does not hold a usable `<urlset>`.
    pub async fn fetch_and_extract_paths(
        &self,
        location: &str,
        options: &PipelineOptions,
    ) -> Result<Vec<String>> {
        if location.is_empty() {
            return Err(SitemapError::MissingLocation {
                which: "No sitemap file path provided",
            });
        }

        let _level = self.logger.override_level(options.log_level.as_deref())?;
        self.extract_paths(location, &options.exclude_paths).await
    }

    async fn extract_paths(&self, location: &str, exclude_paths: &[String]) -> Result<Vec<String>> {
        let xml = self
            .fetcher
            .fetch_sitemap(location, &self.logger)
            .await
            .ok_or_else(|| SitemapError::CouldNotRead {
                location: location.to_string(),
            })?;

        parse_paths(&xml, exclude_paths, &self.logger).ok_or_else(|| {
            SitemapError::CouldNotExtract {
                location: location.to_string(),
            }
        })
    }

    /// Compare the paths of two sitemaps, `sitemap1` fetched before `sitemap2`
    pub async fn compare_paths(
        &self,
        sitemap1: &str,
        sitemap2: &str,
        options: &PipelineOptions,
    ) -> Result<DiffResult> {
        if sitemap1.is_empty() || sitemap2.is_empty() {
            return Err(SitemapError::MissingLocation {
                which: "Both sitemap1 and sitemap2 must be provided",
            });
        }

        let _level = self.logger.override_level(options.log_level.as_deref())?;

        let paths = async {
            self.logger.info(format!("Processing sitemap1: {sitemap1}"));
            let paths1 = self.extract_paths(sitemap1, &options.exclude_paths).await?;
            self.logger.info(format!("Processing sitemap2: {sitemap2}"));
            let paths2 = self.extract_paths(sitemap2, &options.exclude_paths).await?;
            Ok::<_, SitemapError>((paths1, paths2))
        }
        .await;

        let (paths1, paths2) = paths.inspect_err(|e| {
            self.logger.error(format!("Error processing sitemaps: {e}"));
        })?;

        self.logger.debug(format!(
            "Comparing {} paths from sitemap1 with {} paths from sitemap2",
            paths1.len(),
            paths2.len()
        ));

        Ok(DiffResult::from_paths(sitemap1, sitemap2, &paths1, &paths2))
    }
}
