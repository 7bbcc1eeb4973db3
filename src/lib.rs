//! # sitemap-diff Library
//!
//! Compare the paths of two XML sitemaps read from local files, HTTP(S) URLs
//! or S3 objects.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http_client;
pub mod location;
pub mod logger;
pub mod object_store;
pub mod output;
pub mod pipeline;
pub mod sitemap;

pub use cli::Cli;
pub use config::{Config, ConfigError, ConfigManager, EnvProvider, SystemEnvProvider};
pub use diff::{DiffResult, SequenceDiff, diff, diff_values};
pub use error::{Result, SitemapError};
pub use extract::{parse_paths, parse_routes};
pub use fetcher::SourceFetcher;
pub use http_client::{AsyncHttpClient, HttpClientConfig};
pub use location::{S3Location, SitemapLocation, is_valid_file_path, is_valid_filename};
pub use logger::{LevelOverride, LogLevel, Logger, init_tracing};
pub use object_store::{ObjectStore, S3ObjectStore};
pub use output::{Output, read_json, write_json};
pub use pipeline::{PipelineOptions, SitemapComparer};
pub use sitemap::{
    ParsedSitemap, SitemapIndex, UrlEntry, UrlSet, parse_structure, parse_validate, validate,
};
