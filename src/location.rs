//! Sitemap location classification
//!
//! A location string is exactly one of a local file path, an HTTP(S) URL or an
//! S3 object reference (`s3://bucket/key[:region://region]`).

use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

const REGION_SEPARATOR: &str = ":region://";

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

static POSIX_PATH_REGEX: OnceLock<Regex> = OnceLock::new();
static WINDOWS_PATH_REGEX: OnceLock<Regex> = OnceLock::new();
static FILENAME_REGEX: OnceLock<Regex> = OnceLock::new();
static S3_BUCKET_REGEX: OnceLock<Regex> = OnceLock::new();
static S3_KEY_REGEX: OnceLock<Regex> = OnceLock::new();
static S3_REGION_REGEX: OnceLock<Regex> = OnceLock::new();

fn posix_path_regex() -> &'static Regex {
    POSIX_PATH_REGEX.get_or_init(|| {
        Regex::new(r#"^[^<>:"|?*\x00-\x1F]+$"#).expect("Failed to compile POSIX path regex")
    })
}

fn windows_path_regex() -> &'static Regex {
    WINDOWS_PATH_REGEX.get_or_init(|| {
        Regex::new(r#"^(?:[a-zA-Z]:)?(?:[\\/][^<>:"|?*\x00-\x1F]+)+$"#)
            .expect("Failed to compile Windows path regex")
    })
}

fn filename_regex() -> &'static Regex {
    FILENAME_REGEX.get_or_init(|| {
        Regex::new(r#"^[^<>:"/\\|?*\x00-\x1F]+$"#).expect("Failed to compile filename regex")
    })
}

fn s3_bucket_regex() -> &'static Regex {
    S3_BUCKET_REGEX
        .get_or_init(|| Regex::new(r"^s3://([^/]+)").expect("Failed to compile S3 bucket regex"))
}

fn s3_key_regex() -> &'static Regex {
    S3_KEY_REGEX.get_or_init(|| {
        Regex::new(r"^s3://[^/]+/(.*?)(?::region://|$)").expect("Failed to compile S3 key regex")
    })
}

fn s3_region_regex() -> &'static Regex {
    S3_REGION_REGEX.get_or_init(|| {
        Regex::new(r":region://([^/]+)").expect("Failed to compile S3 region regex")
    })
}

fn is_reserved_name(name: &str) -> bool {
    let upper = name.to_uppercase();
    RESERVED_NAMES.contains(&upper.as_str())
}

/// Check that `filename` is a single valid file name (no separators, no reserved device name)
pub fn is_valid_filename(filename: &str) -> bool {
    filename_regex().is_match(filename) && !is_reserved_name(filename)
}

/// Check that `path` is a syntactically valid POSIX or Windows file path
pub fn is_valid_file_path(path: &str) -> bool {
    if !posix_path_regex().is_match(path) && !windows_path_regex().is_match(path) {
        return false;
    }

    let normalized = path.replace('\\', "/");
    match normalized.rsplit('/').next() {
        Some(file_name) if !file_name.is_empty() => !is_reserved_name(file_name),
        _ => false,
    }
}

/// An S3 object reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
    pub region: Option<String>,
}

impl S3Location {
    /// Split `s3://bucket/key[:region://region]` into its parts
    pub fn parse(input: &str) -> Option<Self> {
        let bucket = s3_bucket_regex().captures(input)?.get(1)?.as_str();
        let key = s3_key_regex().captures(input)?.get(1)?.as_str();
        if key.is_empty() {
            return None;
        }
        let region = s3_region_regex()
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        Some(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            region,
        })
    }
}

impl fmt::Display for S3Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)?;
        if let Some(region) = &self.region {
            write!(f, "{REGION_SEPARATOR}{region}")?;
        }
        Ok(())
    }
}

/// Classified sitemap location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapLocation {
    LocalFile { path: PathBuf },
    HttpUrl { url: String },
    ObjectStore(S3Location),
}

impl SitemapLocation {
    /// Classify `input`, first matching rule wins.
    ///
    /// The HTTP rule reads `http:// || (https:// && .xml)`: plain `http://`
    /// URLs are accepted with any suffix while `https://` URLs must end in `.xml`.
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() {
            return None;
        }

        if input.starts_with("http://") || (input.starts_with("https://") && input.ends_with(".xml"))
        {
            return Some(SitemapLocation::HttpUrl {
                url: input.to_string(),
            });
        }

        if input.starts_with("s3://") {
            if !Self::is_valid_s3_form(input) {
                return None;
            }
            return S3Location::parse(input).map(SitemapLocation::ObjectStore);
        }

        if is_valid_file_path(input) && input.ends_with(".xml") {
            return Some(SitemapLocation::LocalFile {
                path: PathBuf::from(input),
            });
        }

        None
    }

    fn is_valid_s3_form(input: &str) -> bool {
        let parts: Vec<&str> = input.split(REGION_SEPARATOR).collect();
        match parts.as_slice() {
            [base] => base.ends_with(".xml"),
            [base, region] => base.ends_with(".xml") && !region.is_empty(),
            _ => false,
        }
    }

    /// Short label for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SitemapLocation::LocalFile { .. } => "local file",
            SitemapLocation::HttpUrl { .. } => "URL file",
            SitemapLocation::ObjectStore(_) => "S3 file",
        }
    }
}

impl fmt::Display for SitemapLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SitemapLocation::LocalFile { path } => write!(f, "{}", path.display()),
            SitemapLocation::HttpUrl { url } => f.write_str(url),
            SitemapLocation::ObjectStore(s3) => write!(f, "{s3}"),
        }
    }
}
