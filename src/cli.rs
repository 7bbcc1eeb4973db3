use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::location::is_valid_file_path;

/// Compare the paths of two XML sitemaps
#[derive(Parser, Debug, Clone)]
#[command(name = "sitemap-diff")]
#[command(about = "Compare two sitemap.xml files and find differences")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// First sitemap: local path, http(s) URL or s3://bucket/key[:region://region]
    #[arg(help = "Path or URL to the first sitemap")]
    pub sitemap1: String,

    /// Second sitemap, same forms as the first
    #[arg(help = "Path or URL to the second sitemap")]
    pub sitemap2: String,

    /// Paths to exclude from comparison (comma-separated)
    #[arg(
        short = 'e',
        long = "exclude",
        help = "Paths to exclude from comparison (e.g., '/,/about')"
    )]
    pub exclude: Option<String>,

    /// Write the comparison as JSON instead of printing a summary
    #[arg(short = 'o', long = "output", help = "JSON file to write the result to")]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long = "debug", help = "Enable debug logging")]
    pub debug: bool,

    /// Only emit warnings, errors and plain progress lines
    #[arg(long = "quiet", help = "Quiet mode", conflicts_with = "debug")]
    pub quiet: bool,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    #[arg(short = 'v', long = "version", action = ArgAction::Version, help = "Print version")]
    pub version: Option<bool>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// `None` when `--exclude` was not given, so configured exclusions apply
    pub fn get_exclude_paths(&self) -> Option<Vec<String>> {
        self.exclude.as_ref().map(|exclude| {
            exclude
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }

    /// Log level requested by `--debug` or `--quiet`
    pub fn log_level(&self) -> Option<&'static str> {
        if self.debug {
            Some("debug")
        } else if self.quiet {
            Some("quiet")
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sitemap1.trim().is_empty() || self.sitemap2.trim().is_empty() {
            return Err("Both sitemap1 and sitemap2 must be provided".to_string());
        }
        if let Some(output) = &self.output {
            let valid = output
                .to_str()
                .is_some_and(|p| is_valid_file_path(p) && p.ends_with(".json"));
            if !valid {
                return Err(format!(
                    "Invalid output file name: {}. Must be a valid JSON file (e.g., \"output.json\")",
                    output.display()
                ));
            }
        }
        Ok(())
    }
}
