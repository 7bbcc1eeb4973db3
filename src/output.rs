//! Comparison output
//!
//! Human-readable summaries for the terminal and JSON files for `--output`.

use std::path::Path;

use crate::diff::DiffResult;
use crate::error::{Result, SitemapError};
use crate::location::{is_valid_file_path, is_valid_filename};

/// Formatter for the terminal summary of a [`DiffResult`]
pub struct Output {
    show_colors: bool,
}

impl Output {
    pub fn new() -> Self {
        Self {
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn with_colors(show_colors: bool) -> Self {
        Self { show_colors }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn format_paths(paths: &[String]) -> String {
        paths.iter().map(|path| format!("  {path}\n")).collect()
    }

    pub fn format_result(&self, result: &DiffResult) -> String {
        let mut output = String::new();

        if result.is_identical() {
            output.push_str(&format!(
                "\n{} between the two sitemaps \"{}\" and \"{}\".\n",
                self.colorize("No path differences found", "32"),
                result.sitemap1,
                result.sitemap2
            ));
        } else {
            output.push_str(&format!("\n{}\n", self.colorize("Different paths found:", "33")));
            output.push_str(&self.format_one_sided(
                ("sitemap1", &result.sitemap1),
                ("sitemap2", &result.sitemap2),
                &result.sitemap1_paths_not_in_sitemap2,
            ));
            output.push_str(&self.format_one_sided(
                ("sitemap2", &result.sitemap2),
                ("sitemap1", &result.sitemap1),
                &result.sitemap2_paths_not_in_sitemap1,
            ));
        }

        output.push_str(&self.format_common(result));
        output
    }

    fn format_one_sided(
        &self,
        (label, location): (&str, &str),
        (other_label, other): (&str, &str),
        missing: &[String],
    ) -> String {
        if missing.is_empty() {
            return format!(
                "\n{label} \"{location}\" paths are all in {other_label} \"{other}\" paths.\n"
            );
        }

        format!(
            "\n{} \"{location}\" paths not in {other_label} \"{other}\":\n{}",
            self.colorize(label, "31"),
            Self::format_paths(missing)
        )
    }

    fn format_common(&self, result: &DiffResult) -> String {
        if result.common_paths.is_empty() {
            return format!(
                "\nNo common paths found between the two sitemaps \"{}\" and \"{}\".\n",
                result.sitemap1, result.sitemap2
            );
        }

        format!(
            "\n{}\n{}",
            self.colorize("Common paths found in both sitemaps:", "36"),
            Self::format_paths(&result.common_paths)
        )
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `result` to `path` as 2-space indented JSON.
///
/// `path` must be a valid file path ending in `.json`, and its last component a
/// plain file name.
pub async fn write_json(path: &Path, result: &DiffResult) -> Result<()> {
    let valid_path = path
        .to_str()
        .is_some_and(|p| is_valid_file_path(p) && p.ends_with(".json"));
    let valid_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(is_valid_filename);
    if !valid_path || !valid_name {
        return Err(SitemapError::InvalidOutputFile {
            path: path.to_path_buf(),
        });
    }

    let json = serde_json::to_string_pretty(result)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Read a result previously written by [`write_json`]
pub async fn read_json(path: &Path) -> Result<DiffResult> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
