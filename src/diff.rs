//! Set difference between two path sequences

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SitemapError};

/// Three-way split of two sequences.
///
/// Each list keeps the order and multiplicity of the sequence it was drawn
/// from; `common_elements` is drawn from the first sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDiff<T> {
    pub common_elements: Vec<T>,
    pub elements1_not_in2: Vec<T>,
    pub elements2_not_in1: Vec<T>,
}

/// Split `a` and `b` into common and one-sided elements
pub fn diff<T>(a: &[T], b: &[T]) -> SequenceDiff<T>
where
    T: Eq + Hash + Clone,
{
    let set_a: HashSet<&T> = a.iter().collect();
    let set_b: HashSet<&T> = b.iter().collect();

    let (common_elements, elements1_not_in2): (Vec<T>, Vec<T>) =
        a.iter().cloned().partition(|item| set_b.contains(item));
    let elements2_not_in1 = b
        .iter()
        .filter(|item| !set_a.contains(item))
        .cloned()
        .collect();

    SequenceDiff {
        common_elements,
        elements1_not_in2,
        elements2_not_in1,
    }
}

/// [`diff`] over dynamically typed input; both values must be JSON arrays
pub fn diff_values(a: &Value, b: &Value) -> Result<SequenceDiff<Value>> {
    let (Some(a), Some(b)) = (a.as_array(), b.as_array()) else {
        return Err(SitemapError::InvalidArgument(
            "Both arguments must be arrays".to_string(),
        ));
    };

    // serde_json::Value is not Hash, so compare by canonical text
    let keys_a: HashSet<String> = a.iter().map(Value::to_string).collect();
    let keys_b: HashSet<String> = b.iter().map(Value::to_string).collect();

    let (common_elements, elements1_not_in2): (Vec<Value>, Vec<Value>) = a
        .iter()
        .cloned()
        .partition(|item| keys_b.contains(&item.to_string()));
    let elements2_not_in1 = b
        .iter()
        .filter(|item| !keys_a.contains(&item.to_string()))
        .cloned()
        .collect();

    Ok(SequenceDiff {
        common_elements,
        elements1_not_in2,
        elements2_not_in1,
    })
}

/// Outcome of comparing two sitemaps, as written to `--output` files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub sitemap1: String,
    pub sitemap2: String,
    pub common_paths: Vec<String>,
    #[serde(rename = "sitemap1PathsNotInSitemap2")]
    pub sitemap1_paths_not_in_sitemap2: Vec<String>,
    #[serde(rename = "sitemap2PathsNotInSitemap1")]
    pub sitemap2_paths_not_in_sitemap1: Vec<String>,
}

impl DiffResult {
    /// Diff the extracted paths of two sitemaps
    pub fn from_paths(sitemap1: &str, sitemap2: &str, paths1: &[String], paths2: &[String]) -> Self {
        let SequenceDiff {
            common_elements,
            elements1_not_in2,
            elements2_not_in1,
        } = diff(paths1, paths2);

        Self {
            sitemap1: sitemap1.to_string(),
            sitemap2: sitemap2.to_string(),
            common_paths: common_elements,
            sitemap1_paths_not_in_sitemap2: elements1_not_in2,
            sitemap2_paths_not_in_sitemap1: elements2_not_in1,
        }
    }

    /// True when neither sitemap has a path the other lacks
    pub fn is_identical(&self) -> bool {
        self.sitemap1_paths_not_in_sitemap2.is_empty()
            && self.sitemap2_paths_not_in_sitemap1.is_empty()
    }
}
