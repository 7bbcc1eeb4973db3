//! Route and path extraction from validated sitemaps

use std::collections::HashSet;

use url::Url;

use crate::logger::Logger;
use crate::sitemap::{is_parseable_date, parse_validate};

/// Distinct values that occur more than once, in first-seen order
fn duplicated_values(values: &[String]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(values.len());
    let mut reported: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for value in values {
        if !seen.insert(value.as_str()) && reported.insert(value.as_str()) {
            duplicates.push(value);
        }
    }
    duplicates
}

/// Extract the `<loc>` routes of a `<urlset>` sitemap in document order.
///
/// Returns `None` for malformed or invalid XML and for anything that is not a
/// `<urlset>` (sitemap indexes included). Duplicates are kept.
pub fn parse_routes(xml: &str, logger: &Logger) -> Option<Vec<String>> {
    let Some(sitemap) = parse_validate(xml, logger) else {
        logger.error("Failed to parse sitemap XML");
        return None;
    };

    let Some(urlset) = sitemap.urlset else {
        logger.error(
            "\tERROR: Unsupported sitemap.xml file. Only <urlset> sitemaps are supported, \
             sitemap indexes are not",
        );
        return None;
    };

    if urlset.url.is_empty() {
        logger.warn("\t<urlset> does not contain <url> elements. Returning empty list.");
        return Some(Vec::new());
    }

    let routes: Vec<String> = urlset
        .url
        .into_iter()
        .filter_map(|entry| {
            let Some(loc) = entry.loc else {
                logger.error(format!(
                    "\tMissing <loc> field in <url> element with lastmod: {} priority: {}",
                    entry.lastmod.as_deref().unwrap_or("none"),
                    entry.priority.as_deref().unwrap_or("none")
                ));
                return None;
            };
            if let Some(lastmod) = &entry.lastmod
                && !is_parseable_date(lastmod)
            {
                logger.warn(format!("\tInvalid <lastmod> date format in <url><loc>: {loc}"));
            }
            Some(loc)
        })
        .collect();

    let duplicates = duplicated_values(&routes);
    if !duplicates.is_empty() {
        logger.warn(format!(
            "\tDuplicate routes found in the sitemap: {}",
            duplicates.join(", ")
        ));
    }

    Some(routes)
}

/// Extract URL paths (scheme, host, query and fragment dropped) from a sitemap.
///
/// Routes that are not absolute URLs are skipped. Paths equal to an entry of
/// `exclude_paths` are removed.
pub fn parse_paths(xml: &str, exclude_paths: &[String], logger: &Logger) -> Option<Vec<String>> {
    let routes = parse_routes(xml, logger)?;
    if routes.is_empty() {
        return Some(Vec::new());
    }

    let paths = routes
        .iter()
        .filter_map(|route| match Url::parse(route) {
            Ok(url) => Some(url.path().to_string()),
            Err(e) => {
                logger.error(format!("Invalid URL: {route} ({e})"));
                None
            }
        })
        .filter(|path| !exclude_paths.contains(path))
        .collect();

    Some(paths)
}
