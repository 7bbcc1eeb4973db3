//! Sitemap XML parsing and validation
//!
//! Parsing builds a small element tree with `quick-xml` and lifts the
//! `<urlset>` / `<sitemapindex>` roots into typed structures. Validation then
//! enforces the sitemap protocol rules that matter for path extraction.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::logger::Logger;

/// Allowed `<changefreq>` values
pub const CHANGE_FREQUENCIES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Generic XML element: name, concatenated text content and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Trimmed text of the first child called `name`; empty text counts as absent
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|child| child.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// One `<url>` entry of a `<urlset>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
    pub priority: Option<String>,
    pub changefreq: Option<String>,
}

impl UrlEntry {
    fn from_element(element: &XmlElement) -> Self {
        Self {
            loc: element.child_text("loc"),
            lastmod: element.child_text("lastmod"),
            priority: element.child_text("priority"),
            changefreq: element.child_text("changefreq"),
        }
    }
}

/// One `<sitemap>` entry of a `<sitemapindex>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
}

impl IndexEntry {
    fn from_element(element: &XmlElement) -> Self {
        Self {
            loc: element.child_text("loc"),
            lastmod: element.child_text("lastmod"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    /// Entries in document order; a single `<url>` is a one-element sequence
    pub url: Vec<UrlEntry>,
    /// A `<urlset>` directly inside this `<urlset>`
    pub has_nested_urlset: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapIndex {
    pub sitemap: Vec<IndexEntry>,
}

/// Top-level shape of a sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSitemap {
    pub urlset: Option<UrlSet>,
    pub sitemapindex: Option<SitemapIndex>,
}

impl ParsedSitemap {
    fn from_roots(roots: &[XmlElement]) -> Self {
        let urlset = roots.iter().find(|root| root.name == "urlset").map(|root| UrlSet {
            url: root.children_named("url").map(UrlEntry::from_element).collect(),
            has_nested_urlset: root.child("urlset").is_some(),
        });

        let sitemapindex = roots
            .iter()
            .find(|root| root.name == "sitemapindex")
            .map(|root| SitemapIndex {
                sitemap: root
                    .children_named("sitemap")
                    .map(IndexEntry::from_element)
                    .collect(),
            });

        Self {
            urlset,
            sitemapindex,
        }
    }
}

/// Build the element tree; returns the top-level elements
fn parse_tree(xml: &str) -> Result<Vec<XmlElement>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut roots = Vec::new();

    fn attach(stack: &mut [XmlElement], roots: &mut Vec<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => roots.push(element),
        }
    }

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(XmlElement::new(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(&mut stack, &mut roots, XmlElement::new(name));
            }
            Ok(Event::End(e)) => {
                let element = stack.pop().ok_or_else(|| {
                    format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )
                })?;
                attach(&mut stack, &mut roots, element);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| e.to_string())?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "error at position {}: {e}",
                    reader.error_position()
                ));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }

    Ok(roots)
}

/// Parse sitemap XML into its structure; malformed XML yields `None`
pub fn parse_structure(xml: &str, logger: &Logger) -> Option<ParsedSitemap> {
    if xml.trim().is_empty() {
        logger.error("Sitemap XML content is empty");
        return None;
    }

    match parse_tree(xml) {
        Ok(roots) => Some(ParsedSitemap::from_roots(&roots)),
        Err(details) => {
            logger.error(format!("Error parsing XML: {details}"));
            None
        }
    }
}

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// True if `value` is a W3C datetime, RFC 3339 or RFC 2822 date, or one of the
/// common variants (space separator, `+hhmm` offset, slashed or written-out dates)
pub fn is_parseable_date(value: &str) -> bool {
    let value = value.trim();
    if DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || OFFSET_DATETIME_FORMATS
            .iter()
            .any(|format| DateTime::parse_from_str(value, format).is_ok())
    {
        return true;
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    if NAIVE_DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(naive, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
    {
        return true;
    }

    // YYYY-MM and YYYY
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok()
        || (value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()))
}

fn is_valid_priority(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|priority| (0.0..=1.0).contains(&priority))
}

/// Validate one `<url>` entry
pub fn is_valid_url_entry(entry: &UrlEntry, logger: &Logger) -> bool {
    let Some(loc) = &entry.loc else {
        logger.error("Invalid sitemap: Missing <loc> in <url> element");
        return false;
    };

    if let Some(lastmod) = &entry.lastmod
        && !is_parseable_date(lastmod)
    {
        logger.warn(format!(
            "Invalid <lastmod> date format in <url> element with loc: {loc}"
        ));
    }

    if let Some(priority) = &entry.priority
        && !is_valid_priority(priority)
    {
        logger.error(format!(
            "Invalid sitemap: <priority> must be between 0.0 and 1.0 in <url> element with loc: {loc}"
        ));
        return false;
    }

    if let Some(changefreq) = &entry.changefreq
        && !CHANGE_FREQUENCIES.contains(&changefreq.as_str())
    {
        logger.error(format!(
            "Invalid sitemap: Invalid <changefreq> value in <url> element with loc: {loc}"
        ));
        return false;
    }

    true
}

/// Validate one `<sitemap>` entry of an index
pub fn is_valid_index_entry(entry: &IndexEntry, logger: &Logger) -> bool {
    let Some(loc) = &entry.loc else {
        logger.error("Invalid sitemap index: Missing <loc> in <sitemap> element");
        return false;
    };

    if let Some(lastmod) = &entry.lastmod
        && !is_parseable_date(lastmod)
    {
        logger.error(format!(
            "Invalid sitemap index: Invalid <lastmod> date format in <sitemap> element with loc: {loc}"
        ));
        return false;
    }

    true
}

/// Check sitemap invariants; returns the structure if it holds.
///
/// A document with neither `<sitemapindex>` nor `<urlset>` passes vacuously.
pub fn validate(sitemap: ParsedSitemap, logger: &Logger) -> Option<ParsedSitemap> {
    if let Some(index) = &sitemap.sitemapindex {
        if index.sitemap.is_empty() {
            logger.error("Invalid sitemap index: <sitemapindex> does not contain <sitemap> elements");
            return None;
        }
        if !index
            .sitemap
            .iter()
            .all(|entry| is_valid_index_entry(entry, logger))
        {
            logger.error("Invalid sitemap index structure");
            return None;
        }
        logger.debug("Sitemap index is valid");
        return Some(sitemap);
    }

    if let Some(urlset) = &sitemap.urlset {
        if urlset.has_nested_urlset {
            logger.error("Invalid sitemap: Nested <urlset> found in <urlset> element");
            return None;
        }
        if !urlset.url.iter().all(|entry| is_valid_url_entry(entry, logger)) {
            logger.error("Invalid sitemap: <urlset> does not contain valid <url> elements");
            return None;
        }
        logger.debug(format!("Sitemap is valid with {} <url> entries", urlset.url.len()));
        return Some(sitemap);
    }

    logger.debug("Document has neither <urlset> nor <sitemapindex>; accepting as valid");
    Some(sitemap)
}

/// Parse then validate
pub fn parse_validate(xml: &str, logger: &Logger) -> Option<ParsedSitemap> {
    let sitemap = parse_structure(xml, logger)?;
    validate(sitemap, logger)
}
