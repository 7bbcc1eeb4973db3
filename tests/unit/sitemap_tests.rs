use sitemap_diff::{Logger, parse_structure, parse_validate};

use crate::common::test_helpers::urlset_xml;

#[test]
fn test_full_urlset_is_valid() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-05-17T13:45:30+00:00</lastmod>
    <changefreq>weekly</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/about?lang=en&amp;ref=nav</loc>
    <priority>0.5</priority>
  </url>
</urlset>"#;

    let sitemap = parse_validate(xml, &Logger::default()).unwrap();
    let urlset = sitemap.urlset.unwrap();
    assert_eq!(urlset.url.len(), 2);
    assert_eq!(
        urlset.url[1].loc.as_deref(),
        Some("https://example.com/about?lang=en&ref=nav")
    );
    assert_eq!(urlset.url[0].changefreq.as_deref(), Some("weekly"));
    assert!(sitemap.sitemapindex.is_none());
}

#[test]
fn test_generated_fixture_is_valid() {
    let xml = urlset_xml("https://example.com", &["/", "/a", "/b"]);
    let sitemap = parse_validate(&xml, &Logger::default()).unwrap();
    assert_eq!(sitemap.urlset.unwrap().url.len(), 3);
}

#[test]
fn test_priority_out_of_range_invalidates() {
    let xml = "<urlset><url><loc>https://example.com/</loc><priority>1.5</priority></url></urlset>";
    assert!(parse_validate(xml, &Logger::default()).is_none());
}

#[test]
fn test_unknown_changefreq_invalidates() {
    let xml = "<urlset><url><loc>https://example.com/</loc><changefreq>fortnightly</changefreq></url></urlset>";
    assert!(parse_validate(xml, &Logger::default()).is_none());
}

#[test]
fn test_missing_loc_invalidates() {
    let xml = "<urlset><url><lastmod>2024-01-01</lastmod></url></urlset>";
    assert!(parse_validate(xml, &Logger::default()).is_none());
}

#[test]
fn test_nested_urlset_invalidates() {
    let xml = "<urlset><urlset><url><loc>https://example.com/</loc></url></urlset></urlset>";
    let parsed = parse_structure(xml, &Logger::default()).unwrap();
    assert!(parsed.urlset.unwrap().has_nested_urlset);
    assert!(parse_validate(xml, &Logger::default()).is_none());
}

#[test]
fn test_sitemap_index() {
    let valid = "<sitemapindex><sitemap><loc>https://example.com/a.xml</loc><lastmod>2024-02</lastmod></sitemap></sitemapindex>";
    let sitemap = parse_validate(valid, &Logger::default()).unwrap();
    assert_eq!(sitemap.sitemapindex.unwrap().sitemap.len(), 1);

    let bad_date = "<sitemapindex><sitemap><loc>https://example.com/a.xml</loc><lastmod>someday</lastmod></sitemap></sitemapindex>";
    assert!(parse_validate(bad_date, &Logger::default()).is_none());

    assert!(parse_validate("<sitemapindex></sitemapindex>", &Logger::default()).is_none());
}

#[test]
fn test_malformed_xml() {
    let logger = Logger::default();
    assert!(parse_structure("", &logger).is_none());
    assert!(parse_structure("<urlset><url></urlset>", &logger).is_none());
    assert!(parse_structure("<urlset>", &logger).is_none());
}

#[test]
fn test_unrelated_root_is_vacuously_valid() {
    let sitemap = parse_validate("<rss><channel/></rss>", &Logger::default()).unwrap();
    assert!(sitemap.urlset.is_none());
    assert!(sitemap.sitemapindex.is_none());
}
