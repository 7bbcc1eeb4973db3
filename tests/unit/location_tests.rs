use std::path::PathBuf;

use sitemap_diff::{S3Location, SitemapLocation, is_valid_file_path, is_valid_filename};

#[test]
fn test_s3_with_region() {
    let location = SitemapLocation::parse("s3://bucket/sitemap.xml:region://us-west-2").unwrap();
    assert_eq!(
        location,
        SitemapLocation::ObjectStore(S3Location {
            bucket: "bucket".to_string(),
            key: "sitemap.xml".to_string(),
            region: Some("us-west-2".to_string()),
        })
    );
    assert_eq!(location.kind(), "S3 file");
}

#[test]
fn test_s3_nested_key_without_region() {
    let location = SitemapLocation::parse("s3://my-bucket/path/to/sitemap.xml").unwrap();
    let SitemapLocation::ObjectStore(s3) = location else {
        panic!("Expected an object storage location");
    };
    assert_eq!(s3.bucket, "my-bucket");
    assert_eq!(s3.key, "path/to/sitemap.xml");
    assert!(s3.region.is_none());
    assert_eq!(s3.to_string(), "s3://my-bucket/path/to/sitemap.xml");
}

#[test]
fn test_s3_rejections() {
    assert!(SitemapLocation::parse("s3://bucket/sitemap.txt").is_none());
    assert!(SitemapLocation::parse("s3://bucket/sitemap.xml:region://").is_none());
    assert!(SitemapLocation::parse("s3://bucket/a.xml:region://x:region://y").is_none());
    assert!(SitemapLocation::parse("s3://.xml").is_none());
}

#[test]
fn test_http_asymmetry() {
    assert!(matches!(
        SitemapLocation::parse("http://example.com/sitemap"),
        Some(SitemapLocation::HttpUrl { .. })
    ));
    assert!(matches!(
        SitemapLocation::parse("https://example.com/sitemap.xml"),
        Some(SitemapLocation::HttpUrl { .. })
    ));
    assert!(SitemapLocation::parse("https://example.com/sitemap").is_none());
}

#[test]
fn test_local_files() {
    assert_eq!(
        SitemapLocation::parse("./sub/dir/local-sitemap.xml"),
        Some(SitemapLocation::LocalFile {
            path: PathBuf::from("./sub/dir/local-sitemap.xml")
        })
    );
    assert!(SitemapLocation::parse("sitemap.json").is_none());
    assert!(SitemapLocation::parse("bad|name.xml").is_none());
    assert!(SitemapLocation::parse("").is_none());
}

#[test]
fn test_file_path_validation() {
    assert!(is_valid_file_path("out/diff.json"));
    assert!(is_valid_file_path("C:\\reports\\diff.json"));
    assert!(!is_valid_file_path("dir/NUL"));
    assert!(!is_valid_file_path("dir/"));
    assert!(!is_valid_file_path("what?.json"));
}

#[test]
fn test_filename_validation() {
    assert!(is_valid_filename("sitemap.xml"));
    assert!(!is_valid_filename("dir/sitemap.xml"));
    assert!(!is_valid_filename("com1"));
}
