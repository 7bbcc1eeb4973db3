use tempfile::TempDir;

use sitemap_diff::{DiffResult, Output, SitemapError, read_json, write_json};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_written_json_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sitemap-diff.json");
    let result = DiffResult::from_paths(
        "local.xml",
        "s3://bucket/sitemap.xml",
        &strings(&["/", "/about", "/contact"]),
        &strings(&["/", "/about", "/blog"]),
    );

    write_json(&path, &result).await.unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["sitemap1"], "local.xml");
    assert_eq!(value["sitemap2"], "s3://bucket/sitemap.xml");
    assert_eq!(value["commonPaths"], serde_json::json!(["/", "/about"]));
    assert_eq!(value["sitemap1PathsNotInSitemap2"], serde_json::json!(["/contact"]));
    assert_eq!(value["sitemap2PathsNotInSitemap1"], serde_json::json!(["/blog"]));

    assert_eq!(read_json(&path).await.unwrap(), result);
}

#[tokio::test]
async fn test_invalid_output_path_message() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("result.xml");
    let result = DiffResult::from_paths("a.xml", "b.xml", &[], &[]);

    let error = write_json(&path, &result).await.unwrap_err();
    assert!(matches!(error, SitemapError::InvalidOutputFile { .. }));
    assert!(error.to_string().contains("Must be a valid JSON file"));
}

#[tokio::test]
async fn test_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("result.json");
    let result = DiffResult::from_paths("a.xml", "b.xml", &[], &[]);

    assert!(matches!(
        write_json(&path, &result).await,
        Err(SitemapError::Io(_))
    ));
}

#[test]
fn test_empty_sitemaps_summary() {
    let result = DiffResult::from_paths("a.xml", "b.xml", &[], &[]);
    let formatted = Output::with_colors(false).format_result(&result);
    assert!(formatted.contains("No path differences found"));
    assert!(formatted.contains("No common paths found"));
}
