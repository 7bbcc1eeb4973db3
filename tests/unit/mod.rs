pub mod location_tests;
pub mod output_tests;
pub mod sitemap_tests;
