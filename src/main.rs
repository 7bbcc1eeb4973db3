use std::process::ExitCode;
use std::sync::Arc;

use anyhow::anyhow;

use sitemap_diff::{
    AsyncHttpClient, Cli, ConfigManager, Logger, Output, PipelineOptions, S3ObjectStore,
    SitemapComparer, SitemapError, SourceFetcher, init_tracing, write_json,
};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse_args();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    cli.validate().map_err(|e| anyhow!(e))?;

    let config = ConfigManager::load_config(&cli)
        .await
        .map_err(SitemapError::from)?;

    let logger = Arc::new(Logger::from_name(&config.output.log_level)?);
    logger.debug(format!("Configuration: {config:?}"));

    let http_client = AsyncHttpClient::new(config.http_client_config())?;
    let object_store = Arc::new(S3ObjectStore::new(config.storage.default_region.clone()));
    let fetcher = SourceFetcher::new(http_client, object_store);
    let comparer = SitemapComparer::new(fetcher, logger);

    let options = PipelineOptions::default().with_exclude_paths(config.compare.exclude_paths);
    let result = comparer
        .compare_paths(&cli.sitemap1, &cli.sitemap2, &options)
        .await?;

    match &cli.output {
        Some(path) => {
            write_json(path, &result).await?;
            println!(
                "Sitemap paths and differences successfully written to {}",
                path.display()
            );
        }
        None => print!("{}", Output::new().format_result(&result)),
    }

    Ok(())
}
