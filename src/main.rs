use clap::Parser;
use dotenv::dotenv;
use log::info;

use finance_crawler::config::Config;
use finance_crawler::services::csv_export;
use finance_crawler::Crawler;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    dotenv().ok();
    // Default to info so per-ticker warnings reach the console; RUST_LOG still wins.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.perplexity.api_key.is_none() {
        info!("PERPLEXITY_API_KEY not set; fallback lookups will be skipped");
    }

    let crawler = Crawler::new(Crawler::default_client()?, config);
    let report = crawler.run(cli.tickers.as_slice()).await;

    csv_export::write_csv(&report.records, &cli.output)?;

    if !report.skipped.is_empty() {
        info!("No data for {} ticker(s): {}", report.skipped.len(), report.skipped.join(", "));
    }
    info!(
        "Done: {} of {} tickers written to {}",
        report.records.len(),
        cli.tickers.len(),
        cli.output.display()
    );

    Ok(())
}
