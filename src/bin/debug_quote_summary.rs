use dotenv::dotenv;
use finance_crawler::config::Config;
use finance_crawler::services::yahoo::fetch_financial_data;
use finance_crawler::Crawler;
use log::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let ticker = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    info!("Testing Yahoo Finance quote summary for {}...", ticker);

    let config = Config::from_env();
    let client = Crawler::default_client()?;

    match fetch_financial_data(&client, &config.yahoo, &ticker).await {
        Ok(record) => {
            info!("SUCCESS: {:?}", record);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Err(e) => {
            error!("ERROR ({:?}): {}", e.kind(), e);
            return Err(e.into());
        }
    }

    Ok(())
}
