use azure_vnet_summary::args::Args;
use azure_vnet_summary::azure::AzCliSource;
use azure_vnet_summary::config::Settings;
use clap::Parser;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    let settings: Settings = Args::parse().into();
    log::info!("#Start main() {:?}", settings);

    azure_vnet_summary::run(&settings, Arc::new(AzCliSource::new())).await?;

    log::info!("Script execution completed.");
    Ok(())
}
