#![cfg(not(tarpaulin_include))]

use avocado_dashboard::app;
use avocado_dashboard::config::Config;
use std::env;

/// Main entry point for the dashboard web server
///
/// Reads the configuration from the environment and the command line,
/// loads the dataset and serves the dashboard until the process exits.
///
/// # Usage
/// `dashboard [data_path] [port]`
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Error if the dataset cannot be loaded or the port is unavailable
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env_and_args(&args)?;
    log::info!("Starting avocado dashboard with data from {}", config.data_path.display());

    app::run(config).await
}
