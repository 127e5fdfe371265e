#[macro_use]
extern crate rust_i18n;

mod calendar;
mod components;
mod config;
mod content;
mod error;
mod shutdown;
mod startup;
mod utils;
mod web;

use tracing::info;

// Initialize i18n
i18n!("locales", fallback = "en");

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Hanbit web");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the web server
    startup::start_server(config).await
}
