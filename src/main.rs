use tracing_subscriber::{fmt, EnvFilter};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let config = cartable::config::ClientConfig::from_env();
    info!(
        target: "cartable",
        "cartable starting: RUST_LOG='{}', api_url='{}', state_file={:?}",
        rust_log, config.base_url, config.state_file
    );

    cartable::cli::run(config).await
}
