use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tickerboard_core::{FallbackCatalog, MarketDataService, ReqwestHttpClient};
use tickerboard_web::telemetry::init_tracing;
use tickerboard_web::{app_router, AppState, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    init_tracing(args.log_format);

    let catalog = match &args.sample_data {
        Some(path) => FallbackCatalog::from_path(path)
            .with_context(|| format!("loading sample data from {}", path.display()))?,
        None => FallbackCatalog::sample(),
    };

    let config = args.dashboard_config();
    if !config.has_credentials() {
        tracing::info!("no Alpha Vantage API key configured, all endpoints serve sample data");
    }

    let service = MarketDataService::new(
        config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(catalog),
    );
    let router = app_router(AppState::new(service));

    tracing::info!("Listening on {}", args.listen_addr);
    let listener = tokio::net::TcpListener::bind(args.listen_addr)
        .await
        .with_context(|| format!("binding {}", args.listen_addr))?;
    axum::serve(listener, router).await?;
    Ok(())
}
