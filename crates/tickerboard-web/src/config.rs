//! Server arguments for the `tickerboard` binary.
//!
//! Every flag can also be set through its environment variable.
//!
//! | Option | Environment | Default |
//! |--------|-------------|---------|
//! | `--listen-addr` | `TICKERBOARD_LISTEN_ADDR` | `127.0.0.1:3000` |
//! | `--api-key` | `ALPHA_VANTAGE_API_KEY` | none (sample data only) |
//! | `--base-url` | `TICKERBOARD_BASE_URL` | Alpha Vantage query endpoint |
//! | `--sample-data` | `TICKERBOARD_SAMPLE_DATA` | built-in catalog |
//! | `--sample-seed` | `TICKERBOARD_SAMPLE_SEED` | fresh seed per request |
//! | `--provider-timeout-ms` | `TICKERBOARD_PROVIDER_TIMEOUT_MS` | no timeout |
//! | `--log-format` | `TICKERBOARD_LOG_FORMAT` | `text` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tickerboard_core::provider::ALPHA_VANTAGE_BASE_URL;
use tickerboard_core::DashboardConfig;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "tickerboard",
    version,
    about = "Financial dashboard API with sample-data fallback"
)]
pub struct ServerArgs {
    /// Address the HTTP server binds to.
    #[arg(long, env = "TICKERBOARD_LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    pub listen_addr: SocketAddr,

    /// Alpha Vantage API key. Without it every endpoint serves sample data.
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider query endpoint.
    #[arg(long, env = "TICKERBOARD_BASE_URL", default_value = ALPHA_VANTAGE_BASE_URL)]
    pub base_url: String,

    /// JSON file replacing the built-in sample catalog.
    #[arg(long, env = "TICKERBOARD_SAMPLE_DATA")]
    pub sample_data: Option<PathBuf>,

    /// Fixed seed for generated price series.
    #[arg(long, env = "TICKERBOARD_SAMPLE_SEED")]
    pub sample_seed: Option<u64>,

    /// Timeout for each provider call in milliseconds.
    #[arg(long, env = "TICKERBOARD_PROVIDER_TIMEOUT_MS")]
    pub provider_timeout_ms: Option<u64>,

    /// Log output format.
    #[arg(long, env = "TICKERBOARD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

impl ServerArgs {
    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig::new()
            .with_api_key(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_sample_seed(self.sample_seed)
            .with_provider_timeout(self.provider_timeout_ms.map(Duration::from_millis))
    }
}
