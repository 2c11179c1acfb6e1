//! # Tickerboard Web
//!
//! axum surface over [`tickerboard_core::MarketDataService`].
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Router, handlers, and the `x-data-origin` header |
//! | [`config`] | clap server arguments with environment fallbacks |
//! | [`error`] | `{"error": ...}` responses |
//! | [`telemetry`] | tracing subscriber setup |

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;

pub use api::{app_router, AppState, DATA_ORIGIN_HEADER};
pub use config::{LogFormat, ServerArgs};
pub use error::{ApiError, ApiResult};
