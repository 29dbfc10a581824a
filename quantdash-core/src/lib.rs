//! quantdash-core
//!
//! Core types, traits, and numeric helpers shared across the quantdash workspace.
//!
//! - `types`: tickers, price bars, corporate actions, and dataset bundles.
//! - `frame`: generic tables (`Frame`, `Cell`) passed through to the renderer.
//! - `info`: the flat company info record with "N/A" lookups.
//! - `connector`: the `QuantConnector` trait and capability provider traits.
//! - `timeseries`: calendar resampling of daily closes.
//! - `analytics`: moving averages, returns, and rolling volatility.
//!
//! Provider traits are `async` via `async-trait` and are expected to be driven
//! by a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Moving averages, returns, volatility, and percent formatting.
pub mod analytics;
/// Dataset labels used in routing and errors.
pub mod capability;
/// Dashboard and indicator configuration.
pub mod config;
/// Connector capability traits and the primary `QuantConnector` interface.
pub mod connector;
/// Workspace error type.
pub mod error;
/// Generic table types.
pub mod frame;
/// Flat company info record.
pub mod info;
/// Time-series utilities for resampling.
pub mod timeseries;
/// Domain types: tickers, bars, corporate actions, and dataset bundles.
pub mod types;

pub use analytics::{ReturnSeries, ReturnsSummary, TechnicalIndicators, format_percent};
pub use capability::Capability;
pub use config::{DashConfig, IndicatorConfig};
pub use connector::QuantConnector;
pub use error::DashError;
pub use frame::{Cell, Frame};
pub use info::{Info, NA};
pub use timeseries::resample::{
    Frequency, resample_last_by, resample_monthly_close, resample_yearly_close,
};
pub use types::*;
