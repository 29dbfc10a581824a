//! quantdash renders a single-page quantitative stock dashboard.
//!
//! Overview
//! - Routes each dataset request to the registered connectors that implement
//!   the `quantdash_core` provider traits, in registration order with fallback.
//! - Assembles a [`DashboardReport`]: price history, company info, statements,
//!   earnings, holders, recommendations, ESG, calendar, and one option chain,
//!   fetched concurrently, plus moving averages, returns, and volatility.
//! - Renders the report as one HTML page with inline SVG charts and serves it
//!   over axum.
//!
//! Error behavior
//! - Per-provider calls are bounded by `DashConfig::provider_timeout`.
//! - `NotFound` from every provider collapses into one `NotFound`; all
//!   timeouts into `AllProvidersTimedOut`; mixed failures into
//!   `AllProvidersFailed`.
//! - Secondary datasets that no connector offers render as empty sections.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use quantdash::{Dashboard, DashboardQuery};
//! use quantdash_core::{HistoryRequest, Symbol};
//! use quantdash_mock::MockConnector;
//!
//! let dash = Dashboard::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .build()?;
//! let req = HistoryRequest::try_new(start, end)?;
//! let report = dash.report(&DashboardQuery::new(Symbol::new("AAPL")?, req)).await?;
//! println!("{:?}", report.indicators.latest_volatility());
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
/// Sidebar form parsing.
pub mod form;
/// HTML page, table, and chart rendering.
pub mod render;
/// Report assembly across datasets.
pub mod report;
mod router;
/// axum router and server loop.
pub mod server;

pub use core::{Dashboard, DashboardBuilder, tag_err};
pub use form::{DashboardForm, FormParams};
pub use report::{DashboardQuery, DashboardReport, OptionsSection, select_expiration};
pub use server::{AppState, router, status_for};

pub use quantdash_core::{
    Capability, DashConfig, DashError, HistoryRequest, IndicatorConfig, QuantConnector,
    ReturnsSummary, Symbol, TechnicalIndicators,
};
