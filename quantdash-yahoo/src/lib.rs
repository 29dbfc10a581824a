//! quantdash-yahoo
//!
//! Connector that implements `QuantConnector` on top of the public Yahoo
//! Finance JSON endpoints: daily history with dividends and splits, company
//! info, statements, earnings, holders, recommendations, ESG, calendar, and
//! options.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `YahooClient`.
pub mod adapter;
/// HTTP client with the cookie and crumb handshake.
pub mod client;
mod convert;
/// Serde mirrors of the Yahoo payloads.
pub mod wire;

use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{RealAdapter, YfHistory, YfOptions, YfSummary};
use async_trait::async_trait;
use quantdash_core::{
    DashError, Earnings, Frame, HistoryRequest, Holders, Info, OptionChain, PriceHistory,
    Statements, Symbol,
    connector::{
        CalendarProvider, EarningsProvider, EsgProvider, HistoryProvider, HoldersProvider,
        InfoProvider, OptionChainProvider, OptionsExpirationsProvider, QuantConnector,
        RecommendationsProvider, StatementsProvider,
    },
};

pub use client::{Endpoints, YahooClient};

use crate::client::CONNECTOR;

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type SummaryAdapter = Arc<dyn YfSummary>;
#[cfg(not(feature = "test-adapters"))]
type SummaryAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type OptionsAdapter = Arc<dyn YfOptions>;
#[cfg(not(feature = "test-adapters"))]
type OptionsAdapter = AdapterArc;

/// Public connector type. Production users construct with `YahooConnector::new_default()`.
pub struct YahooConnector {
    history: HistoryAdapter,
    summary: SummaryAdapter,
    options: OptionsAdapter,
}

impl YahooConnector {
    /// Connector name used in errors and logs.
    pub const NAME: &'static str = CONNECTOR;

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("no matches")
    }

    fn normalize_error(e: DashError, what: &str) -> DashError {
        match e {
            DashError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    DashError::not_found(what.to_string())
                } else {
                    DashError::connector(CONNECTOR, msg)
                }
            }
            DashError::Other(msg) => DashError::connector(CONNECTOR, msg),
            other => other,
        }
    }

    /// Build against the public Yahoo hosts with a per-request HTTP timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new_default(timeout: Duration) -> Result<Self, DashError> {
        let a = RealAdapter::new_default(timeout)?;
        Ok(Self::from_adapter(&a))
    }

    /// Build against custom endpoints (e.g. a local mock server).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_endpoints(endpoints: Endpoints, timeout: Duration) -> Result<Self, DashError> {
        let a = RealAdapter::with_endpoints(endpoints, timeout)?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from an existing `YahooClient`.
    #[must_use]
    pub fn new_with_client(client: YahooClient) -> Self {
        Self::from_adapter(&RealAdapter::new(client))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            history: adapter.clone_arc_history(),
            summary: adapter.clone_arc_summary(),
            options: adapter.clone_arc_options(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            history: Arc::clone(&shared),
            summary: Arc::clone(&shared),
            options: shared,
        }
    }

    async fn summary_modules(
        &self,
        symbol: &Symbol,
        modules: &[&str],
        what: &str,
    ) -> Result<wire::SummaryModules, DashError> {
        self.summary
            .modules(symbol.as_str(), modules)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("{what} for {symbol}")))
    }
}

#[async_trait]
impl HistoryProvider for YahooConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "quantdash::yahoo",
            skip(self, symbol, req),
            fields(symbol = %symbol, start = %req.start(), end = %req.end()),
        )
    )]
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<PriceHistory, DashError> {
        let what = format!("history for {symbol}");
        let (chart, actions) = tokio::join!(
            self.history.chart(symbol.as_str(), req),
            self.history.actions(symbol.as_str()),
        );
        let chart = chart.map_err(|e| Self::normalize_error(e, &what))?;
        let actions = match actions {
            Ok(events) => Some(events),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "quantdash::yahoo",
                    symbol = %symbol,
                    error = %_e,
                    "full corporate action record unavailable; using chart events"
                );
                None
            }
        };
        convert::history(symbol, req, chart, actions)
    }
}

#[async_trait]
impl InfoProvider for YahooConnector {
    async fn info(&self, symbol: &Symbol) -> Result<Info, DashError> {
        let m = self
            .summary_modules(symbol, convert::INFO_MODULES, "info")
            .await?;
        Ok(convert::info(&m))
    }
}

#[async_trait]
impl StatementsProvider for YahooConnector {
    async fn statements(
        &self,
        symbol: &Symbol,
        quarterly: bool,
    ) -> Result<Statements, DashError> {
        let modules = if quarterly {
            convert::QUARTERLY_STATEMENT_MODULES
        } else {
            convert::ANNUAL_STATEMENT_MODULES
        };
        let m = self.summary_modules(symbol, modules, "statements").await?;
        Ok(convert::statements(&m, quarterly))
    }
}

#[async_trait]
impl EarningsProvider for YahooConnector {
    async fn earnings(&self, symbol: &Symbol) -> Result<Earnings, DashError> {
        let m = self
            .summary_modules(symbol, &["earnings"], "earnings")
            .await?;
        Ok(convert::earnings(&m))
    }
}

#[async_trait]
impl HoldersProvider for YahooConnector {
    async fn holders(&self, symbol: &Symbol) -> Result<Holders, DashError> {
        let m = self
            .summary_modules(symbol, convert::HOLDERS_MODULES, "holders")
            .await?;
        Ok(convert::holders(&m))
    }
}

#[async_trait]
impl RecommendationsProvider for YahooConnector {
    async fn recommendations(&self, symbol: &Symbol) -> Result<Frame, DashError> {
        let m = self
            .summary_modules(symbol, &["recommendationTrend"], "recommendations")
            .await?;
        Ok(convert::recommendations(&m))
    }
}

#[async_trait]
impl EsgProvider for YahooConnector {
    async fn sustainability(&self, symbol: &Symbol) -> Result<Frame, DashError> {
        let m = self
            .summary_modules(symbol, &["esgScores"], "sustainability")
            .await?;
        Ok(convert::sustainability(&m))
    }
}

#[async_trait]
impl CalendarProvider for YahooConnector {
    async fn calendar(&self, symbol: &Symbol) -> Result<Frame, DashError> {
        let m = self
            .summary_modules(symbol, &["calendarEvents"], "calendar")
            .await?;
        Ok(convert::calendar(&m))
    }
}

#[async_trait]
impl OptionsExpirationsProvider for YahooConnector {
    async fn options_expirations(&self, symbol: &Symbol) -> Result<Vec<i64>, DashError> {
        let what = format!("options expirations for {symbol}");
        match self
            .options
            .options(symbol.as_str(), None)
            .await
            .map_err(|e| Self::normalize_error(e, &what))
        {
            Ok(r) => Ok(convert::expirations(&r)),
            // Symbols without listed options answer with an empty result.
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl OptionChainProvider for YahooConnector {
    async fn option_chain(
        &self,
        symbol: &Symbol,
        date: Option<i64>,
    ) -> Result<OptionChain, DashError> {
        let r = self
            .options
            .options(symbol.as_str(), date)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("option chain for {symbol}")))?;
        convert::option_chain(symbol, date, &r)
    }
}

impl QuantConnector for YahooConnector {
    fn name(&self) -> &'static str {
        CONNECTOR
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
    fn as_statements_provider(&self) -> Option<&dyn StatementsProvider> {
        Some(self as &dyn StatementsProvider)
    }
    fn as_earnings_provider(&self) -> Option<&dyn EarningsProvider> {
        Some(self as &dyn EarningsProvider)
    }
    fn as_holders_provider(&self) -> Option<&dyn HoldersProvider> {
        Some(self as &dyn HoldersProvider)
    }
    fn as_recommendations_provider(&self) -> Option<&dyn RecommendationsProvider> {
        Some(self as &dyn RecommendationsProvider)
    }
    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        Some(self as &dyn EsgProvider)
    }
    fn as_calendar_provider(&self) -> Option<&dyn CalendarProvider> {
        Some(self as &dyn CalendarProvider)
    }
    fn as_options_expirations_provider(&self) -> Option<&dyn OptionsExpirationsProvider> {
        Some(self as &dyn OptionsExpirationsProvider)
    }
    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        Some(self as &dyn OptionChainProvider)
    }
}
