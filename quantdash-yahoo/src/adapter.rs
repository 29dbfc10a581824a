#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use quantdash_core::{DashError, HistoryRequest};

use crate::client::{CONNECTOR, Endpoints, YahooClient};
use crate::wire::{
    ApiError, ChartEnvelope, ChartEvents, ChartResult, OptionsEnvelope, OptionsResult,
    SummaryEnvelope, SummaryModules,
};

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch the daily chart (bars, dividends, splits) for `symbol` over `req`.
    async fn chart(&self, symbol: &str, req: HistoryRequest) -> Result<ChartResult, DashError>;

    /// Fetch every dividend and split on record for `symbol`.
    ///
    /// Adapters without a separate actions source return `Unsupported`, and
    /// the connector falls back to the events attached to the chart.
    async fn actions(&self, _symbol: &str) -> Result<ChartEvents, DashError> {
        Err(DashError::unsupported("corporate actions"))
    }
}

/// quoteSummary abstraction: one call returns the requested modules.
#[async_trait]
pub trait YfSummary: Send + Sync {
    /// Fetch `modules` (e.g. `assetProfile`, `financialData`) for `symbol`.
    async fn modules(&self, symbol: &str, modules: &[&str]) -> Result<SummaryModules, DashError>;
}

/// Options abstraction for expirations and option chain.
#[async_trait]
pub trait YfOptions: Send + Sync {
    /// Fetch the options payload for an optional expiration (nearest when `None`).
    async fn options(&self, symbol: &str, date: Option<i64>) -> Result<OptionsResult, DashError>;
}

/// Real adapter backed by a single `YahooClient` instance.
/// `YahooClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: YahooClient,
}

impl RealAdapter {
    /// Build a client against the public Yahoo hosts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new_default(timeout: std::time::Duration) -> Result<Self, DashError> {
        Self::with_endpoints(Endpoints::default(), timeout)
    }

    /// Build a client against custom endpoints (e.g. a local mock server).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_endpoints(
        endpoints: Endpoints,
        timeout: std::time::Duration,
    ) -> Result<Self, DashError> {
        Ok(Self {
            client: YahooClient::new(endpoints, timeout)?,
        })
    }

    /// Wrap an existing `YahooClient`.
    #[must_use]
    pub const fn new(client: YahooClient) -> Self {
        Self { client }
    }
}

/// Map an error object embedded in a 200 response.
pub(crate) fn map_api_err(e: &ApiError, context: &str) -> DashError {
    let msg = e.message();
    if msg.to_ascii_lowercase().contains("not found") {
        DashError::not_found(context.to_string())
    } else {
        DashError::connector(CONNECTOR, format!("{msg}: {context}"))
    }
}

fn first_or_not_found<T>(
    result: Option<Vec<T>>,
    error: Option<&ApiError>,
    context: &str,
) -> Result<T, DashError> {
    if let Some(e) = error {
        return Err(map_api_err(e, context));
    }
    result
        .and_then(|v| v.into_iter().next())
        .ok_or_else(|| DashError::not_found(context.to_string()))
}

fn unix_midnight(date: chrono::NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Query bounds for `req`, a day wider on each side than its UTC midnights.
///
/// Exchanges east of UTC stamp their sessions before UTC midnight; the extra
/// bars are clipped to `req` in the exchange timezone after parsing.
fn chart_bounds(req: HistoryRequest) -> (i64, i64) {
    const DAY: i64 = 86_400;
    (unix_midnight(req.start()) - DAY, unix_midnight(req.end()) + DAY)
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn chart(&self, symbol: &str, req: HistoryRequest) -> Result<ChartResult, DashError> {
        let context = format!("history for {symbol}");
        let (period1, period2) = chart_bounds(req);
        let url = self.client.api_url(
            &["v8", "finance", "chart", symbol],
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "div|split".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ],
        )?;
        let env: ChartEnvelope = self.client.get_json(url, &context).await?;
        first_or_not_found(env.chart.result, env.chart.error.as_ref(), &context)
    }

    async fn actions(&self, symbol: &str) -> Result<ChartEvents, DashError> {
        let context = format!("corporate actions for {symbol}");
        let url = self.client.api_url(
            &["v8", "finance", "chart", symbol],
            &[
                ("range", "max".to_string()),
                ("interval", "3mo".to_string()),
                ("events", "div|split".to_string()),
            ],
        )?;
        let env: ChartEnvelope = self.client.get_json(url, &context).await?;
        let chart = first_or_not_found(env.chart.result, env.chart.error.as_ref(), &context)?;
        Ok(chart.events.unwrap_or_default())
    }
}

#[async_trait]
impl YfSummary for RealAdapter {
    async fn modules(&self, symbol: &str, modules: &[&str]) -> Result<SummaryModules, DashError> {
        let context = format!("{} for {symbol}", modules.join(","));
        let url = self.client.api_url(
            &["v10", "finance", "quoteSummary", symbol],
            &[("modules", modules.join(","))],
        )?;
        let env: SummaryEnvelope = self.client.get_json_with_crumb(url, &context).await?;
        let map = first_or_not_found(
            env.quote_summary.result,
            env.quote_summary.error.as_ref(),
            &context,
        )?;
        Ok(SummaryModules(map))
    }
}

#[async_trait]
impl YfOptions for RealAdapter {
    async fn options(&self, symbol: &str, date: Option<i64>) -> Result<OptionsResult, DashError> {
        let context = format!("options for {symbol}");
        let query: Vec<(&str, String)> = date.map(|d| ("date", d.to_string())).into_iter().collect();
        let url = self
            .client
            .api_url(&["v7", "finance", "options", symbol], &query)?;
        let env: OptionsEnvelope = self.client.get_json_with_crumb(url, &context).await?;
        first_or_not_found(
            env.option_chain.result,
            env.option_chain.error.as_ref(),
            &context,
        )
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send + Sync + 'static + Fn(String, HistoryRequest) -> Result<ChartResult, DashError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, HistoryRequest) -> Result<ChartResult, DashError>,
        {
            async fn chart(
                &self,
                symbol: &str,
                req: HistoryRequest,
            ) -> Result<ChartResult, DashError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfSummary {
    /// Build a `YfSummary` from a closure receiving the symbol and requested module names (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfSummary>
    where
        F: Send + Sync + 'static + Fn(String, Vec<String>) -> Result<SummaryModules, DashError>,
    {
        struct FnSummary<F>(F);
        #[async_trait]
        impl<F> YfSummary for FnSummary<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, Vec<String>) -> Result<SummaryModules, DashError>,
        {
            async fn modules(
                &self,
                symbol: &str,
                modules: &[&str],
            ) -> Result<SummaryModules, DashError> {
                (self.0)(
                    symbol.to_string(),
                    modules.iter().map(ToString::to_string).collect(),
                )
            }
        }
        Arc::new(FnSummary(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfOptions {
    /// Build a `YfOptions` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfOptions>
    where
        F: Send + Sync + 'static + Fn(String, Option<i64>) -> Result<OptionsResult, DashError>,
    {
        struct FnOptions<F>(F);
        #[async_trait]
        impl<F> YfOptions for FnOptions<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, Option<i64>) -> Result<OptionsResult, DashError>,
        {
            async fn options(
                &self,
                symbol: &str,
                date: Option<i64>,
            ) -> Result<OptionsResult, DashError> {
                (self.0)(symbol.to_string(), date)
            }
        }
        Arc::new(FnOptions(f))
    }
}

// Convenience so the connector can take a single adapter and split it into trait objects.
/// Helper trait to split a concrete adapter into arc trait objects.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn YfHistory>`.
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        <dyn YfHistory>::from_fn(|_, _| Err(DashError::unsupported("history")))
    }
    /// Clone as `Arc<dyn YfSummary>`.
    fn clone_arc_summary(&self) -> Arc<dyn YfSummary> {
        <dyn YfSummary>::from_fn(|_, _| Err(DashError::unsupported("summary")))
    }
    /// Clone as `Arc<dyn YfOptions>`.
    fn clone_arc_options(&self) -> Arc<dyn YfOptions> {
        <dyn YfOptions>::from_fn(|_, _| Err(DashError::unsupported("options")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        Arc::new(self.clone()) as Arc<dyn YfHistory>
    }
    fn clone_arc_summary(&self) -> Arc<dyn YfSummary> {
        Arc::new(self.clone()) as Arc<dyn YfSummary>
    }
    fn clone_arc_options(&self) -> Arc<dyn YfOptions> {
        Arc::new(self.clone()) as Arc<dyn YfOptions>
    }
}
