//! quantdash-mock
//!
//! Deterministic connectors for tests and offline runs.
//!
//! - [`MockConnector`] serves static fixtures: `AAPL` is fully populated,
//!   `MSFT` has sparse info and no listed options, `FAIL` always errors,
//!   `TIMEOUT` answers slowly, and anything else is not found.
//! - [`DynamicMockConnector`] defers each call to rules set through a
//!   [`DynamicMockController`].

use async_trait::async_trait;
use quantdash_core::connector::{
    CalendarProvider, EarningsProvider, EsgProvider, HistoryProvider, HoldersProvider,
    InfoProvider, OptionChainProvider, OptionsExpirationsProvider, QuantConnector,
    RecommendationsProvider, StatementsProvider,
};
use quantdash_core::{
    DashError, Earnings, Frame, HistoryRequest, Holders, Info, OptionChain, PriceHistory,
    Statements, Symbol,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe runs. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector name used in errors and logs.
    pub const NAME: &'static str = "quantdash-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> DashError {
        DashError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(symbol: &str, capability: &'static str) -> Result<(), DashError> {
        match symbol {
            "FAIL" => Err(DashError::connector(
                Self::NAME,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Long enough to trip short provider timeouts in tests.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl QuantConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn vendor(&self) -> &'static str {
        "Mock"
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

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<PriceHistory, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "history").await?;
        fixtures::history::by_symbol(s, req)
            .ok_or_else(|| Self::not_found(&format!("history for {s}")))
    }
}

#[async_trait]
impl InfoProvider for MockConnector {
    async fn info(&self, symbol: &Symbol) -> Result<Info, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "info").await?;
        fixtures::info::by_symbol(s).ok_or_else(|| Self::not_found(&format!("info for {s}")))
    }
}

#[async_trait]
impl StatementsProvider for MockConnector {
    async fn statements(
        &self,
        symbol: &Symbol,
        quarterly: bool,
    ) -> Result<Statements, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "statements").await?;
        Ok(fixtures::fundamentals::statements_by_symbol(s, quarterly))
    }
}

#[async_trait]
impl EarningsProvider for MockConnector {
    async fn earnings(&self, symbol: &Symbol) -> Result<Earnings, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "earnings").await?;
        Ok(fixtures::fundamentals::earnings_by_symbol(s))
    }
}

#[async_trait]
impl HoldersProvider for MockConnector {
    async fn holders(&self, symbol: &Symbol) -> Result<Holders, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "holders").await?;
        Ok(fixtures::fundamentals::holders_by_symbol(s))
    }
}

#[async_trait]
impl RecommendationsProvider for MockConnector {
    async fn recommendations(&self, symbol: &Symbol) -> Result<Frame, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "recommendations").await?;
        Ok(fixtures::fundamentals::recommendations_by_symbol(s))
    }
}

#[async_trait]
impl EsgProvider for MockConnector {
    async fn sustainability(&self, symbol: &Symbol) -> Result<Frame, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "esg").await?;
        Ok(fixtures::fundamentals::esg_by_symbol(s))
    }
}

#[async_trait]
impl CalendarProvider for MockConnector {
    async fn calendar(&self, symbol: &Symbol) -> Result<Frame, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "calendar").await?;
        Ok(fixtures::fundamentals::calendar_by_symbol(s))
    }
}

#[async_trait]
impl OptionsExpirationsProvider for MockConnector {
    async fn options_expirations(&self, symbol: &Symbol) -> Result<Vec<i64>, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "options-expirations").await?;
        Ok(fixtures::options::expirations_by_symbol(s))
    }
}

#[async_trait]
impl OptionChainProvider for MockConnector {
    async fn option_chain(
        &self,
        symbol: &Symbol,
        date: Option<i64>,
    ) -> Result<OptionChain, DashError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_timeout(s, "option-chain").await?;
        fixtures::options::chain_by_symbol_and_date(s, date)
            .ok_or_else(|| Self::not_found(&format!("option chain for {s}")))
    }
}
