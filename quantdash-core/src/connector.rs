use async_trait::async_trait;

use crate::DashError;
use crate::frame::Frame;
use crate::info::Info;
use crate::types::{
    Earnings, HistoryRequest, Holders, OptionChain, PriceHistory, Statements, Symbol,
};

/// Focused role trait for connectors that provide daily price history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch daily bars, dividends, and splits for `symbol` over the requested range.
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<PriceHistory, DashError>;
}

/// Focused role trait for connectors that provide the flat company info record.
#[async_trait]
pub trait InfoProvider: Send + Sync {
    /// Fetch profile and valuation fields for `symbol`.
    async fn info(&self, symbol: &Symbol) -> Result<Info, DashError>;
}

/// Focused role trait for connectors that provide financial statements.
#[async_trait]
pub trait StatementsProvider: Send + Sync {
    /// Fetch income statement, balance sheet, and cash flow tables.
    async fn statements(&self, symbol: &Symbol, quarterly: bool)
    -> Result<Statements, DashError>;
}

/// Focused role trait for connectors that provide earnings tables.
#[async_trait]
pub trait EarningsProvider: Send + Sync {
    /// Fetch annual and quarterly earnings.
    async fn earnings(&self, symbol: &Symbol) -> Result<Earnings, DashError>;
}

/// Focused role trait for connectors that provide ownership tables.
#[async_trait]
pub trait HoldersProvider: Send + Sync {
    /// Fetch institutional holders, major holders, and insider transactions.
    async fn holders(&self, symbol: &Symbol) -> Result<Holders, DashError>;
}

/// Focused role trait for connectors that provide analyst ratings over time.
#[async_trait]
pub trait RecommendationsProvider: Send + Sync {
    /// Fetch recommendation rows for `symbol`.
    async fn recommendations(&self, symbol: &Symbol) -> Result<Frame, DashError>;
}

/// Focused role trait for connectors that provide ESG scores.
#[async_trait]
pub trait EsgProvider: Send + Sync {
    /// Fetch ESG scores for `symbol`.
    async fn sustainability(&self, symbol: &Symbol) -> Result<Frame, DashError>;
}

/// Focused role trait for connectors that provide corporate event calendars.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Fetch upcoming events for `symbol`.
    async fn calendar(&self, symbol: &Symbol) -> Result<Frame, DashError>;
}

/// Focused role trait for connectors that provide options expirations.
#[async_trait]
pub trait OptionsExpirationsProvider: Send + Sync {
    /// Fetch option expiration timestamps (Unix seconds), ascending.
    async fn options_expirations(&self, symbol: &Symbol) -> Result<Vec<i64>, DashError>;
}

/// Focused role trait for connectors that provide option chains.
#[async_trait]
pub trait OptionChainProvider: Send + Sync {
    /// Fetch the chain for `date`, or the nearest expiration when `None`.
    async fn option_chain(
        &self,
        symbol: &Symbol,
        date: Option<i64>,
    ) -> Result<OptionChain, DashError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait QuantConnector: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g. "quantdash-yahoo").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise history capability by returning a usable trait object reference when supported.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }
    /// If implemented, returns a trait object for the info record.
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        None
    }
    /// If implemented, returns a trait object for financial statements.
    fn as_statements_provider(&self) -> Option<&dyn StatementsProvider> {
        None
    }
    /// If implemented, returns a trait object for earnings.
    fn as_earnings_provider(&self) -> Option<&dyn EarningsProvider> {
        None
    }
    /// If implemented, returns a trait object for ownership tables.
    fn as_holders_provider(&self) -> Option<&dyn HoldersProvider> {
        None
    }
    /// If implemented, returns a trait object for analyst recommendations.
    fn as_recommendations_provider(&self) -> Option<&dyn RecommendationsProvider> {
        None
    }
    /// If implemented, returns a trait object for ESG scores.
    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        None
    }
    /// If implemented, returns a trait object for the events calendar.
    fn as_calendar_provider(&self) -> Option<&dyn CalendarProvider> {
        None
    }
    /// If implemented, returns a trait object for options expirations.
    fn as_options_expirations_provider(&self) -> Option<&dyn OptionsExpirationsProvider> {
        None
    }
    /// If implemented, returns a trait object for option chains.
    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        None
    }

    /// Capabilities this connector advertises, derived from the accessors above.
    fn capabilities(&self) -> Vec<crate::Capability> {
        use crate::Capability as C;
        let mut caps = Vec::new();
        let checks = [
            (C::History, self.as_history_provider().is_some()),
            (C::Info, self.as_info_provider().is_some()),
            (C::Statements, self.as_statements_provider().is_some()),
            (C::Earnings, self.as_earnings_provider().is_some()),
            (C::Holders, self.as_holders_provider().is_some()),
            (C::Recommendations, self.as_recommendations_provider().is_some()),
            (C::Esg, self.as_esg_provider().is_some()),
            (C::Calendar, self.as_calendar_provider().is_some()),
            (
                C::OptionsExpirations,
                self.as_options_expirations_provider().is_some(),
            ),
            (C::OptionChain, self.as_option_chain_provider().is_some()),
        ];
        for (cap, supported) in checks {
            if supported {
                caps.push(cap);
            }
        }
        caps
    }
}
