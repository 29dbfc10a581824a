//! Assemble every dataset the dashboard page shows for one ticker.

use quantdash_core::{
    Capability, DashError, Earnings, Frame, HistoryRequest, Holders, Info, OptionChain,
    PriceHistory, ReturnsSummary, Statements, Symbol, TechnicalIndicators,
};
use serde::Serialize;

use crate::Dashboard;

/// What one page render asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Ticker to display.
    pub symbol: Symbol,
    /// Date range for the price history.
    pub request: HistoryRequest,
    /// Requested option expiration (Unix seconds); the first listed one is used otherwise.
    pub expiration: Option<i64>,
    /// Show quarterly rather than annual statements.
    pub quarterly: bool,
}

impl DashboardQuery {
    /// Query for `symbol` over `request` with annual statements and the nearest expiration.
    #[must_use]
    pub const fn new(symbol: Symbol, request: HistoryRequest) -> Self {
        Self {
            symbol,
            request,
            expiration: None,
            quarterly: false,
        }
    }
}

/// Options section: listed expirations and the chain for the selected one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptionsSection {
    /// All listed expirations, ascending.
    pub expirations: Vec<i64>,
    /// The expiration whose chain was fetched.
    pub selected: Option<i64>,
    /// Calls and puts for `selected`.
    pub chain: Option<OptionChain>,
}

impl OptionsSection {
    /// `true` when the ticker has no listed options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expirations.is_empty()
    }
}

/// Everything needed to render the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Ticker shown.
    pub symbol: Symbol,
    /// Date range of `history`.
    pub request: HistoryRequest,
    /// Daily bars with dividends and splits.
    pub history: PriceHistory,
    /// Company info record.
    pub info: Info,
    /// SMA, daily return, and volatility columns.
    pub indicators: TechnicalIndicators,
    /// Daily, monthly, and yearly returns.
    pub returns: ReturnsSummary,
    /// Whether `statements` are quarterly.
    pub quarterly: bool,
    /// Financial statements.
    pub statements: Statements,
    /// Earnings tables.
    pub earnings: Earnings,
    /// Ownership tables.
    pub holders: Holders,
    /// Analyst recommendations.
    pub recommendations: Frame,
    /// ESG scores.
    pub sustainability: Frame,
    /// Events calendar.
    pub calendar: Frame,
    /// Options expirations and chain.
    pub options: OptionsSection,
    /// Datasets no registered connector offers; their sections render empty.
    pub unavailable: Vec<Capability>,
}

/// The requested expiration when listed, otherwise the first listed one.
#[must_use]
pub fn select_expiration(expirations: &[i64], requested: Option<i64>) -> Option<i64> {
    requested
        .filter(|r| expirations.contains(r))
        .or_else(|| expirations.first().copied())
}

/// Soften a secondary dataset: no capable connector marks it unavailable,
/// no data for the symbol leaves the section empty.
fn or_unavailable<T: Default>(
    res: Result<T, DashError>,
    capability: Capability,
    unavailable: &mut Vec<Capability>,
) -> Result<T, DashError> {
    match res {
        Err(DashError::Unsupported { .. }) => {
            unavailable.push(capability);
            Ok(T::default())
        }
        Err(e) if e.is_not_found() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "quantdash::report", %capability, error = %e, "no data; section left empty");
            Ok(T::default())
        }
        other => other,
    }
}

impl Dashboard {
    /// Fetch every dataset for `query` and derive the statistics.
    ///
    /// Datasets are fetched concurrently. History is required; a secondary
    /// dataset that no connector supports renders as an empty section and is
    /// listed in `unavailable`, and one the provider has no data for renders
    /// as an empty section. Every other failure is returned.
    ///
    /// # Errors
    /// Returns the first provider failure among the fetched datasets.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "quantdash::report",
            skip(self, query),
            fields(
                symbol = %query.symbol,
                start = %query.request.start(),
                end = %query.request.end(),
            ),
        )
    )]
    pub async fn report(&self, query: &DashboardQuery) -> Result<DashboardReport, DashError> {
        let symbol = &query.symbol;
        let (
            history,
            info,
            statements,
            earnings,
            holders,
            recommendations,
            sustainability,
            calendar,
            expirations,
        ) = tokio::join!(
            self.history(symbol, query.request),
            self.info(symbol),
            self.statements(symbol, query.quarterly),
            self.earnings(symbol),
            self.holders(symbol),
            self.recommendations(symbol),
            self.sustainability(symbol),
            self.calendar(symbol),
            self.options_expirations(symbol),
        );

        let history = history?;
        let mut unavailable = Vec::new();
        let info: Info = or_unavailable(info, Capability::Info, &mut unavailable)?;
        let statements = or_unavailable(statements, Capability::Statements, &mut unavailable)?;
        let earnings = or_unavailable(earnings, Capability::Earnings, &mut unavailable)?;
        let holders = or_unavailable(holders, Capability::Holders, &mut unavailable)?;
        let recommendations =
            or_unavailable(recommendations, Capability::Recommendations, &mut unavailable)?;
        let sustainability = or_unavailable(sustainability, Capability::Esg, &mut unavailable)?;
        let calendar = or_unavailable(calendar, Capability::Calendar, &mut unavailable)?;
        let mut expirations =
            or_unavailable(expirations, Capability::OptionsExpirations, &mut unavailable)?;
        expirations.sort_unstable();
        expirations.dedup();

        let selected = select_expiration(&expirations, query.expiration);
        let chain = match selected {
            Some(date) => or_unavailable(
                self.option_chain(symbol, Some(date)).await.map(Some),
                Capability::OptionChain,
                &mut unavailable,
            )?,
            None => None,
        };

        let indicators = TechnicalIndicators::compute(&history.bars, &self.cfg.indicators);
        let returns = ReturnsSummary::compute(&history.bars);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "quantdash::report",
            bars = history.bars.len(),
            expirations = expirations.len(),
            unavailable = unavailable.len(),
            "report assembled"
        );

        Ok(DashboardReport {
            symbol: symbol.clone(),
            request: query.request,
            history,
            info,
            indicators,
            returns,
            quarterly: query.quarterly,
            statements,
            earnings,
            holders,
            recommendations,
            sustainability,
            calendar,
            options: OptionsSection {
                expirations,
                selected,
                chain,
            },
            unavailable,
        })
    }
}
