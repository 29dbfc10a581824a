//! Domain types shared by connectors, the orchestrator, and the renderer.

use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DashError;
use crate::frame::Frame;

const MAX_SYMBOL_LEN: usize = 32;

/// A validated, upper-cased ticker symbol.
///
/// Accepts ASCII alphanumerics plus the punctuation Yahoo uses for share
/// classes, indices, and FX pairs (`.`, `-`, `^`, `=`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the ticker is empty, too long, or contains
    /// characters outside the accepted set.
    pub fn new(raw: &str) -> Result<Self, DashError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DashError::InvalidArg("ticker must not be empty".into()));
        }
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(DashError::InvalidArg(format!(
                "ticker longer than {MAX_SYMBOL_LEN} characters"
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(DashError::InvalidArg(format!(
                "ticker contains invalid character {bad:?}"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the normalized ticker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Date range for a daily history request. `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    start: NaiveDate,
    end: NaiveDate,
}

impl HistoryRequest {
    /// Build a request for `[start, end)`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `start` is not strictly before `end`.
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashError> {
        if start >= end {
            return Err(DashError::InvalidArg(format!(
                "start date {start} must be before end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive first day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive last day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// One daily OHLCV observation, dated in the exchange's local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Close adjusted for splits and dividends, when the provider supplies it.
    pub adj_close: Option<f64>,
    /// Shares traded.
    pub volume: Option<u64>,
}

impl PriceBar {
    /// The close the statistics run on: adjusted when available, raw otherwise.
    #[must_use]
    pub fn adjusted_close(&self) -> f64 {
        self.adj_close.unwrap_or(self.close)
    }
}

/// A cash dividend paid on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Ex-dividend date.
    pub date: NaiveDate,
    /// Amount per share in the listing currency.
    pub amount: f64,
}

/// A stock split effective on `date` (`numerator`-for-`denominator`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Effective date.
    pub date: NaiveDate,
    /// New shares.
    pub numerator: f64,
    /// Old shares.
    pub denominator: f64,
}

impl Split {
    /// Split ratio as a single factor (e.g. 4.0 for a 4:1 split).
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.denominator == 0.0 {
            f64::NAN
        } else {
            self.numerator / self.denominator
        }
    }
}

/// Daily price history plus the corporate actions that travel with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Ticker the series belongs to.
    pub symbol: Symbol,
    /// Listing currency, if reported.
    pub currency: Option<String>,
    /// IANA name of the exchange timezone, if reported.
    pub timezone: Option<String>,
    /// Bars in ascending date order.
    pub bars: Vec<PriceBar>,
    /// Dividends in ascending date order.
    pub dividends: Vec<Dividend>,
    /// Splits in ascending date order.
    pub splits: Vec<Split>,
}

impl PriceHistory {
    /// An empty history for `symbol`.
    #[must_use]
    pub const fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            currency: None,
            timezone: None,
            bars: Vec::new(),
            dividends: Vec::new(),
            splits: Vec::new(),
        }
    }

    /// `(date, close)` pairs in bar order.
    #[must_use]
    pub fn closes(&self) -> Vec<(NaiveDate, f64)> {
        self.bars.iter().map(|b| (b.date, b.close)).collect()
    }

    /// `(date, amount)` pairs for charting dividends.
    #[must_use]
    pub fn dividend_series(&self) -> Vec<(NaiveDate, f64)> {
        self.dividends.iter().map(|d| (d.date, d.amount)).collect()
    }

    /// Splits as a two-column table (`Date`, `Stock Splits`).
    #[must_use]
    pub fn splits_frame(&self) -> Frame {
        use crate::frame::Cell;
        let mut frame = Frame::new(["Date", "Stock Splits"]);
        for s in &self.splits {
            frame
                .rows
                .push(vec![Cell::Date(s.date), Cell::Number(s.ratio())]);
        }
        frame
    }

    /// Sort bars and actions by date and drop duplicate bar dates (last one wins).
    pub fn normalize(&mut self) {
        self.bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<PriceBar> = Vec::with_capacity(self.bars.len());
        for bar in self.bars.drain(..) {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        self.bars = deduped;
        self.dividends.sort_by_key(|d| d.date);
        self.splits.sort_by_key(|s| s.date);
    }
}

/// Income statement, balance sheet, and cash flow tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statements {
    /// Income statement (one column per fiscal period).
    pub income: Frame,
    /// Balance sheet.
    pub balance_sheet: Frame,
    /// Cash flow statement.
    pub cashflow: Frame,
}

/// Annual and quarterly earnings tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Earnings {
    /// Yearly revenue and earnings.
    pub annual: Frame,
    /// Quarterly revenue and earnings.
    pub quarterly: Frame,
}

/// Ownership tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holders {
    /// Largest institutional holders.
    pub institutional: Frame,
    /// Insider/institution ownership breakdown.
    pub major: Frame,
    /// Recent insider transactions.
    pub insider_transactions: Frame,
}

/// Calls and puts for a single expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Expiration as a Unix timestamp (seconds).
    pub expiration: i64,
    /// Call contracts.
    pub calls: Frame,
    /// Put contracts.
    pub puts: Frame,
}

/// Render a Unix expiration timestamp as a calendar date.
#[must_use]
pub fn expiration_date(ts: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}
