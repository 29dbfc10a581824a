//! Derived statistics computed from a close series.
//!
//! Every series helper returns one output per input position, with `None`
//! where the statistic is undefined (window not yet full, missing input,
//! division by zero). Aggregates skip missing values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::IndicatorConfig;
use crate::timeseries::resample::{resample_monthly_close, resample_yearly_close};
use crate::types::PriceBar;

/// Simple moving average over `window` observations.
///
/// A position is `None` until `window` values are available, or when any
/// value inside its window is missing. A zero window yields all `None`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        let sum: f64 = w.iter().sum();
        Some(sum / w.len() as f64)
    })
}

/// Sample standard deviation (n - 1 denominator) over `window` observations.
///
/// Windows shorter than two observations yield all `None`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    rolling(values, window, |w| {
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let ss: f64 = w.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (n - 1.0)).sqrt())
    })
}

fn rolling<F>(values: &[Option<f64>], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    let mut buf: Vec<f64> = Vec::with_capacity(window);
    for end in window..=values.len() {
        buf.clear();
        buf.extend(values[end - window..end].iter().map_while(|v| *v));
        if buf.len() == window {
            out[end - 1] = stat(&buf);
        }
    }
    out
}

/// Simple return between consecutive observations: `x[i] / x[i-1] - 1`.
///
/// The first position is always `None`; so is any position whose current or
/// previous value is missing, or whose previous value is zero.
#[must_use]
pub fn pct_change(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for v in values {
        let r = match (prev, *v) {
            (Some(p), Some(c)) if p != 0.0 => Some(c / p - 1.0),
            _ => None,
        };
        out.push(r);
        prev = *v;
    }
    out
}

/// Arithmetic mean of the present values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Smallest present value.
#[must_use]
pub fn min(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::min)
}

/// Largest present value.
#[must_use]
pub fn max(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

/// Render a ratio as a percentage with two decimals (`0.0123` → `"1.23%"`), or "N/A".
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => crate::info::NA.to_string(),
    }
}

fn sorted_closes(bars: &[PriceBar]) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> =
        bars.iter().map(|b| (b.date, b.adjusted_close())).collect();
    points.sort_by_key(|(d, _)| *d);
    points
}

fn present(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Moving averages, daily returns, and rolling volatility, aligned per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    /// Windows the indicators were computed with.
    pub config: IndicatorConfig,
    /// Bar dates in ascending order.
    pub dates: Vec<NaiveDate>,
    /// Adjusted close per bar (raw close when no adjusted value exists).
    pub close: Vec<f64>,
    /// Short moving average of the close.
    pub sma_short: Vec<Option<f64>>,
    /// Long moving average of the close.
    pub sma_long: Vec<Option<f64>>,
    /// Close-to-close simple return.
    pub daily_return: Vec<Option<f64>>,
    /// Rolling standard deviation of daily returns.
    pub volatility: Vec<Option<f64>>,
}

impl TechnicalIndicators {
    /// Compute every indicator over `bars` (sorted by date first).
    #[must_use]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "quantdash::analytics", skip(bars), fields(bars = bars.len()))
    )]
    pub fn compute(bars: &[PriceBar], config: &IndicatorConfig) -> Self {
        let points = sorted_closes(bars);
        let closes: Vec<Option<f64>> = points.iter().map(|(_, c)| present(*c)).collect();
        let daily_return = pct_change(&closes);
        Self {
            config: *config,
            dates: points.iter().map(|(d, _)| *d).collect(),
            close: points.iter().map(|(_, c)| *c).collect(),
            sma_short: rolling_mean(&closes, config.short_window),
            sma_long: rolling_mean(&closes, config.long_window),
            volatility: rolling_std(&daily_return, config.volatility_window),
            daily_return,
        }
    }

    /// Volatility at the most recent bar (`None` if its window is incomplete).
    #[must_use]
    pub fn latest_volatility(&self) -> Option<f64> {
        self.volatility.last().copied().flatten()
    }

    /// Worst daily return.
    #[must_use]
    pub fn max_daily_loss(&self) -> Option<f64> {
        min(&self.daily_return)
    }

    /// Best daily return.
    #[must_use]
    pub fn max_daily_gain(&self) -> Option<f64> {
        max(&self.daily_return)
    }

    /// Average daily return.
    #[must_use]
    pub fn mean_daily_return(&self) -> Option<f64> {
        mean(&self.daily_return)
    }
}

/// A dated return series.
pub type ReturnSeries = Vec<(NaiveDate, Option<f64>)>;

/// Daily, monthly, and yearly simple returns with their means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsSummary {
    /// Close-to-close returns per bar.
    pub daily: ReturnSeries,
    /// Month-end to month-end returns, labelled with the month's last day.
    pub monthly: ReturnSeries,
    /// Year-end to year-end returns, labelled with December 31.
    pub yearly: ReturnSeries,
    /// Mean of `daily`.
    pub mean_daily: Option<f64>,
    /// Mean of `monthly`.
    pub mean_monthly: Option<f64>,
    /// Mean of `yearly`.
    pub mean_yearly: Option<f64>,
}

impl ReturnsSummary {
    /// Compute return series over `bars`.
    ///
    /// Monthly and yearly returns are taken over the resampled close series
    /// (last close per period, forward-filled across empty periods).
    #[must_use]
    pub fn compute(bars: &[PriceBar]) -> Self {
        let points = sorted_closes(bars);
        let daily = dated_returns(&points);
        let monthly = dated_returns(&resample_monthly_close(&points));
        let yearly = dated_returns(&resample_yearly_close(&points));
        Self {
            mean_daily: mean_of(&daily),
            mean_monthly: mean_of(&monthly),
            mean_yearly: mean_of(&yearly),
            daily,
            monthly,
            yearly,
        }
    }
}

fn dated_returns(points: &[(NaiveDate, f64)]) -> ReturnSeries {
    let values: Vec<Option<f64>> = points.iter().map(|(_, v)| present(*v)).collect();
    points
        .iter()
        .map(|(d, _)| *d)
        .zip(pct_change(&values))
        .collect()
}

fn mean_of(series: &ReturnSeries) -> Option<f64> {
    let values: Vec<Option<f64>> = series.iter().map(|(_, v)| *v).collect();
    mean(&values)
}
