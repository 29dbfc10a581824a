//! Configuration types shared by the orchestrator, renderer, and binary.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Window lengths for the technical indicators shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Short simple moving average window (trading days).
    pub short_window: usize,
    /// Long simple moving average window (trading days).
    pub long_window: usize,
    /// Rolling standard deviation window applied to daily returns.
    pub volatility_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            volatility_window: 20,
        }
    }
}

impl IndicatorConfig {
    /// Set the short moving average window.
    #[must_use]
    pub const fn short_window(mut self, n: usize) -> Self {
        self.short_window = n;
        self
    }

    /// Set the long moving average window.
    #[must_use]
    pub const fn long_window(mut self, n: usize) -> Self {
        self.long_window = n;
        self
    }

    /// Set the volatility window.
    #[must_use]
    pub const fn volatility_window(mut self, n: usize) -> Self {
        self.volatility_window = n;
        self
    }

    /// Reject zero-length windows and a short window that is not shorter than the long one.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the offending window.
    pub fn validate(&self) -> Result<(), crate::DashError> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(crate::DashError::InvalidArg(
                "moving average windows must be positive".into(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(crate::DashError::InvalidArg(format!(
                "short window ({}) must be smaller than long window ({})",
                self.short_window, self.long_window
            )));
        }
        if self.volatility_window < 2 {
            return Err(crate::DashError::InvalidArg(
                "volatility window needs at least two observations".into(),
            ));
        }
        Ok(())
    }
}

/// Global configuration for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Indicator windows.
    pub indicators: IndicatorConfig,
    /// Ticker shown when the form omits one.
    pub default_ticker: String,
    /// Start date used when the form omits one. The end date defaults to today.
    pub default_start: NaiveDate,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            indicators: IndicatorConfig::default(),
            default_ticker: "AAPL".to_string(),
            default_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
        }
    }
}

impl DashConfig {
    /// Set the per-provider timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Replace the indicator windows.
    #[must_use]
    pub const fn indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = indicators;
        self
    }

    /// Set the default ticker.
    #[must_use]
    pub fn default_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.default_ticker = ticker.into();
        self
    }

    /// Set the default start date.
    #[must_use]
    pub const fn default_start(mut self, start: NaiveDate) -> Self {
        self.default_start = start;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_form() {
        let cfg = DashConfig::default();
        assert_eq!(cfg.default_ticker, "AAPL");
        assert_eq!(cfg.default_start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cfg.indicators.short_window, 20);
        assert_eq!(cfg.indicators.long_window, 50);
        assert_eq!(cfg.indicators.volatility_window, 20);
        assert!(cfg.indicators.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_windows() {
        let bad = IndicatorConfig::default().short_window(60);
        assert!(matches!(
            bad.validate(),
            Err(crate::DashError::InvalidArg(_))
        ));
        let bad = IndicatorConfig::default().volatility_window(1);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn config_survives_json() {
        let cfg = DashConfig::default().provider_timeout(Duration::from_millis(250));
        let json = serde_json::to_string(&cfg).unwrap();
        let back: DashConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.provider_timeout, Duration::from_millis(250));
        assert_eq!(back.indicators, cfg.indicators);
    }
}
