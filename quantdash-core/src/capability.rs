use core::fmt;
use serde::{Deserialize, Serialize};

/// Dataset labels for routing, errors, and telemetry.
///
/// Each variant maps one-to-one with a provider trait in [`crate::connector`]
/// and with a section of the rendered dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Daily price history with dividends and splits.
    History,
    /// Flat company info record (profile and valuation fields).
    Info,
    /// Income statement, balance sheet, and cash flow tables.
    Statements,
    /// Annual and quarterly earnings tables.
    Earnings,
    /// Institutional holders, major holders, and insider transactions.
    Holders,
    /// Analyst ratings over time.
    Recommendations,
    /// ESG sustainability scores.
    Esg,
    /// Upcoming corporate events (earnings dates, dividends).
    Calendar,
    /// Options: expirations list.
    OptionsExpirations,
    /// Options: option chain for an expiration date.
    OptionChain,
}

impl Capability {
    /// Every capability, in dashboard section order.
    pub const ALL: [Self; 10] = [
        Self::History,
        Self::Info,
        Self::Statements,
        Self::Earnings,
        Self::Holders,
        Self::Recommendations,
        Self::Esg,
        Self::Calendar,
        Self::OptionsExpirations,
        Self::OptionChain,
    ];

    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Info => "info",
            Self::Statements => "statements",
            Self::Earnings => "earnings",
            Self::Holders => "holders",
            Self::Recommendations => "recommendations",
            Self::Esg => "esg",
            Self::Calendar => "calendar",
            Self::OptionsExpirations => "options-expirations",
            Self::OptionChain => "option-chain",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Capability;

    #[test]
    fn labels_are_unique_and_kebab_case() {
        let mut seen = std::collections::HashSet::new();
        for cap in Capability::ALL {
            let label = cap.as_str();
            assert!(seen.insert(label), "duplicate label {label}");
            assert!(
                label.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "{label}"
            );
            assert_eq!(cap.to_string(), label);
        }
    }
}
