//! Sidebar form: raw query parameters, defaults, and validation.

use chrono::NaiveDate;
use quantdash_core::{DashConfig, DashError, HistoryRequest, Symbol};
use serde::Deserialize;

use crate::report::DashboardQuery;

/// Query-string parameters exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormParams {
    /// Ticker symbol.
    pub ticker: Option<String>,
    /// Start date (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// End date (`YYYY-MM-DD`), exclusive.
    pub end: Option<String>,
    /// Option expiration as Unix seconds.
    pub expiration: Option<String>,
    /// `annual` or `quarterly` statements.
    pub period: Option<String>,
}

/// Form values after defaults are applied; echoed back into the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardForm {
    /// Ticker as typed.
    pub ticker: String,
    /// Start date text.
    pub start: String,
    /// End date text.
    pub end: String,
    /// Expiration text, if one was picked.
    pub expiration: Option<String>,
    /// Quarterly statements requested.
    pub quarterly: bool,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, DashError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| DashError::InvalidArg(format!("{field} date '{raw}' is not YYYY-MM-DD")))
}

impl DashboardForm {
    /// Fill blank parameters from `cfg`; the end date defaults to `today`.
    #[must_use]
    pub fn from_params(params: FormParams, cfg: &DashConfig, today: NaiveDate) -> Self {
        Self {
            ticker: non_blank(params.ticker).unwrap_or_else(|| cfg.default_ticker.clone()),
            start: non_blank(params.start)
                .unwrap_or_else(|| cfg.default_start.format(DATE_FORMAT).to_string()),
            end: non_blank(params.end)
                .unwrap_or_else(|| today.format(DATE_FORMAT).to_string()),
            expiration: non_blank(params.expiration),
            quarterly: params
                .period
                .is_some_and(|p| p.trim().eq_ignore_ascii_case("quarterly")),
        }
    }

    /// Validate the form into a report query.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed ticker, unparsable dates, a start
    /// date not before the end date, or a non-numeric expiration.
    pub fn query(&self) -> Result<DashboardQuery, DashError> {
        let symbol = Symbol::new(&self.ticker)?;
        let start = parse_date("start", &self.start)?;
        let end = parse_date("end", &self.end)?;
        let request = HistoryRequest::try_new(start, end)?;
        let expiration = self
            .expiration
            .as_deref()
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    DashError::InvalidArg(format!("expiration '{raw}' is not a Unix timestamp"))
                })
            })
            .transpose()?;
        Ok(DashboardQuery {
            symbol,
            request,
            expiration,
            quarterly: self.quarterly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn blank_params_take_defaults() {
        let params = FormParams {
            ticker: Some("  ".into()),
            ..FormParams::default()
        };
        let form = DashboardForm::from_params(params, &DashConfig::default(), today());
        assert_eq!(form.ticker, "AAPL");
        assert_eq!(form.start, "2020-01-01");
        assert_eq!(form.end, "2024-06-30");
        assert!(!form.quarterly);

        let q = form.query().unwrap();
        assert_eq!(q.symbol.as_str(), "AAPL");
        assert_eq!(q.expiration, None);
    }

    #[test]
    fn explicit_params_are_parsed() {
        let params = FormParams {
            ticker: Some("msft".into()),
            start: Some("2023-01-01".into()),
            end: Some("2023-12-31".into()),
            expiration: Some("1735257600".into()),
            period: Some("Quarterly".into()),
        };
        let q = DashboardForm::from_params(params, &DashConfig::default(), today())
            .query()
            .unwrap();
        assert_eq!(q.symbol.as_str(), "MSFT");
        assert_eq!(q.request.start(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(q.expiration, Some(1_735_257_600));
        assert!(q.quarterly);
    }

    #[test]
    fn bad_input_is_invalid_arg() {
        let cfg = DashConfig::default();
        for params in [
            FormParams {
                start: Some("01/02/2020".into()),
                ..FormParams::default()
            },
            FormParams {
                start: Some("2024-07-01".into()),
                ..FormParams::default()
            },
            FormParams {
                expiration: Some("soon".into()),
                ..FormParams::default()
            },
            FormParams {
                ticker: Some("AA PL".into()),
                ..FormParams::default()
            },
        ] {
            let err = DashboardForm::from_params(params, &cfg, today())
                .query()
                .unwrap_err();
            assert!(matches!(err, DashError::InvalidArg(_)), "got {err:?}");
        }
    }
}
