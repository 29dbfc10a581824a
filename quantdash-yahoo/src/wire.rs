//! Serde mirrors of the Yahoo Finance JSON payloads this connector reads.
//!
//! Only the fields the dashboard uses are modelled; everything else is
//! ignored by serde. Numeric arrays carry `null` for missing observations.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Provider-side error object embedded in every envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Short code such as `"Not Found"`.
    pub code: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
}

impl ApiError {
    /// Combined message for logs and error tags.
    #[must_use]
    pub fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(c), Some(d)) => format!("{c}: {d}"),
            (Some(c), None) => c.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => "unknown provider error".to_string(),
        }
    }
}

/* ---------- /v8/finance/chart ---------- */

#[derive(Debug, Deserialize)]
pub(crate) struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ApiError>,
}

/// One element of `chart.result`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    /// Series metadata.
    #[serde(default)]
    pub meta: ChartMeta,
    /// Bar timestamps (Unix seconds, session open).
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Price and volume arrays aligned with `timestamp`.
    #[serde(default)]
    pub indicators: Indicators,
    /// Dividends and splits keyed by timestamp string.
    #[serde(default)]
    pub events: Option<ChartEvents>,
}

/// `chart.result[].meta`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Listing currency.
    pub currency: Option<String>,
    /// Echoed symbol.
    pub symbol: Option<String>,
    /// IANA exchange timezone (e.g. `America/New_York`).
    pub exchange_timezone_name: Option<String>,
    /// Exchange UTC offset in seconds, used when the timezone name is unknown.
    pub gmtoffset: Option<i64>,
}

/// `chart.result[].indicators`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Indicators {
    /// Usually a single element.
    #[serde(default)]
    pub quote: Vec<QuoteArrays>,
    /// Adjusted closes, when requested.
    #[serde(default)]
    pub adjclose: Vec<AdjCloseArrays>,
}

/// OHLCV arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteArrays {
    /// Opens.
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    /// Highs.
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    /// Lows.
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    /// Closes.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    /// Volumes.
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

/// Adjusted close array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdjCloseArrays {
    /// Adjusted closes.
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Corporate actions attached to a chart response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartEvents {
    /// Dividends keyed by timestamp string.
    #[serde(default)]
    pub dividends: BTreeMap<String, DividendEvent>,
    /// Splits keyed by timestamp string.
    #[serde(default)]
    pub splits: BTreeMap<String, SplitEvent>,
}

/// A dividend event.
#[derive(Debug, Clone, Deserialize)]
pub struct DividendEvent {
    /// Amount per share.
    pub amount: f64,
    /// Ex-date (Unix seconds).
    pub date: i64,
}

/// A split event.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitEvent {
    /// Effective date (Unix seconds).
    pub date: i64,
    /// New shares.
    pub numerator: f64,
    /// Old shares.
    pub denominator: f64,
}

/* ---------- /v10/finance/quoteSummary ---------- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryEnvelope {
    pub quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryBody {
    pub result: Option<Vec<Map<String, Value>>>,
    pub error: Option<ApiError>,
}

/// The modules returned by one quoteSummary call, keyed by module name.
#[derive(Debug, Clone, Default)]
pub struct SummaryModules(pub Map<String, Value>);

impl SummaryModules {
    /// Build from a JSON object (`{"assetProfile": {...}, ...}`).
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// A module's object, if returned.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }
}

/* ---------- /v7/finance/options ---------- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OptionsEnvelope {
    pub option_chain: OptionsBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionsBody {
    pub result: Option<Vec<OptionsResult>>,
    pub error: Option<ApiError>,
}

/// One element of `optionChain.result`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResult {
    /// Every listed expiration (Unix seconds).
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    /// Chains; Yahoo returns one, for the requested or nearest expiration.
    #[serde(default)]
    pub options: Vec<OptionsForDate>,
}

/// Calls and puts for one expiration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsForDate {
    /// Expiration (Unix seconds).
    pub expiration_date: Option<i64>,
    /// Call contracts as raw JSON objects.
    #[serde(default)]
    pub calls: Vec<Map<String, Value>>,
    /// Put contracts as raw JSON objects.
    #[serde(default)]
    pub puts: Vec<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_envelope_tolerates_nulls() {
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "meta": {"currency": "USD", "exchangeTimezoneName": "America/New_York"},
                    "timestamp": [1, 2],
                    "indicators": {"quote": [{"close": [1.0, null]}]}
                }],
                "error": null
            }
        });
        let env: ChartEnvelope = serde_json::from_value(body).unwrap();
        let r = &env.chart.result.unwrap()[0];
        assert_eq!(r.indicators.quote[0].close, vec![Some(1.0), None]);
        assert!(r.indicators.quote[0].open.is_empty());
        assert!(r.events.is_none());
    }

    #[test]
    fn api_error_message_joins_parts() {
        let e = ApiError {
            code: Some("Not Found".into()),
            description: Some("No data found".into()),
        };
        assert_eq!(e.message(), "Not Found: No data found");
    }
}
