//! Mapping from Yahoo payloads to quantdash domain types.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset};
use chrono_tz::Tz;
use quantdash_core::{
    Cell, DashError, Dividend, Earnings, Frame, HistoryRequest, Holders, Info, OptionChain,
    PriceBar, PriceHistory, Split, Statements, Symbol,
};
use serde_json::{Map, Value};

use crate::wire::{ChartEvents, ChartMeta, ChartResult, OptionsResult, SummaryModules};

/// Summary modules that feed the flat info record, in precedence order.
pub(crate) const INFO_MODULES: &[&str] = &[
    "price",
    "assetProfile",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
];

pub(crate) const ANNUAL_STATEMENT_MODULES: &[&str] = &[
    "incomeStatementHistory",
    "balanceSheetHistory",
    "cashflowStatementHistory",
];

pub(crate) const QUARTERLY_STATEMENT_MODULES: &[&str] = &[
    "incomeStatementHistoryQuarterly",
    "balanceSheetHistoryQuarterly",
    "cashflowStatementHistoryQuarterly",
];

pub(crate) const HOLDERS_MODULES: &[&str] = &[
    "institutionOwnership",
    "majorHoldersBreakdown",
    "insiderTransactions",
];

const CONTRACT_COLUMNS: &[&str] = &[
    "contractSymbol",
    "lastTradeDate",
    "strike",
    "lastPrice",
    "bid",
    "ask",
    "change",
    "percentChange",
    "volume",
    "openInterest",
    "impliedVolatility",
    "inTheMoney",
    "contractSize",
    "currency",
];

/* ---------- history ---------- */

#[derive(Clone, Copy)]
enum BarZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl BarZone {
    fn from_meta(meta: &ChartMeta) -> Self {
        if let Some(tz) = meta
            .exchange_timezone_name
            .as_deref()
            .and_then(|n| n.parse::<Tz>().ok())
        {
            return Self::Named(tz);
        }
        let fixed = meta
            .gmtoffset
            .and_then(|s| i32::try_from(s).ok())
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| chrono::Utc.fix());
        Self::Fixed(fixed)
    }

    fn local_date(self, ts: i64) -> Option<NaiveDate> {
        let utc = DateTime::from_timestamp(ts, 0)?;
        Some(match self {
            Self::Named(tz) => utc.with_timezone(&tz).date_naive(),
            Self::Fixed(off) => utc.with_timezone(&off).date_naive(),
        })
    }
}

fn at<T: Copy>(v: &[Option<T>], i: usize) -> Option<T> {
    v.get(i).copied().flatten()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn volume_of(v: Option<f64>) -> Option<u64> {
    v.filter(|x| x.is_finite() && *x >= 0.0).map(|x| x.round() as u64)
}

/// Convert a chart result into a `PriceHistory` dated in the exchange timezone.
///
/// Bars with any missing OHLC value are skipped and bars outside `req` are
/// dropped. `actions` is the full dividend and split record; without it the
/// chart's own events are used, clipped to `req`.
pub(crate) fn history(
    symbol: &Symbol,
    req: HistoryRequest,
    chart: ChartResult,
    actions: Option<ChartEvents>,
) -> Result<PriceHistory, DashError> {
    let zone = BarZone::from_meta(&chart.meta);
    let mut out = PriceHistory::empty(symbol.clone());
    out.currency = chart.meta.currency.clone();
    out.timezone = chart.meta.exchange_timezone_name.clone();

    if !chart.timestamp.is_empty() {
        let quote = chart.indicators.quote.first().ok_or_else(|| {
            DashError::Data(format!("chart for {symbol} has timestamps but no quote arrays"))
        })?;
        let adj = chart.indicators.adjclose.first().map(|a| a.adjclose.as_slice());
        for (i, ts) in chart.timestamp.iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close)) = (
                at(&quote.open, i),
                at(&quote.high, i),
                at(&quote.low, i),
                at(&quote.close, i),
            ) else {
                continue;
            };
            let Some(date) = zone.local_date(*ts) else {
                continue;
            };
            if !req.contains(date) {
                continue;
            }
            out.bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                adj_close: adj.and_then(|a| at(a, i)),
                volume: volume_of(at(&quote.volume, i)),
            });
        }
    }

    match actions {
        Some(events) => push_actions(&mut out, zone, &events, None),
        None => {
            if let Some(events) = chart.events.as_ref() {
                push_actions(&mut out, zone, events, Some(req));
            }
        }
    }

    out.normalize();
    Ok(out)
}

fn push_actions(
    out: &mut PriceHistory,
    zone: BarZone,
    events: &ChartEvents,
    window: Option<HistoryRequest>,
) {
    let keep = |d: &NaiveDate| window.is_none_or(|w| w.contains(*d));
    for d in events.dividends.values() {
        if let Some(date) = zone.local_date(d.date).filter(|day| keep(day)) {
            out.dividends.push(Dividend {
                date,
                amount: d.amount,
            });
        }
    }
    for s in events.splits.values() {
        if let Some(date) = zone.local_date(s.date).filter(|day| keep(day)) {
            out.splits.push(Split {
                date,
                numerator: s.numerator,
                denominator: s.denominator,
            });
        }
    }
}

/* ---------- {raw, fmt} values ---------- */

fn is_wrapper(map: &Map<String, Value>) -> bool {
    map.is_empty() || map.contains_key("raw") || map.contains_key("fmt")
}

/// Unwrap `{raw, fmt}` into its raw scalar; `{}` becomes `null`.
pub(crate) fn unwrap_raw(v: &Value) -> Value {
    match v {
        Value::Object(m) if is_wrapper(m) => m
            .get("raw")
            .or_else(|| m.get("fmt"))
            .cloned()
            .unwrap_or(Value::Null),
        other => other.clone(),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Convert a payload value into a table cell.
///
/// Date-formatted wrappers become `Cell::Date`; other wrappers use their raw value.
pub(crate) fn cell_from(v: &Value) -> Cell {
    match v {
        Value::Null => Cell::Missing,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map_or_else(|| n.as_f64().map_or(Cell::Missing, Cell::Number), Cell::Integer),
        Value::String(s) if s.is_empty() => Cell::Missing,
        Value::String(s) => Cell::Text(s.clone()),
        Value::Object(m) if is_wrapper(m) => {
            if let Some(date) = m.get("fmt").and_then(Value::as_str).and_then(parse_iso_date) {
                return Cell::Date(date);
            }
            match m.get("raw") {
                Some(raw) => cell_from(raw),
                None => m.get("fmt").map_or(Cell::Missing, cell_from),
            }
        }
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(cell_from)
                .filter(|c| !c.is_missing())
                .map(|c| c.to_string())
                .collect();
            if parts.is_empty() {
                Cell::Missing
            } else {
                Cell::Text(parts.join(", "))
            }
        }
        Value::Object(_) => Cell::Missing,
    }
}

/// Text rendering preferring the provider's own formatting (`fmt`).
fn formatted_cell(v: &Value) -> Cell {
    match v {
        Value::Object(m) => match m.get("fmt").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Cell::Text(s.to_string()),
            _ => cell_from(v),
        },
        other => cell_from(other),
    }
}

/// `camelCase` → `Camel Case`.
pub(crate) fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 8);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_ascii_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

fn array_at<'a>(module: Option<&'a Map<String, Value>>, key: &str) -> &'a [Value] {
    module
        .and_then(|m| m.get(key))
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Frame with explicit `(source key, column label)` columns.
fn mapped_frame(records: &[Value], columns: &[(&str, &str)]) -> Frame {
    let mut frame = Frame::new(columns.iter().map(|(_, label)| *label));
    for rec in records.iter().filter_map(Value::as_object) {
        frame.rows.push(
            columns
                .iter()
                .map(|(key, _)| rec.get(*key).map_or(Cell::Missing, cell_from))
                .collect(),
        );
    }
    frame
}

/// Key/value frame over the scalar fields of one object.
fn key_value_frame(obj: Option<&Map<String, Value>>, headers: [&str; 2]) -> Frame {
    let mut frame = Frame::new(headers);
    let Some(obj) = obj else {
        return frame;
    };
    for (k, v) in obj {
        if k == "maxAge" {
            continue;
        }
        if matches!(v, Value::Array(_)) || matches!(v, Value::Object(m) if !is_wrapper(m)) {
            continue;
        }
        let cell = cell_from(v);
        if !cell.is_missing() {
            frame.rows.push(vec![Cell::Text(k.clone()), cell]);
        }
    }
    frame
}

/* ---------- summary modules ---------- */

/// Flatten the info modules into one record; earlier modules win on key clashes.
pub(crate) fn info(modules: &SummaryModules) -> Info {
    let mut info = Info::new();
    for name in INFO_MODULES {
        let Some(module) = modules.module(name) else {
            continue;
        };
        let mut part = Info::new();
        for (k, v) in module {
            if k == "maxAge" {
                continue;
            }
            match unwrap_raw(v) {
                Value::Object(_) | Value::Array(_) => {}
                scalar => part.insert(k.clone(), scalar),
            }
        }
        info.extend_missing(part);
    }
    info
}

/// Statement rows (one record per fiscal period) turned into line-item rows.
fn statement_frame(module: Option<&Map<String, Value>>, list_key: &str) -> Frame {
    let records = array_at(module, list_key);
    let per_period = Frame::from_records(records.iter().filter_map(Value::as_object).map(|rec| {
        let date = rec.get("endDate").map_or(Cell::Missing, cell_from);
        std::iter::once(("endDate".to_string(), date)).chain(
            rec.iter()
                .filter(|(k, _)| k.as_str() != "endDate" && k.as_str() != "maxAge")
                .map(|(k, v)| (humanize(k), cell_from(v))),
        )
    }));
    per_period.transpose("Breakdown")
}

pub(crate) fn statements(modules: &SummaryModules, quarterly: bool) -> Statements {
    let names = if quarterly {
        QUARTERLY_STATEMENT_MODULES
    } else {
        ANNUAL_STATEMENT_MODULES
    };
    Statements {
        income: statement_frame(modules.module(names[0]), "incomeStatementHistory"),
        balance_sheet: statement_frame(modules.module(names[1]), "balanceSheetStatements"),
        cashflow: statement_frame(modules.module(names[2]), "cashflowStatements"),
    }
}

pub(crate) fn earnings(modules: &SummaryModules) -> Earnings {
    let chart = modules
        .module("earnings")
        .and_then(|m| m.get("financialsChart"))
        .and_then(Value::as_object);
    Earnings {
        annual: mapped_frame(
            array_at(chart, "yearly"),
            &[("date", "Year"), ("revenue", "Revenue"), ("earnings", "Earnings")],
        ),
        quarterly: mapped_frame(
            array_at(chart, "quarterly"),
            &[("date", "Quarter"), ("revenue", "Revenue"), ("earnings", "Earnings")],
        ),
    }
}

pub(crate) fn holders(modules: &SummaryModules) -> Holders {
    let institutional = mapped_frame(
        array_at(modules.module("institutionOwnership"), "ownershipList"),
        &[
            ("reportDate", "Date Reported"),
            ("organization", "Holder"),
            ("pctHeld", "pctHeld"),
            ("position", "Shares"),
            ("value", "Value"),
            ("pctChange", "pctChange"),
        ],
    );

    let mut major = Frame::new(["Breakdown", "Value"]);
    if let Some(m) = modules.module("majorHoldersBreakdown") {
        for (key, label) in [
            ("insidersPercentHeld", "% of Shares Held by All Insider"),
            ("institutionsPercentHeld", "% of Shares Held by Institutions"),
            ("institutionsFloatPercentHeld", "% of Float Held by Institutions"),
            ("institutionsCount", "Number of Institutions Holding Shares"),
        ] {
            if let Some(v) = m.get(key) {
                major.rows.push(vec![Cell::from(label), formatted_cell(v)]);
            }
        }
    }

    let insider_transactions = mapped_frame(
        array_at(modules.module("insiderTransactions"), "transactions"),
        &[
            ("filerName", "Insider"),
            ("filerRelation", "Position"),
            ("transactionText", "Text"),
            ("startDate", "Start Date"),
            ("ownership", "Ownership"),
            ("shares", "Shares"),
            ("value", "Value"),
        ],
    );

    Holders {
        institutional,
        major,
        insider_transactions,
    }
}

pub(crate) fn recommendations(modules: &SummaryModules) -> Frame {
    mapped_frame(
        array_at(modules.module("recommendationTrend"), "trend"),
        &[
            ("period", "period"),
            ("strongBuy", "strongBuy"),
            ("buy", "buy"),
            ("hold", "hold"),
            ("sell", "sell"),
            ("strongSell", "strongSell"),
        ],
    )
}

pub(crate) fn sustainability(modules: &SummaryModules) -> Frame {
    key_value_frame(modules.module("esgScores"), ["Metric", "Value"])
}

pub(crate) fn calendar(modules: &SummaryModules) -> Frame {
    let mut frame = Frame::new(["Event", "Value"]);
    let Some(cal) = modules.module("calendarEvents") else {
        return frame;
    };
    let mut push = |label: &str, v: Option<&Value>| {
        if let Some(cell) = v.map(cell_from).filter(|c| !c.is_missing()) {
            frame.rows.push(vec![Cell::from(label), cell]);
        }
    };
    push("Dividend Date", cal.get("dividendDate"));
    push("Ex-Dividend Date", cal.get("exDividendDate"));
    let earnings = cal.get("earnings").and_then(Value::as_object);
    for (key, label) in [
        ("earningsDate", "Earnings Date"),
        ("earningsHigh", "Earnings High"),
        ("earningsLow", "Earnings Low"),
        ("earningsAverage", "Earnings Average"),
        ("revenueHigh", "Revenue High"),
        ("revenueLow", "Revenue Low"),
        ("revenueAverage", "Revenue Average"),
    ] {
        push(label, earnings.and_then(|e| e.get(key)));
    }
    frame
}

/* ---------- options ---------- */

pub(crate) fn expirations(result: &OptionsResult) -> Vec<i64> {
    let mut dates = result.expiration_dates.clone();
    dates.sort_unstable();
    dates.dedup();
    dates
}

fn contract_cell(key: &str, v: &Value) -> Cell {
    if key == "lastTradeDate" {
        if let Some(dt) = v.as_i64().and_then(|ts| DateTime::from_timestamp(ts, 0)) {
            return Cell::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string());
        }
    }
    cell_from(v)
}

fn contracts_frame(contracts: &[Map<String, Value>]) -> Frame {
    let mut frame = Frame::new(CONTRACT_COLUMNS.iter().copied());
    for c in contracts {
        frame.rows.push(
            CONTRACT_COLUMNS
                .iter()
                .map(|k| c.get(*k).map_or(Cell::Missing, |v| contract_cell(k, v)))
                .collect(),
        );
    }
    frame
}

pub(crate) fn option_chain(
    symbol: &Symbol,
    date: Option<i64>,
    result: &OptionsResult,
) -> Result<OptionChain, DashError> {
    let chain = result.options.first().ok_or_else(|| {
        DashError::not_found(match date {
            Some(d) => format!("option chain for {symbol} at {d}"),
            None => format!("option chain for {symbol}"),
        })
    })?;
    let expiration = chain
        .expiration_date
        .or(date)
        .or_else(|| expirations(result).first().copied())
        .ok_or_else(|| DashError::Data(format!("option chain for {symbol} has no expiration")))?;
    Ok(OptionChain {
        expiration,
        calls: contracts_frame(&chain.calls),
        puts: contracts_frame(&chain.puts),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn modules(v: Value) -> SummaryModules {
        SummaryModules::from_value(v)
    }

    #[test]
    fn bars_are_dated_in_exchange_timezone_and_nulls_skipped() {
        // 2024-01-02 14:30 UTC = 09:30 New York; 2024-01-03 04:00 UTC = 23:00 Jan 2 New York.
        let chart: ChartResult = serde_json::from_value(json!({
            "meta": {"currency": "USD", "exchangeTimezoneName": "America/New_York"},
            "timestamp": [1_704_205_800, 1_704_254_400, 1_704_378_600],
            "indicators": {
                "quote": [{
                    "open": [1.0, 2.0, null],
                    "high": [1.5, 2.5, 3.5],
                    "low": [0.5, 1.5, 2.5],
                    "close": [1.2, 2.2, 3.2],
                    "volume": [100, null, 300]
                }],
                "adjclose": [{"adjclose": [1.1, 2.1, 3.1]}]
            },
            "events": {
                "dividends": {"1704205800": {"amount": 0.24, "date": 1_704_205_800}},
                "splits": {"1": {"date": 1, "numerator": 4.0, "denominator": 1.0}}
            }
        }))
        .unwrap();
        let sym = Symbol::new("AAPL").unwrap();
        let req = HistoryRequest::try_new(d(2024, 1, 1), d(2024, 2, 1)).unwrap();
        let h = history(&sym, req, chart, None).unwrap();
        assert_eq!(h.currency.as_deref(), Some("USD"));
        // Second bar lands on Jan 2 local time too; the later one wins the date.
        assert_eq!(h.bars.len(), 1);
        assert_eq!(h.bars[0].date, d(2024, 1, 2));
        assert_eq!(h.bars[0].close, 2.2);
        assert_eq!(h.bars[0].volume, None);
        assert_eq!(h.bars[0].adj_close, Some(2.1));
        assert_eq!(h.dividends.len(), 1);
        // 1970 split is outside the requested range.
        assert!(h.splits.is_empty());
    }

    #[test]
    fn full_action_record_is_not_clipped_to_the_request() {
        let chart: ChartResult = serde_json::from_value(json!({
            "meta": {"exchangeTimezoneName": "America/New_York"},
            "events": {"dividends": {"x": {"amount": 0.24, "date": 1_704_205_800}}}
        }))
        .unwrap();
        // 2014-06-09 13:30 UTC: the 7:1 split, long before the request.
        let actions: ChartEvents = serde_json::from_value(json!({
            "splits": {"1402320600": {"date": 1_402_320_600, "numerator": 7, "denominator": 1}},
            "dividends": {"1707489000": {"amount": 0.24, "date": 1_707_489_000}}
        }))
        .unwrap();
        let sym = Symbol::new("AAPL").unwrap();
        let req = HistoryRequest::try_new(d(2024, 1, 1), d(2024, 2, 1)).unwrap();
        let h = history(&sym, req, chart, Some(actions)).unwrap();
        assert_eq!(h.splits.len(), 1);
        assert_eq!(h.splits[0].date, d(2014, 6, 9));
        assert_eq!(h.splits[0].numerator, 7.0);
        // The full record replaces the chart's own events.
        assert_eq!(h.dividends.len(), 1);
        assert_eq!(h.dividends[0].date, d(2024, 2, 9));
    }

    #[test]
    fn timestamps_without_quotes_is_data_error() {
        let chart: ChartResult =
            serde_json::from_value(json!({"timestamp": [1], "indicators": {"quote": []}}))
                .unwrap();
        let sym = Symbol::new("AAPL").unwrap();
        let req = HistoryRequest::try_new(d(1970, 1, 1), d(1970, 1, 2)).unwrap();
        assert!(matches!(history(&sym, req, chart, None), Err(DashError::Data(_))));
    }

    #[test]
    fn raw_fmt_wrappers_unwrap() {
        assert_eq!(unwrap_raw(&json!({"raw": 1.5, "fmt": "1.50"})), json!(1.5));
        assert_eq!(unwrap_raw(&json!({})), Value::Null);
        assert_eq!(
            cell_from(&json!({"raw": 1_727_481_600, "fmt": "2024-09-28"})),
            Cell::Date(d(2024, 9, 28))
        );
        assert_eq!(cell_from(&json!({"raw": 7, "fmt": "7"})), Cell::Integer(7));
        assert_eq!(cell_from(&json!([{"fmt": "2024-10-31", "raw": 1}])), Cell::Text("2024-10-31".into()));
        assert_eq!(cell_from(&json!("")), Cell::Missing);
    }

    #[test]
    fn info_flattens_modules_with_precedence() {
        let m = modules(json!({
            "price": {"longName": "Apple Inc.", "marketCap": {"raw": 3_000_000_000_000_i64, "fmt": "3T"}, "maxAge": 1},
            "assetProfile": {"sector": "Technology", "fullTimeEmployees": 161_000, "companyOfficers": [{"name": "x"}]},
            "summaryDetail": {"trailingPE": {"raw": 30.5, "fmt": "30.50"}, "marketCap": {"raw": 1, "fmt": "1"}},
            "financialData": {"returnOnEquity": {"raw": 1.5, "fmt": "150%"}, "targetHighPrice": {}}
        }));
        let info = info(&m);
        assert_eq!(info.text_or_na("longName"), "Apple Inc.");
        assert_eq!(info.grouped_or_na("marketCap"), "3,000,000,000,000");
        assert_eq!(info.text_or_na("trailingPE"), "30.5");
        assert_eq!(info.percent_or_na("returnOnEquity"), "150.00%");
        assert_eq!(info.text_or_na("targetHighPrice"), "N/A");
        assert!(info.get("companyOfficers").is_none());
        assert!(info.get("maxAge").is_none());
    }

    #[test]
    fn statements_are_transposed_to_line_items() {
        let m = modules(json!({
            "incomeStatementHistory": {"incomeStatementHistory": [
                {"endDate": {"raw": 1, "fmt": "2024-09-28"}, "totalRevenue": {"raw": 391_035, "fmt": "391B"}, "maxAge": 1},
                {"endDate": {"raw": 0, "fmt": "2023-09-30"}, "totalRevenue": {"raw": 383_285, "fmt": "383B"}}
            ]}
        }));
        let s = statements(&m, false);
        assert_eq!(s.income.columns, vec!["Breakdown", "2024-09-28", "2023-09-30"]);
        assert_eq!(s.income.rows[0][0], Cell::from("Total Revenue"));
        assert_eq!(s.income.rows[0][1], Cell::Integer(391_035));
        assert!(s.balance_sheet.is_empty());
        assert!(s.cashflow.columns.is_empty());
    }

    #[test]
    fn calendar_and_major_holders() {
        let m = modules(json!({
            "calendarEvents": {
                "earnings": {"earningsDate": [{"raw": 1, "fmt": "2024-10-31"}], "earningsAverage": {"raw": 1.6, "fmt": "1.6"}},
                "exDividendDate": {"raw": 1, "fmt": "2024-08-12"}
            },
            "majorHoldersBreakdown": {"insidersPercentHeld": {"raw": 0.0271, "fmt": "2.71%"}, "institutionsCount": {"raw": 6_000, "fmt": "6k"}}
        }));
        let cal = calendar(&m);
        let labels: Vec<String> = cal.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(labels, vec!["Ex-Dividend Date", "Earnings Date", "Earnings Average"]);
        let h = holders(&m);
        assert_eq!(h.major.rows[0][1], Cell::from("2.71%"));
        assert!(h.institutional.is_empty());
        assert_eq!(h.institutional.columns.len(), 6);
    }

    #[test]
    fn option_chain_orders_columns_and_handles_empty() {
        let r: OptionsResult = serde_json::from_value(json!({
            "expirationDates": [1_730_419_200, 1_729_814_400, 1_730_419_200],
            "options": [{
                "expirationDate": 1_729_814_400,
                "calls": [{"strike": 150.0, "contractSymbol": "AAPL241025C00150000", "lastTradeDate": 1_729_700_000, "inTheMoney": true}],
                "puts": []
            }]
        }))
        .unwrap();
        assert_eq!(expirations(&r), vec![1_729_814_400, 1_730_419_200]);
        let sym = Symbol::new("AAPL").unwrap();
        let chain = option_chain(&sym, None, &r).unwrap();
        assert_eq!(chain.expiration, 1_729_814_400);
        assert_eq!(chain.calls.columns[0], "contractSymbol");
        assert_eq!(chain.calls.rows[0][2], Cell::Number(150.0));
        assert_eq!(chain.calls.rows[0][11], Cell::Bool(true));
        assert!(chain.puts.is_empty());

        let empty = OptionsResult::default();
        assert!(expirations(&empty).is_empty());
        assert!(matches!(
            option_chain(&sym, Some(1), &empty),
            Err(DashError::NotFound { .. })
        ));
    }

    #[test]
    fn humanize_camel_case() {
        assert_eq!(humanize("totalRevenue"), "Total Revenue");
        assert_eq!(humanize("ebit"), "Ebit");
    }
}
