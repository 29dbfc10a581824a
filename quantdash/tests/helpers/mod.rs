#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Weekday};
use quantdash::Dashboard;
use quantdash_core::{HistoryRequest, PriceBar, PriceHistory, Symbol};
use quantdash_mock::MockConnector;

pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).expect("valid test symbol")
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

pub fn req(start: NaiveDate, end: NaiveDate) -> HistoryRequest {
    HistoryRequest::try_new(start, end).expect("valid test range")
}

/// All of 2024, which the mock fixtures cover.
pub fn year_2024() -> HistoryRequest {
    req(d(2024, 1, 1), d(2025, 1, 1))
}

/// Dashboard over the static fixture connector with a short timeout.
pub fn mock_dashboard() -> Dashboard {
    Dashboard::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .provider_timeout(Duration::from_millis(100))
        .build()
        .expect("dashboard builds")
}

/// Flat bars on consecutive weekdays from `start`, one per close.
pub fn history_with_closes(symbol: &str, start: NaiveDate, closes: &[f64]) -> PriceHistory {
    let mut h = PriceHistory::empty(sym(symbol));
    let mut date = start;
    for &close in closes {
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date = date.succ_opt().expect("date in range");
        }
        h.bars.push(PriceBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: Some(close),
            volume: Some(1_000),
        });
        date = date.succ_opt().expect("date in range");
    }
    h
}
