use chrono::{Datelike, NaiveDate, Weekday};
use quantdash_core::{Dividend, HistoryRequest, PriceBar, PriceHistory, Symbol};

struct Profile {
    base: f64,
    drift: f64,
    swing: f64,
    volume: u64,
    dividend: f64,
}

fn profile(s: &str) -> Option<Profile> {
    match s {
        "AAPL" => Some(Profile {
            base: 150.0,
            drift: 0.08,
            swing: 12.0,
            volume: 60_000_000,
            dividend: 0.24,
        }),
        "MSFT" => Some(Profile {
            base: 280.0,
            drift: 0.15,
            swing: 20.0,
            volume: 25_000_000,
            dividend: 0.75,
        }),
        _ => None,
    }
}

pub fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 3).unwrap_or_default()
}

/// Exclusive.
pub fn last_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

fn bar(p: &Profile, i: u32, date: NaiveDate) -> PriceBar {
    let t = f64::from(i);
    let close = p.base + p.drift * t + p.swing * (t / 11.0).sin();
    let open = close - 0.4 * (t / 3.0).cos();
    let high = open.max(close) + 1.1;
    let low = open.min(close) - 0.9;
    PriceBar {
        date,
        open,
        high,
        low,
        close,
        adj_close: Some(close),
        volume: Some(p.volume + u64::from(i % 17) * 250_000),
    }
}

/// Deterministic weekday bars between the fixture bounds, clipped to `req`.
///
/// Dividends are the full fixture record whatever the request.
pub fn by_symbol(s: &str, req: HistoryRequest) -> Option<PriceHistory> {
    let p = profile(s)?;
    let symbol = Symbol::new(s).ok()?;
    let mut out = PriceHistory::empty(symbol);
    out.currency = Some("USD".to_string());
    out.timezone = Some("America/New_York".to_string());

    let mut date = first_day();
    let mut i = 0u32;
    while date < last_day() {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            if req.contains(date) {
                out.bars.push(bar(&p, i, date));
            }
            i += 1;
        }
        date = date.succ_opt().unwrap_or(date);
    }

    for year in 2022..=2024 {
        for month in [2u32, 5, 8, 11] {
            if let Some(d) = NaiveDate::from_ymd_opt(year, month, 10) {
                out.dividends.push(Dividend {
                    date: d,
                    amount: p.dividend,
                });
            }
        }
    }
    Some(out)
}
