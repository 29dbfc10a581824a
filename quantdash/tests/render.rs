mod helpers;

use quantdash::render::render_page;
use quantdash::{DashboardForm, DashboardReport, OptionsSection};
use quantdash_core::{
    Capability, Cell, Frame, IndicatorConfig, Info, PriceHistory, ReturnsSummary, Split,
    TechnicalIndicators,
};
use serde_json::json;

use helpers::{AAPL, d, history_with_closes, sym, year_2024};

fn form() -> DashboardForm {
    DashboardForm {
        ticker: AAPL.into(),
        start: "2024-01-01".into(),
        end: "2025-01-01".into(),
        expiration: None,
        quarterly: false,
    }
}

fn report(history: PriceHistory, info: Info) -> DashboardReport {
    let cfg = IndicatorConfig::default();
    DashboardReport {
        symbol: sym(AAPL),
        request: year_2024(),
        indicators: TechnicalIndicators::compute(&history.bars, &cfg),
        returns: ReturnsSummary::compute(&history.bars),
        history,
        info,
        quarterly: false,
        statements: Default::default(),
        earnings: Default::default(),
        holders: Default::default(),
        recommendations: Frame::default(),
        sustainability: Frame::default(),
        calendar: Frame::default(),
        options: OptionsSection::default(),
        unavailable: Vec::new(),
    }
}

#[test]
fn empty_info_renders_na_everywhere() {
    let html = render_page(&form(), &report(PriceHistory::empty(sym(AAPL)), Info::new()));
    for label in [
        "Name",
        "Sector",
        "Industry",
        "Country",
        "Website",
        "Employees",
        "Market Cap",
        "Trailing P/E",
        "Forward P/E",
        "PEG Ratio",
        "Price to Book",
        "ROE",
    ] {
        assert!(
            html.contains(&format!("<strong>{label}:</strong> N/A")),
            "{label} should be N/A"
        );
    }
    // Statistics over an empty series render as N/A instead of failing.
    assert!(html.contains(r#"<div class="metric-value">N/A</div>"#));
}

#[test]
fn empty_expirations_take_the_warning_branch() {
    let html = render_page(&form(), &report(PriceHistory::empty(sym(AAPL)), Info::new()));
    assert!(html.contains("No options data available for this ticker."));
    assert!(!html.contains(r#"name="expiration""#));
}

#[test]
fn provider_text_is_escaped() {
    let mut info = Info::new();
    info.insert("longName", json!("<img src=x onerror=alert(1)>"));
    let mut r = report(PriceHistory::empty(sym(AAPL)), info);
    let mut cal = Frame::new(["Event", "Value"]);
    cal.push_row(vec![Cell::from("Earnings <Date>"), Cell::from("Q&A")])
        .unwrap();
    r.calendar = cal;

    let html = render_page(&form(), &r);
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains("<td>Earnings &lt;Date&gt;</td><td>Q&amp;A</td>"));
}

#[test]
fn charts_and_metrics_follow_indicator_windows() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
    let mut history = history_with_closes(AAPL, d(2024, 1, 2), &closes);
    history.splits.push(Split {
        date: d(2024, 2, 1),
        numerator: 4.0,
        denominator: 1.0,
    });
    let html = render_page(&form(), &report(history, Info::new()));

    assert!(html.contains("SMA20"));
    assert!(html.contains("SMA50"));
    assert!(html.contains("📊 Volatility (20d STD)"));
    assert!(html.matches("<polyline").count() >= 4);
    assert!(html.contains("<th>Stock Splits</th>"));
    assert!(html.contains(r#"<td class="num">4</td>"#));
}

#[test]
fn unavailable_sections_say_so() {
    let mut r = report(PriceHistory::empty(sym(AAPL)), Info::new());
    r.unavailable = vec![Capability::Esg];
    let html = render_page(&form(), &r);
    assert!(html.contains("Not offered by the configured data provider."));
}
