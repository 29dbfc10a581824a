use std::fmt::Write as _;

use quantdash_core::{Capability, DashError, Frame, Info, expiration_date, format_percent};

use super::{LineChart, escape_html, render_frame};
use crate::form::DashboardForm;
use crate::report::{DashboardReport, OptionsSection};

const STYLE: &str = r"
:root {
    --primary-dark: #1a2639;
    --primary-medium: #3e4a61;
    --primary-light: #d9dad7;
    --accent-blue: #4a6fa5;
    --accent-teal: #166088;
    --call-green: #2e8b57;
    --put-red: #c04e4e;
    --highlight: #f0f4f8;
}
* { font-family: 'Lato', 'Segoe UI', Roboto, sans-serif; box-sizing: border-box; }
html, body { margin: 0; background-color: #f8f9fa; }
h1, h2, h3, h4 { color: var(--primary-dark); font-weight: 700; letter-spacing: -0.015em; }
.layout { display: flex; min-height: 100vh; }
.sidebar {
    width: 260px; padding: 1.5rem; color: white;
    background: linear-gradient(135deg, var(--primary-dark), var(--primary-medium));
}
.sidebar h2 { color: white; }
.sidebar label { display: block; color: white; font-weight: 500; margin: 0.8rem 0 0.3rem; }
.sidebar input, .sidebar select { width: 100%; padding: 0.4rem; border-radius: 6px; border: 0; }
.sidebar button { margin-top: 1.2rem; width: 100%; padding: 0.5rem; border-radius: 6px; border: 0;
    background: var(--accent-blue); color: white; font-weight: 600; cursor: pointer; }
main { flex: 1; padding: 1.5rem 2.5rem; max-width: 1200px; }
.columns { display: flex; gap: 2rem; flex-wrap: wrap; }
.columns > div { flex: 1; min-width: 260px; }
.metric-container {
    display: flex; flex-direction: column; justify-content: center; align-items: center;
    padding: 1.8rem 2rem; border-radius: 12px; background: white;
    box-shadow: 0 6px 20px rgba(0,0,0,0.08); margin-bottom: 1.5rem; text-align: center;
    border: 1px solid rgba(0,0,0,0.05); transition: all 0.3s ease-in-out;
}
.metric-container:hover { transform: translateY(-4px); box-shadow: 0 12px 24px rgba(0,0,0,0.1); }
.metric-value { font-size: 2.1rem; font-weight: 800; font-family: 'Roboto Mono', monospace;
    margin: 0.7rem 0; color: var(--primary-dark); }
.metric-label { font-size: 1.05rem; font-weight: 600; text-transform: uppercase;
    color: var(--primary-medium); margin-bottom: 0.5rem; }
.frame { overflow-x: auto; border-radius: 10px; box-shadow: 0 4px 12px rgba(0,0,0,0.05);
    border: 1px solid rgba(0,0,0,0.03); background: white; margin-bottom: 1rem; }
.frame table { border-collapse: collapse; width: 100%; font-size: 0.85rem; }
.frame th, .frame td { padding: 0.35rem 0.6rem; border-bottom: 1px solid #e9ecef; text-align: left; white-space: nowrap; }
.frame th { background: var(--highlight); color: var(--primary-medium); }
.frame td.num { text-align: right; font-family: 'Roboto Mono', monospace; }
.frame td.na { color: #adb5bd; }
details { background: white; border-radius: 10px; padding: 0.6rem 1rem; margin-bottom: 0.8rem;
    border: 1px solid rgba(0,0,0,0.05); }
summary { cursor: pointer; font-weight: 600; color: var(--primary-medium); }
.chart { margin: 0 0 1.5rem; background: white; border-radius: 10px; padding: 0.5rem; }
.chart svg { width: 100%; height: 320px; }
.chart .tick { font-size: 11px; fill: var(--primary-medium); }
.legend span { margin-right: 1rem; font-size: 0.85rem; }
.legend i { display: inline-block; width: 12px; height: 3px; margin-right: 0.35rem; vertical-align: middle; }
.empty { color: #6c757d; font-style: italic; }
.alert { padding: 0.9rem 1.2rem; border-radius: 8px; margin: 1rem 0; }
.alert.warning { background: #fff3cd; color: #664d03; border: 1px solid #ffecb5; }
.alert.error { background: #f8d7da; color: #842029; border: 1px solid #f5c2c7; }
.calls h3 { color: var(--call-green); }
.puts h3 { color: var(--put-red); }
.footer { font-size: 0.78rem; text-align: center; margin-top: 3rem; color: #6c757d;
    padding: 1.2rem; border-top: 1px solid #e9ecef; letter-spacing: 0.03em; }
";

const CLOSE_COLOR: &str = "#1a2639";
const SMA_SHORT_COLOR: &str = "#4a6fa5";
const SMA_LONG_COLOR: &str = "#c04e4e";
const DIVIDEND_COLOR: &str = "#2e8b57";

const NO_OPTIONS: &str = "No options data available for this ticker.";

/// Render the full dashboard page for a successfully assembled report.
#[must_use]
pub fn render_page(form: &DashboardForm, report: &DashboardReport) -> String {
    let mut out = String::new();
    let symbol = escape_html(report.symbol.as_str());

    let _ = write!(out, "<h2>📈 {symbol} Stock Overview</h2>");
    company(&mut out, &report.info);
    price_and_indicators(&mut out, report);
    returns(&mut out, report);
    statements(&mut out, report);
    earnings(&mut out, report);
    dividends_and_splits(&mut out, report);
    ownership(&mut out, report);

    out.push_str("<h2>🧠 Analyst Recommendations</h2>");
    expander(
        &mut out,
        "⭐ Ratings Over Time",
        &dataset(report, Capability::Recommendations, &report.recommendations),
    );

    out.push_str("<h2>🌱 ESG &amp; Sustainability</h2>");
    out.push_str(&dataset(report, Capability::Esg, &report.sustainability));

    options(&mut out, form, &report.options, report);

    out.push_str("<h2>📅 Events &amp; Calendar</h2>");
    out.push_str(&dataset(report, Capability::Calendar, &report.calendar));

    shell(form, &format!("{symbol} · Stock Dashboard"), &out)
}

/// Render the page shown when a report could not be assembled.
#[must_use]
pub fn render_error_page(form: &DashboardForm, err: &DashError) -> String {
    let body = format!(
        r#"<div class="alert error"><strong>Could not load {}</strong> ({}): {}</div>"#,
        escape_html(&form.ticker),
        err.kind(),
        escape_html(&err.to_string()),
    );
    shell(form, "Stock Dashboard", &body)
}

fn shell(form: &DashboardForm, title: &str, body: &str) -> String {
    let (annual, quarterly) = if form.quarterly {
        ("", " selected")
    } else {
        (" selected", "")
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="layout">
<aside class="sidebar">
<h2>Input</h2>
<form method="get" action="/">
<label for="ticker">Ticker Symbol (e.g. AAPL, MSFT, TSLA):</label>
<input id="ticker" name="ticker" type="text" value="{ticker}">
<label for="start">Start Date</label>
<input id="start" name="start" type="date" value="{start}">
<label for="end">End Date</label>
<input id="end" name="end" type="date" value="{end}">
<label for="period">Statements</label>
<select id="period" name="period"><option value="annual"{annual}>Annual</option><option value="quarterly"{quarterly}>Quarterly</option></select>
<button type="submit">Load</button>
</form>
</aside>
<main>
<h1>📊 Quantitative Stock Dashboard</h1>
{body}
<div class="footer">Market data as reported by the configured provider. Figures are not investment advice.</div>
</main>
</div>
</body>
</html>
"#,
        ticker = escape_html(&form.ticker),
        start = escape_html(&form.start),
        end = escape_html(&form.end),
    )
}

fn field(out: &mut String, label: &str, value_html: &str) {
    let _ = write!(out, "<p><strong>{label}:</strong> {value_html}</p>");
}

fn metric(out: &mut String, label: &str, value: &str) {
    let _ = write!(
        out,
        r#"<div class="metric-container"><div class="metric-label">{label}</div><div class="metric-value">{}</div></div>"#,
        escape_html(value)
    );
}

fn expander(out: &mut String, summary: &str, inner_html: &str) {
    let _ = write!(
        out,
        "<details><summary>{summary}</summary>{inner_html}</details>"
    );
}

fn dataset(report: &DashboardReport, capability: Capability, frame: &Frame) -> String {
    if report.unavailable.contains(&capability) {
        r#"<p class="empty">Not offered by the configured data provider.</p>"#.to_string()
    } else {
        render_frame(frame)
    }
}

fn website(info: &Info) -> String {
    let url = info.text_or_na("website");
    if url.starts_with("https://") || url.starts_with("http://") {
        let url = escape_html(&url);
        format!(r#"<a href="{url}" target="_blank" rel="noopener">{url}</a>"#)
    } else {
        escape_html(&url)
    }
}

fn company(out: &mut String, info: &Info) {
    out.push_str(r#"<div class="columns"><div><h3>🏢 Company Profile</h3>"#);
    for (label, key) in [
        ("Name", "longName"),
        ("Sector", "sector"),
        ("Industry", "industry"),
        ("Country", "country"),
    ] {
        field(out, label, &escape_html(&info.text_or_na(key)));
    }
    field(out, "Website", &website(info));
    field(
        out,
        "Employees",
        &escape_html(&info.text_or_na("fullTimeEmployees")),
    );

    out.push_str("</div><div><h3>📊 Valuation Metrics</h3>");
    field(out, "Market Cap", &escape_html(&info.grouped_or_na("marketCap")));
    for (label, key) in [
        ("Trailing P/E", "trailingPE"),
        ("Forward P/E", "forwardPE"),
        ("PEG Ratio", "pegRatio"),
        ("Price to Book", "priceToBook"),
    ] {
        field(out, label, &escape_html(&info.text_or_na(key)));
    }
    field(out, "ROE", &escape_html(&info.percent_or_na("returnOnEquity")));
    out.push_str("</div></div>");
}

fn price_and_indicators(out: &mut String, report: &DashboardReport) {
    let ind = &report.indicators;
    let close: Vec<Option<f64>> = ind.close.iter().copied().map(Some).collect();

    out.push_str("<h3>📈 Price History</h3>");
    out.push_str(
        &LineChart::new(ind.dates.clone())
            .series("Close", CLOSE_COLOR, close.clone())
            .to_svg(),
    );

    out.push_str("<h3>📐 Technical Indicators</h3>");
    out.push_str(
        &LineChart::new(ind.dates.clone())
            .series("Close", CLOSE_COLOR, close)
            .series(
                format!("SMA{}", ind.config.short_window),
                SMA_SHORT_COLOR,
                ind.sma_short.clone(),
            )
            .series(
                format!("SMA{}", ind.config.long_window),
                SMA_LONG_COLOR,
                ind.sma_long.clone(),
            )
            .to_svg(),
    );

    out.push_str(r#"<div class="columns"><div>"#);
    metric(
        out,
        &format!("📊 Volatility ({}d STD)", ind.config.volatility_window),
        &format_percent(ind.latest_volatility()),
    );
    metric(out, "📉 Max Daily Loss", &format_percent(ind.max_daily_loss()));
    out.push_str("</div><div>");
    metric(out, "📈 Max Daily Gain", &format_percent(ind.max_daily_gain()));
    metric(
        out,
        "📆 Mean Daily Return",
        &format_percent(ind.mean_daily_return()),
    );
    out.push_str("</div></div>");
}

fn returns(out: &mut String, report: &DashboardReport) {
    let r = &report.returns;
    out.push_str(r#"<h3>📅 Returns Summary</h3><div class="columns">"#);
    for (label, value) in [
        ("📈 Daily Return Mean", r.mean_daily),
        ("📅 Monthly Return Mean", r.mean_monthly),
        ("📆 Yearly Return Mean", r.mean_yearly),
    ] {
        out.push_str("<div>");
        metric(out, label, &format_percent(value));
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn statements(out: &mut String, report: &DashboardReport) {
    let period = if report.quarterly {
        "quarterly"
    } else {
        "annual"
    };
    let _ = write!(out, "<h2>📄 Financial Statements <small>({period})</small></h2>");
    let s = &report.statements;
    for (summary, frame) in [
        ("📊 Income Statement", &s.income),
        ("📋 Balance Sheet", &s.balance_sheet),
        ("💵 Cash Flow", &s.cashflow),
    ] {
        expander(out, summary, &dataset(report, Capability::Statements, frame));
    }
}

fn earnings(out: &mut String, report: &DashboardReport) {
    out.push_str("<h2>💰 Earnings</h2><h3>Annual Earnings</h3>");
    out.push_str(&dataset(report, Capability::Earnings, &report.earnings.annual));
    out.push_str("<h3>Quarterly Earnings</h3>");
    out.push_str(&dataset(
        report,
        Capability::Earnings,
        &report.earnings.quarterly,
    ));
}

fn dividends_and_splits(out: &mut String, report: &DashboardReport) {
    let (dates, amounts): (Vec<_>, Vec<_>) = report
        .history
        .dividend_series()
        .into_iter()
        .map(|(d, a)| (d, Some(a)))
        .unzip();
    out.push_str(r#"<h2>📆 Dividends &amp; Stock Splits</h2><div class="columns"><div><h3>Dividends</h3>"#);
    out.push_str(
        &LineChart::new(dates)
            .series("Dividends", DIVIDEND_COLOR, amounts)
            .to_svg(),
    );
    out.push_str("</div><div><h3>Splits</h3>");
    out.push_str(&render_frame(&report.history.splits_frame()));
    out.push_str("</div></div>");
}

fn ownership(out: &mut String, report: &DashboardReport) {
    out.push_str("<h2>🏦 Ownership &amp; Insider Trading</h2>");
    let h = &report.holders;
    for (summary, frame) in [
        ("📌 Institutional Holders", &h.institutional),
        ("👤 Major Holders", &h.major),
        ("🔒 Insider Transactions", &h.insider_transactions),
    ] {
        expander(out, summary, &dataset(report, Capability::Holders, frame));
    }
}

fn expiration_label(ts: i64) -> String {
    expiration_date(ts).map_or_else(|| ts.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn options(
    out: &mut String,
    form: &DashboardForm,
    section: &OptionsSection,
    report: &DashboardReport,
) {
    out.push_str("<h2>📈 Options Data</h2>");
    if section.is_empty() {
        let _ = write!(out, r#"<div class="alert warning">{NO_OPTIONS}</div>"#);
        return;
    }

    let _ = write!(
        out,
        r#"<form method="get" action="/"><input type="hidden" name="ticker" value="{}"><input type="hidden" name="start" value="{}"><input type="hidden" name="end" value="{}"><input type="hidden" name="period" value="{}"><label for="expiration">Select Expiration Date</label> <select id="expiration" name="expiration" onchange="this.form.submit()">"#,
        escape_html(&form.ticker),
        escape_html(&form.start),
        escape_html(&form.end),
        if form.quarterly { "quarterly" } else { "annual" },
    );
    for ts in &section.expirations {
        let selected = if section.selected == Some(*ts) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<option value="{ts}"{selected}>{}</option>"#,
            expiration_label(*ts)
        );
    }
    out.push_str("</select> <noscript><button type=\"submit\">Show</button></noscript></form>");

    match &section.chain {
        Some(chain) => {
            out.push_str(r#"<div class="calls"><h3>Calls</h3>"#);
            out.push_str(&render_frame(&chain.calls));
            out.push_str(r#"</div><div class="puts"><h3>Puts</h3>"#);
            out.push_str(&render_frame(&chain.puts));
            out.push_str("</div>");
        }
        None if report.unavailable.contains(&Capability::OptionChain) => {
            out.push_str(r#"<p class="empty">Not offered by the configured data provider.</p>"#);
        }
        None => out.push_str(r#"<p class="empty">No data available.</p>"#),
    }
}
