use chrono::NaiveDate;
use quantdash_core::{Capability, DashError, HistoryRequest, QuantConnector, Symbol};
use quantdash_mock::MockConnector;

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn range(a: (i32, u32, u32), b: (i32, u32, u32)) -> HistoryRequest {
    HistoryRequest::try_new(
        NaiveDate::from_ymd_opt(a.0, a.1, a.2).unwrap(),
        NaiveDate::from_ymd_opt(b.0, b.1, b.2).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn history_is_clipped_and_weekday_only() {
    let m = MockConnector::new();
    let hp = m.as_history_provider().unwrap();
    let h = hp
        .history(&sym("AAPL"), range((2024, 1, 1), (2024, 2, 1)))
        .await
        .unwrap();
    // January 2024 has 23 weekdays.
    assert_eq!(h.bars.len(), 23);
    assert!(h.bars.windows(2).all(|w| w[0].date < w[1].date));
    assert!(h.bars.iter().all(|b| b.low <= b.open.min(b.close)));
    assert!(h.bars.iter().all(|b| b.high >= b.open.max(b.close)));
    assert_eq!(h.currency.as_deref(), Some("USD"));
    // Corporate actions are not clipped to the requested month.
    assert_eq!(h.dividends.len(), 12);
}

#[tokio::test]
async fn history_is_deterministic() {
    let m = MockConnector::new();
    let hp = m.as_history_provider().unwrap();
    let req = range((2020, 1, 1), (2026, 1, 1));
    let a = hp.history(&sym("MSFT"), req).await.unwrap();
    let b = hp.history(&sym("MSFT"), req).await.unwrap();
    assert_eq!(a, b);
    assert!(a.bars.len() > 700);
    assert_eq!(a.dividends.len(), 12);
}

#[tokio::test]
async fn unknown_and_failing_symbols() {
    let m = MockConnector::new();
    let ip = m.as_info_provider().unwrap();
    assert!(ip.info(&sym("ZZZZ")).await.unwrap_err().is_not_found());
    match ip.info(&sym("FAIL")).await {
        Err(DashError::Connector { connector, .. }) => assert_eq!(connector, "quantdash-mock"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn msft_has_sparse_info_and_no_options() {
    let m = MockConnector::new();
    let info = m.as_info_provider().unwrap().info(&sym("MSFT")).await.unwrap();
    assert_eq!(info.text_or_na("longName"), "Microsoft Corporation");
    assert_eq!(info.grouped_or_na("marketCap"), "N/A");
    assert_eq!(info.percent_or_na("returnOnEquity"), "N/A");

    let exp = m
        .as_options_expirations_provider()
        .unwrap()
        .options_expirations(&sym("MSFT"))
        .await
        .unwrap();
    assert!(exp.is_empty());
}

#[tokio::test]
async fn aapl_option_chain_by_expiration() {
    let m = MockConnector::new();
    let ep = m.as_options_expirations_provider().unwrap();
    let cp = m.as_option_chain_provider().unwrap();
    let exp = ep.options_expirations(&sym("AAPL")).await.unwrap();
    assert_eq!(exp.len(), 2);

    let nearest = cp.option_chain(&sym("AAPL"), None).await.unwrap();
    assert_eq!(nearest.expiration, exp[0]);
    assert_eq!(nearest.calls.len(), 3);
    let second = cp.option_chain(&sym("AAPL"), Some(exp[1])).await.unwrap();
    assert_eq!(second.expiration, exp[1]);
    assert!(cp.option_chain(&sym("AAPL"), Some(1)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn quarterly_statements_differ_from_annual() {
    let m = MockConnector::new();
    let sp = m.as_statements_provider().unwrap();
    let annual = sp.statements(&sym("AAPL"), false).await.unwrap();
    let quarterly = sp.statements(&sym("AAPL"), true).await.unwrap();
    assert_eq!(annual.income.columns[0], "Breakdown");
    assert_ne!(annual.income.columns, quarterly.income.columns);
    assert!(sp.statements(&sym("MSFT"), false).await.unwrap().income.is_empty());
}

#[test]
fn advertises_every_capability() {
    assert_eq!(MockConnector::new().capabilities(), Capability::ALL.to_vec());
}
