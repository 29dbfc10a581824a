#![cfg(feature = "test-adapters")]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use quantdash_core::{
    Capability, DashError, HistoryRequest, QuantConnector, Symbol,
    connector::{
        CalendarProvider, HistoryProvider, InfoProvider, OptionChainProvider,
        OptionsExpirationsProvider, StatementsProvider,
    },
};
use quantdash_yahoo::{
    YahooConnector, adapter,
    wire::{ChartResult, OptionsResult, SummaryModules},
};
use serde_json::json;

// Bundle the trait objects into something that satisfies CloneArcAdapters.
#[derive(Default)]
struct Combo {
    h: Option<Arc<dyn adapter::YfHistory>>,
    s: Option<Arc<dyn adapter::YfSummary>>,
    o: Option<Arc<dyn adapter::YfOptions>>,
}

impl adapter::CloneArcAdapters for Combo {
    fn clone_arc_history(&self) -> Arc<dyn adapter::YfHistory> {
        self.h.clone().unwrap_or_else(|| {
            <dyn adapter::YfHistory>::from_fn(|_, _| Err(DashError::unsupported("history")))
        })
    }
    fn clone_arc_summary(&self) -> Arc<dyn adapter::YfSummary> {
        self.s.clone().unwrap_or_else(|| {
            <dyn adapter::YfSummary>::from_fn(|_, _| Err(DashError::unsupported("summary")))
        })
    }
    fn clone_arc_options(&self) -> Arc<dyn adapter::YfOptions> {
        self.o.clone().unwrap_or_else(|| {
            <dyn adapter::YfOptions>::from_fn(|_, _| Err(DashError::unsupported("options")))
        })
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

#[tokio::test]
async fn history_uses_injected_adapter() {
    let hist = <dyn adapter::YfHistory>::from_fn(|symbol, req| {
        assert_eq!(symbol, "MSFT");
        assert_eq!(req.start(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        // 2023-12-29 is outside the request and must be dropped.
        Ok(serde_json::from_value::<ChartResult>(json!({
            "meta": {"currency": "USD", "gmtoffset": -18000},
            "timestamp": [1_703_860_200, 1_704_292_200, 1_704_205_800],
            "indicators": {"quote": [{
                "open": [1.0, 3.0, 2.0],
                "high": [1.0, 3.0, 2.0],
                "low": [1.0, 3.0, 2.0],
                "close": [1.0, 3.0, 2.0],
                "volume": [10, 30, 20]
            }]},
            "events": {"dividends": {"x": {"amount": 0.75, "date": 1_704_292_200}}}
        }))
        .unwrap())
    });
    let yf = YahooConnector::from_adapter(&Combo {
        h: Some(hist),
        ..Combo::default()
    });

    let req = HistoryRequest::try_new(d(2024, 1, 1), d(2024, 2, 1)).unwrap();
    let h = yf.history(&sym("msft"), req).await.unwrap();
    let dates: Vec<_> = h.bars.iter().map(|b| b.date).collect();
    assert_eq!(dates, vec![d(2024, 1, 2), d(2024, 1, 3)]);
    assert_eq!(h.bars[0].close, 2.0);
    assert_eq!(h.dividends.len(), 1);
    assert_eq!(h.dividends[0].date, d(2024, 1, 3));
}

#[tokio::test]
async fn info_requests_profile_and_ratio_modules() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen_in = Arc::clone(&seen);
    let summary = <dyn adapter::YfSummary>::from_fn(move |_, modules| {
        seen_in.lock().unwrap().extend(modules);
        Ok(SummaryModules::from_value(json!({
            "assetProfile": {"sector": "Technology", "industry": "Consumer Electronics"},
            "defaultKeyStatistics": {"pegRatio": {"raw": 2.1, "fmt": "2.10"}}
        })))
    });
    let yf = YahooConnector::from_adapter(&Combo {
        s: Some(summary),
        ..Combo::default()
    });

    let info = yf.info(&sym("AAPL")).await.unwrap();
    assert_eq!(info.text_or_na("sector"), "Technology");
    assert_eq!(info.text_or_na("pegRatio"), "2.1");
    assert_eq!(info.text_or_na("forwardPE"), "N/A");
    let seen = seen.lock().unwrap();
    for m in ["price", "assetProfile", "summaryDetail", "defaultKeyStatistics", "financialData"] {
        assert!(seen.iter().any(|s| s == m), "missing module {m}");
    }
}

#[tokio::test]
async fn quarterly_statements_use_quarterly_modules() {
    let summary = <dyn adapter::YfSummary>::from_fn(|_, modules| {
        assert!(modules.iter().all(|m| m.ends_with("Quarterly")), "{modules:?}");
        Ok(SummaryModules::from_value(json!({
            "cashflowStatementHistoryQuarterly": {"cashflowStatements": [
                {"endDate": {"raw": 0, "fmt": "2024-06-29"}, "netIncome": {"raw": 21_448, "fmt": "21.45k"}}
            ]}
        })))
    });
    let yf = YahooConnector::from_adapter(&Combo {
        s: Some(summary),
        ..Combo::default()
    });

    let s = yf.statements(&sym("AAPL"), true).await.unwrap();
    assert!(s.income.is_empty());
    assert_eq!(s.cashflow.columns, vec!["Breakdown", "2024-06-29"]);
    assert_eq!(s.cashflow.rows[0][0].to_string(), "Net Income");
}

#[tokio::test]
async fn options_without_listing_map_to_empty_expirations() {
    let options = <dyn adapter::YfOptions>::from_fn(|symbol, _| {
        Err(DashError::connector("yahoo", format!("No data found for {symbol}")))
    });
    let yf = YahooConnector::from_adapter(&Combo {
        o: Some(options),
        ..Combo::default()
    });

    assert!(yf.options_expirations(&sym("BRK-B")).await.unwrap().is_empty());
    let err = yf.option_chain(&sym("BRK-B"), None).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn option_chain_for_requested_expiration() {
    let options = <dyn adapter::YfOptions>::from_fn(|_, date| {
        assert_eq!(date, Some(1_729_814_400));
        Ok(serde_json::from_value::<OptionsResult>(json!({
            "expirationDates": [1_729_814_400],
            "options": [{"expirationDate": 1_729_814_400, "calls": [{"strike": 100.0}], "puts": [{"strike": 90.0}, {"strike": 95.0}]}]
        }))
        .unwrap())
    });
    let yf = YahooConnector::from_adapter(&Combo {
        o: Some(options),
        ..Combo::default()
    });

    let chain = yf
        .option_chain(&sym("AAPL"), Some(1_729_814_400))
        .await
        .unwrap();
    assert_eq!(chain.calls.len(), 1);
    assert_eq!(chain.puts.len(), 2);
    assert_eq!(chain.calls.column("strike").unwrap()[0].to_string(), "100");
}

#[tokio::test]
async fn connector_errors_are_normalized() {
    let summary = <dyn adapter::YfSummary>::from_fn(|_, _| Err(DashError::Other("boom".into())));
    let yf = YahooConnector::from_adapter(&Combo {
        s: Some(summary),
        ..Combo::default()
    });

    match yf.calendar(&sym("AAPL")).await {
        Err(DashError::Connector { connector, msg }) => {
            assert_eq!(connector, "quantdash-yahoo");
            assert_eq!(msg, "boom");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn missing_adapters_surface_unsupported() {
    let yf = YahooConnector::from_adapter(&Combo::default());
    let err = yf.info(&sym("AAPL")).await.unwrap_err();
    assert!(matches!(err, DashError::Unsupported { .. }), "got {err:?}");
}

#[test]
fn advertises_every_capability() {
    let yf = YahooConnector::from_adapter(&Combo::default());
    assert_eq!(yf.name(), "quantdash-yahoo");
    assert_eq!(yf.vendor(), "Yahoo Finance");
    assert_eq!(yf.capabilities(), Capability::ALL.to_vec());
}
