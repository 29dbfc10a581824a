use chrono::NaiveDate;
use quantdash_core::{DashError, HistoryRequest, Symbol};

// Display strings are not asserted; only the variant mapping matters.

#[test]
fn inverted_history_range_is_invalid_arg() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let err = HistoryRequest::try_new(start, end).unwrap_err();
    assert!(matches!(err, DashError::InvalidArg(_)));
}

#[test]
fn bad_ticker_is_invalid_arg() {
    let err = "AAPL;DROP".parse::<Symbol>().unwrap_err();
    assert!(matches!(err, DashError::InvalidArg(_)));
}

#[test]
fn date_parse_errors_map_to_invalid_arg() {
    let parse = NaiveDate::parse_from_str("2024-13-01", "%Y-%m-%d").unwrap_err();
    let err: DashError = parse.into();
    assert!(matches!(err, DashError::InvalidArg(_)));
}

#[test]
fn json_errors_map_to_data() {
    let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: DashError = parse.into();
    assert_eq!(err.kind(), "data");
}

#[test]
fn aggregate_not_found_requires_every_member() {
    let all = DashError::AllProvidersFailed(vec![
        DashError::not_found("history for ZZZZ"),
        DashError::not_found("history for ZZZZ"),
    ]);
    assert!(all.is_not_found());
    let mixed = DashError::AllProvidersFailed(vec![
        DashError::not_found("history for ZZZZ"),
        DashError::connector("quantdash-yahoo", "server error"),
    ]);
    assert!(!mixed.is_not_found());
    assert!(!DashError::AllProvidersFailed(vec![]).is_not_found());
}

#[test]
fn timeouts_are_classified() {
    assert!(DashError::provider_timeout("quantdash-mock", "history").is_timeout());
    assert!(DashError::AllProvidersTimedOut { capability: "info" }.is_timeout());
    assert!(!DashError::unsupported("esg").is_timeout());
}
