use quantdash::Dashboard;
use quantdash_core::{Capability, DashError, Info};
use quantdash_mock::{DynamicMockConnector, MockBehavior};
use serde_json::json;

use crate::helpers::{AAPL, d, history_with_closes, req, sym};

#[tokio::test]
async fn first_registered_connector_wins() {
    let (first, c1) = DynamicMockConnector::new_with_controller("first");
    let (second, c2) = DynamicMockConnector::new_with_controller("second");
    c1.set_history_behavior(
        sym(AAPL),
        MockBehavior::Return(history_with_closes(AAPL, d(2024, 1, 2), &[1.0, 2.0])),
    )
    .await;
    c2.set_history_behavior(
        sym(AAPL),
        MockBehavior::Return(history_with_closes(AAPL, d(2024, 1, 2), &[9.0])),
    )
    .await;

    let dash = Dashboard::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();
    assert_eq!(dash.connector_names(), vec!["first", "second"]);

    let h = dash
        .history(&sym(AAPL), req(d(2024, 1, 1), d(2024, 2, 1)))
        .await
        .unwrap();
    assert_eq!(h.bars.len(), 2);
    assert!(c2.calls().await.is_empty(), "fallback must not be consulted");
}

#[tokio::test]
async fn not_found_falls_back_to_next_connector() {
    let (first, c1) = DynamicMockConnector::new_with_controller("first");
    let (second, c2) = DynamicMockConnector::new_with_controller("second");
    let info: Info = [("longName".to_string(), json!("Apple Inc."))]
        .into_iter()
        .collect();
    c2.set_info_behavior(sym(AAPL), MockBehavior::Return(info.clone()))
        .await;

    let dash = Dashboard::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();

    assert_eq!(dash.info(&sym(AAPL)).await.unwrap(), info);
    assert_eq!(c1.calls().await, vec![(Capability::Info, sym(AAPL))]);
    assert_eq!(c2.calls().await, vec![(Capability::Info, sym(AAPL))]);
}

#[tokio::test]
async fn provider_error_falls_back_to_next_connector() {
    let (first, c1) = DynamicMockConnector::new_with_controller("first");
    let (second, c2) = DynamicMockConnector::new_with_controller("second");
    c1.set_expirations_behavior(
        sym(AAPL),
        MockBehavior::Fail(DashError::connector("first", "server error")),
    )
    .await;
    c2.set_expirations_behavior(sym(AAPL), MockBehavior::Return(vec![1, 2]))
        .await;

    let dash = Dashboard::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();
    assert_eq!(dash.options_expirations(&sym(AAPL)).await.unwrap(), vec![1, 2]);
}
