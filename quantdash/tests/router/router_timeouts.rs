use std::time::Duration;

use quantdash::Dashboard;
use quantdash_core::{DashError, PriceHistory};
use quantdash_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{AAPL, d, history_with_closes, req, sym};

#[tokio::test(start_paused = true)]
async fn hanging_provider_times_out_and_falls_back() {
    let (slow, c1) = DynamicMockConnector::new_with_controller("slow");
    let (fast, c2) = DynamicMockConnector::new_with_controller("fast");
    c1.set_history_behavior(sym(AAPL), MockBehavior::Hang).await;
    c2.set_history_behavior(
        sym(AAPL),
        MockBehavior::Return(history_with_closes(AAPL, d(2024, 3, 4), &[5.0, 6.0, 7.0])),
    )
    .await;

    let dash = Dashboard::builder()
        .with_connector(slow)
        .with_connector(fast)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let h = dash
        .history(&sym(AAPL), req(d(2024, 3, 1), d(2024, 4, 1)))
        .await
        .unwrap();
    assert_eq!(h.bars.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn all_hanging_providers_report_aggregate_timeout() {
    let (a, ca) = DynamicMockConnector::new_with_controller("a");
    let (b, cb) = DynamicMockConnector::new_with_controller("b");
    ca.set_history_behavior(sym(AAPL), MockBehavior::<PriceHistory>::Hang)
        .await;
    cb.set_history_behavior(sym(AAPL), MockBehavior::<PriceHistory>::Hang)
        .await;

    let dash = Dashboard::builder()
        .with_connector(a)
        .with_connector(b)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = dash
        .history(&sym(AAPL), req(d(2024, 3, 1), d(2024, 4, 1)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DashError::AllProvidersTimedOut {
            capability: "history"
        }
    );
    assert!(err.is_timeout());
}
