use std::sync::Arc;

use quantdash::Dashboard;
use quantdash_core::{DashError, IndicatorConfig};
use quantdash_mock::{DynamicMockConnector, MockBehavior, MockConnector};

use crate::helpers::{AAPL, sym, year_2024};

#[tokio::test]
async fn not_found_everywhere_collapses_to_not_found() {
    let (a, _ca) = DynamicMockConnector::new_with_controller("a");
    let dash = Dashboard::builder()
        .with_connector(a)
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let err = dash.history(&sym("ZZZZ"), year_2024()).await.unwrap_err();
    assert_eq!(err, DashError::not_found("history for ZZZZ"));
}

#[tokio::test]
async fn mixed_failures_are_aggregated() {
    let (a, ca) = DynamicMockConnector::new_with_controller("a");
    let (b, _cb) = DynamicMockConnector::new_with_controller("b");
    ca.set_info_behavior(sym(AAPL), MockBehavior::Fail(DashError::Other("boom".into())))
        .await;

    let dash = Dashboard::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    match dash.info(&sym(AAPL)).await.unwrap_err() {
        DashError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 2);
            assert_eq!(errs[0], DashError::connector("a", "unknown error: boom"));
            assert!(errs[1].is_not_found());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn capability_without_provider_is_unsupported() {
    let (a, ca) = DynamicMockConnector::new_with_controller("a");
    let dash = Dashboard::builder().with_connector(a).build().unwrap();

    let err = dash.statements(&sym(AAPL), false).await.unwrap_err();
    assert_eq!(err, DashError::unsupported("statements"));
    assert!(ca.calls().await.is_empty());
}

#[test]
fn builder_rejects_empty_and_inconsistent_setups() {
    assert!(matches!(
        Dashboard::builder().build(),
        Err(DashError::InvalidArg(_))
    ));
    let bad = IndicatorConfig::default().short_window(60);
    assert!(matches!(
        Dashboard::builder()
            .with_connector(Arc::new(MockConnector::new()))
            .indicators(bad)
            .build(),
        Err(DashError::InvalidArg(_))
    ));
}
