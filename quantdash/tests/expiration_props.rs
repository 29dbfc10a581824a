use proptest::prelude::*;
use quantdash::select_expiration;

fn arb_expirations() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(1_700_000_000i64..1_800_000_000, 0..12)
}

proptest! {
    #[test]
    fn selection_is_listed_or_none(exps in arb_expirations(), requested in proptest::option::of(1_700_000_000i64..1_800_000_000)) {
        match select_expiration(&exps, requested) {
            None => prop_assert!(exps.is_empty()),
            Some(sel) => prop_assert!(exps.contains(&sel)),
        }
    }

    #[test]
    fn listed_request_wins(exps in arb_expirations().prop_filter("non-empty", |v| !v.is_empty()), idx in any::<prop::sample::Index>()) {
        let wanted = exps[idx.index(exps.len())];
        prop_assert_eq!(select_expiration(&exps, Some(wanted)), Some(wanted));
    }

    #[test]
    fn unlisted_request_falls_back_to_first(exps in arb_expirations(), requested in 0i64..1_000) {
        prop_assert_eq!(select_expiration(&exps, Some(requested)), exps.first().copied());
        prop_assert_eq!(select_expiration(&exps, None), exps.first().copied());
    }
}
