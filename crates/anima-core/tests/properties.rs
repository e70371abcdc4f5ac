use anima_core::{WorldState, WorldValue};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = WorldValue> {
    prop_oneof![
        any::<bool>().prop_map(WorldValue::Bool),
        any::<i32>().prop_map(WorldValue::Int),
        "[a-c]{0,3}".prop_map(WorldValue::Text),
    ]
}

fn state() -> impl Strategy<Value = WorldState> {
    prop::collection::btree_map(0u8..16, value(), 0..8)
        .prop_map(|facts| facts.into_iter().collect())
}

fn same_kind(a: &WorldValue, b: &WorldValue) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(a in state()) {
        prop_assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn attribute_distance_symmetric_or_zero(a in value(), b in value()) {
        if same_kind(&a, &b) {
            prop_assert_eq!(a.distance(&b), b.distance(&a));
        } else {
            prop_assert_eq!(a.distance(&b), 0);
        }
    }

    #[test]
    fn goal_satisfies_itself(g in state()) {
        prop_assert!(g.satisfies(&g));
    }

    #[test]
    fn merge_never_drops_or_overwrites(private in state(), shared in state()) {
        let mut merged = private.clone();
        merged.merge_shared(&shared);
        for (key, value) in &private {
            prop_assert_eq!(merged.get(*key), Some(value));
        }
        for key in shared.keys() {
            prop_assert!(merged.contains(key));
        }
    }
}
