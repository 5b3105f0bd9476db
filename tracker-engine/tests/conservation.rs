//! Structural operations must conserve tracked time
//!
//! For any sequence of merge/split/navigation operations with no time
//! edits in between, the sum of all top-level node times plus the
//! accumulated pool is invariant, and the persisted form round-trips the
//! same total and top-level structure.

use proptest::prelude::*;

use tracker_engine::{Mode, TrackerConfig, TrackingList};

#[derive(Debug, Clone)]
enum StructuralOp {
    MergeAt(usize),
    SplitAt(usize),
    MergeFromActive,
    MergeAll,
    SplitSelectionOrActive,
    SplitAll,
    MoveNext(usize),
    MovePrev(usize),
    ResetSelection,
}

fn op_strategy() -> impl Strategy<Value = StructuralOp> {
    prop_oneof![
        (0usize..6).prop_map(StructuralOp::MergeAt),
        (0usize..6).prop_map(StructuralOp::SplitAt),
        Just(StructuralOp::MergeFromActive),
        Just(StructuralOp::MergeAll),
        Just(StructuralOp::SplitSelectionOrActive),
        Just(StructuralOp::SplitAll),
        (1usize..8).prop_map(StructuralOp::MoveNext),
        (1usize..8).prop_map(StructuralOp::MovePrev),
        Just(StructuralOp::ResetSelection),
    ]
}

fn apply(list: &mut TrackingList, op: &StructuralOp) {
    match op {
        StructuralOp::MergeAt(index) => {
            list.merge_at(*index);
        }
        StructuralOp::SplitAt(index) => {
            list.split_at(*index);
        }
        StructuralOp::MergeFromActive => {
            list.merge_from_active();
        }
        StructuralOp::MergeAll => {
            list.merge_all();
        }
        StructuralOp::SplitSelectionOrActive => {
            list.split_selection_or_active();
        }
        StructuralOp::SplitAll => {
            list.split_all();
        }
        StructuralOp::MoveNext(steps) => {
            list.move_next(*steps);
        }
        StructuralOp::MovePrev(steps) => {
            list.move_prev(*steps);
        }
        StructuralOp::ResetSelection => list.reset_selection(),
    }
}

/// Default configuration with the six leaf times and the pool seeded
/// through manual freeze-mode edits
fn seeded_list(times: &[i32; 6], pool: i32) -> TrackingList {
    let mut list = TrackingList::from_config(&TrackerConfig::default()).unwrap();
    list.set_mode(Mode::Freeze, 0);
    for seconds in times {
        list.move_next(1);
        list.add_delta(*seconds);
    }
    list.reset_selection();
    list.add_delta(pool);
    list
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_structural_ops_conserve_total_time(
        times in proptest::array::uniform6(0i32..10_000),
        pool in 0i32..5_000,
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let mut list = seeded_list(&times, pool);
        let expected = times.iter().sum::<i32>() + pool;
        prop_assert_eq!(list.total_time(true), expected);

        for op in &ops {
            apply(&mut list, op);
            prop_assert_eq!(list.total_time(true), expected);
            prop_assert_eq!(list.total_height(), 6);
        }
    }

    #[test]
    fn test_encode_decode_round_trips_structure(
        times in proptest::array::uniform6(0i32..10_000),
        pool in 0i32..5_000,
        ops in proptest::collection::vec(op_strategy(), 0..25),
    ) {
        let mut list = seeded_list(&times, pool);
        for op in &ops {
            apply(&mut list, op);
        }

        let bytes = list.encode();
        prop_assert_eq!(bytes.len(), list.binary_size());

        let mut restored = TrackingList::from_config(&TrackerConfig::default()).unwrap();
        restored.decode(&bytes, 0).unwrap();

        let top = |l: &TrackingList| -> Vec<(String, i32, usize)> {
            l.nodes()
                .iter()
                .map(|n| (n.name().to_owned(), n.time(), n.height()))
                .collect()
        };
        prop_assert_eq!(top(&restored), top(&list));
        prop_assert_eq!(restored.total_time(true), list.total_time(true));
        prop_assert_eq!(restored.mode(), list.mode());
        prop_assert_eq!(restored.selected_index(), list.selected_index());
        prop_assert_eq!(restored.active_index(), list.active_index());
    }
}
