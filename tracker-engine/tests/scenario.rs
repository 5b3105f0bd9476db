//! End-to-end exercise of the engine against an in-memory store:
//! a tracked morning, a merge, freeze-mode edits, persistence across two
//! restarts and a final reset into the accumulated pool.

use tracker_engine::{
    load_state, save_state, MemoryStore, Mode, StateStore, TrackerConfig, TrackingList,
};

#[test]
fn test_full_session_round_trip() {
    let config = TrackerConfig::default();
    let mut store = MemoryStore::new();

    let mut list = TrackingList::from_config(&config).unwrap();
    assert!(!load_state(&mut list, &store, 100).unwrap());

    // morning: track "hard" for ten minutes
    list.move_next(1);
    list.toggle_active(1_000);
    assert_eq!(list.update_accrual(1_600), Some(600));

    // merge the work block: anchor is still "hard", click "simple"
    list.set_mode(Mode::BuildBreak, 1_600);
    list.move_next(1);
    assert!(list.toggle_active(1_600));
    assert_eq!(list.node(0).map(|n| n.name()), Some("work"));
    assert_eq!(list.len(), 5);
    assert_eq!(list.total_time(false), 600);

    // the merged pair keeps accruing as a single entity
    list.set_mode(Mode::Normal, 1_600);
    assert_eq!(list.update_accrual(1_660), Some(660));

    // freeze and manually move a minute onto "education"
    list.set_mode(Mode::Freeze, 1_700); // flushes 40 more onto "work"
    list.move_next(1);
    list.add_delta(60);
    assert_eq!(list.node(1).map(|n| n.time()), Some(60));
    assert_eq!(list.node(0).map(|n| n.time()), Some(640));
    assert_eq!(list.total_time(true), 700);

    // end of day: back to normal, persist, power down
    list.set_mode(Mode::Normal, 1_800);
    save_state(&list, &mut store).unwrap();

    // next boot: fresh list from the same config, state restored; the
    // active pair survived and is credited for the offline time
    let mut restored = TrackingList::from_config(&config).unwrap();
    assert!(load_state(&mut restored, &store, 1_900).unwrap());
    assert_eq!(restored.len(), 5);
    assert_eq!(restored.node(0).map(|n| n.name()), Some("work"));
    assert_eq!(restored.node(0).map(|n| n.time()), Some(740));
    assert_eq!(restored.mode(), Mode::Normal);
    assert_eq!(restored.selected_index(), Some(1));
    assert_eq!(restored.active_index(), Some(0));
    assert_eq!(restored.total_time(true), 800);

    // break the pair: the 140 seconds of pair-level drift go to the
    // lagging child ("simple") since both children share a priority
    restored.reset_selection();
    restored.set_mode(Mode::BuildBreak, 1_900);
    assert!(restored.split_selection_or_active());
    assert_eq!(restored.len(), 6);
    assert_eq!(restored.node(0).map(|n| n.time()), Some(600));
    assert_eq!(restored.node(1).map(|n| n.time()), Some(140));
    assert_eq!(restored.total_time(true), 800);

    // wipe the day into the accumulated pool
    restored.set_mode(Mode::Normal, 2_000);
    restored.reset_time(false);
    assert_eq!(restored.total_time(false), 0);
    assert_eq!(restored.accumulated_time(), 800);
    save_state(&restored, &mut store).unwrap();

    // third boot, much later: only the still-active "hard" accrued
    let mut next_day = TrackingList::from_config(&config).unwrap();
    assert!(load_state(&mut next_day, &store, 3_000).unwrap());
    assert_eq!(next_day.total_time(false), 1_000);
    assert_eq!(next_day.total_time(true), 1_800);
    assert_eq!(next_day.accumulated_time(), 800);
}

#[test]
fn test_reconfiguration_discards_saved_state() {
    let config = TrackerConfig::default();
    let mut store = MemoryStore::new();

    let mut list = TrackingList::from_config(&config).unwrap();
    list.move_next(1);
    list.toggle_active(500);
    save_state(&list, &mut store).unwrap();

    // a configuration push replaces the list wholesale; the caller also
    // removes the now-stale snapshot
    let mut smaller = config.clone();
    smaller.activities.truncate(2);
    smaller.pairs.truncate(1);
    store.remove(tracker_engine::STATE_KEY).unwrap();

    let mut replacement = TrackingList::from_config(&smaller).unwrap();
    assert!(!load_state(&mut replacement, &store, 600).unwrap());
    assert_eq!(replacement.len(), 2);
    assert_eq!(replacement.total_time(true), 0);
}
