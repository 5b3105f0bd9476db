//! Standalone engine walkthrough
//!
//! Simulates a tracked session against the built-in default configuration:
//! accrual on a selected activity, merging the work block, a freeze-mode
//! edit, and a persistence round trip through the in-memory store.
//!
//! Usage:
//!   cargo run --example simulate_session

use tracker_engine::{load_state, save_state, MemoryStore, Mode, TrackerConfig, TrackingList};

fn print_list(label: &str, list: &TrackingList) {
    println!("\n=== {label} ===");
    for (index, node) in list.nodes().iter().enumerate() {
        let active = if list.active_index() == Some(index) { "*" } else { " " };
        println!(
            "{active} {index} {:<14} {:>6}s (height {})",
            node.name(),
            node.time(),
            node.height()
        );
    }
    println!(
        "total {}s, pool {}s",
        list.total_time(false),
        list.accumulated_time()
    );
}

fn main() {
    env_logger::init();

    let config = TrackerConfig::default();
    let mut list = TrackingList::from_config(&config).expect("default config is valid");
    let mut now = 0i64;

    // track "hard" for ten minutes
    list.move_next(1);
    list.toggle_active(now);
    now += 600;
    list.update_accrual(now);
    print_list("after ten tracked minutes", &list);

    // merge "hard" with "simple" into "work" and keep tracking the pair
    list.set_mode(Mode::BuildBreak, now);
    list.move_next(1);
    list.toggle_active(now);
    list.set_mode(Mode::Normal, now);
    now += 300;
    list.update_accrual(now);
    print_list("after merging the work block", &list);

    // freeze and move a minute over to "education"
    list.set_mode(Mode::Freeze, now);
    list.move_next(1);
    list.add_delta(60);
    list.set_mode(Mode::Normal, now);
    print_list("after a freeze-mode edit", &list);

    // persist and restore into a freshly configured list
    let mut store = MemoryStore::new();
    save_state(&list, &mut store).expect("memory store never fails");
    let mut restored = TrackingList::from_config(&config).expect("default config is valid");
    load_state(&mut restored, &store, now).expect("snapshot was just written");
    print_list("after a persistence round trip", &restored);

    // break the pair apart again; drift flows back to the children
    restored.set_mode(Mode::BuildBreak, now);
    restored.reset_selection();
    restored.split_selection_or_active();
    print_list("after breaking the pair", &restored);
}
