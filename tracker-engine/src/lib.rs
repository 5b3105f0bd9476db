//! Activity Tracker Engine Library
//!
//! A self-contained engine for tracking elapsed time across a small set of
//! named activities. Adjacent activities can be merged into composite
//! "pair" entries (and split back apart, with the time accrued while
//! merged redistributed by priority), a cursor/mode state machine drives
//! navigation, and the full list state round-trips through a fixed-layout
//! binary codec.
//!
//! # Architecture
//!
//! The engine is intentionally free of any presentation concerns:
//! - [`TrackNode`]: the atomic/composite time-bearing entity
//! - [`PairCatalog`]: which adjacent names may merge, and into what
//! - [`TrackingList`]: the controller, holding the ordered top-level
//!   sequence, selection/active cursors, mode machine, accrual,
//!   merge/split orchestration and the binary codec
//! - [`StateStore`]: the byte-array get/set contract persistence runs
//!   through ([`MemoryStore`], [`FileStore`])
//!
//! The engine does NOT:
//! - Render anything or read input devices
//! - Talk to a companion device (configuration is handed in wholesale as
//!   a [`TrackerConfig`])
//! - Schedule its own clock: real time only enters through explicit
//!   [`TrackingList::update_accrual`] calls driven by external ticks
//!
//! # Example Usage
//!
//! ```
//! use tracker_engine::{Mode, TrackerConfig, TrackingList};
//!
//! let config = TrackerConfig::default();
//! let mut list = TrackingList::from_config(&config).unwrap();
//!
//! // select the first activity and start tracking it
//! list.move_next(1);
//! list.toggle_active(1_000);
//! assert_eq!(list.update_accrual(1_060), Some(60));
//!
//! // merge "hard" + "simple" into "work", then break it apart again
//! list.set_mode(Mode::BuildBreak, 1_060);
//! assert!(list.merge_from_active());
//! assert_eq!(list.node(0).map(|n| n.name()), Some("work"));
//! assert!(list.split_selection_or_active());
//! assert_eq!(list.total_time(false), 60);
//! ```

// Public modules
pub mod catalog;
pub mod codec;
pub mod config;
pub mod list;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use catalog::PairCatalog;
pub use codec::{HEADER_SIZE, MARK_CLOSE, MARK_CONTINUE, RECORD_SIZE};
pub use config::{ActivityDef, PairDef, TrackerConfig};
pub use list::TrackingList;
pub use node::TrackNode;
pub use store::{load_state, save_state, FileStore, MemoryStore, StateStore, STATE_KEY};
pub use types::{Mode, Result, TrackerError};

// Internal modules
mod pairing;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a default-configured engine is ready to use
        let list = TrackingList::from_config(&TrackerConfig::default()).unwrap();
        assert_eq!(list.len(), 6);
        assert_eq!(list.mode(), Mode::Normal);
        assert_eq!(list.binary_size(), 41);
    }
}
