//! The tracking list controller
//!
//! Owns the ordered top-level node sequence and all navigation/accrual
//! state, and orchestrates the pairing engine. One instance exists per
//! configuration; it is owned by the caller and passed into every
//! operation. Every operation runs synchronously to completion; real
//! elapsed time only enters the model through [`TrackingList::update_accrual`].

use crate::catalog::PairCatalog;
use crate::node::TrackNode;
use crate::pairing;
use crate::types::Mode;

/// Ordered sequence of top-level tracking nodes plus cursors, mode and the
/// accumulated time pool
///
/// Insertion order is semantic: it is the display and navigation order.
/// The three cursors are always either unset or valid indices into the
/// sequence; structural changes (merge/split) fix them up.
#[derive(Debug, Clone)]
pub struct TrackingList {
    pub(crate) nodes: Vec<TrackNode>,
    pub(crate) catalog: PairCatalog,
    pub(crate) mode: Mode,
    pub(crate) selected: Option<usize>,
    pub(crate) active: Option<usize>,
    pub(crate) previous_active: Option<usize>,
    /// Instant of the last accrual flush, in epoch seconds. Persisted as a
    /// signed 32-bit value, so it must stay within that range.
    pub(crate) last_timestamp: Option<i64>,
    /// Time pool decoupled from any node, fed by reset operations
    pub(crate) accumulated_time: i32,
    pub(crate) total_hours_goal: i32,
    pub(crate) total_acc_hours_goal: i32,
}

impl TrackingList {
    /// Create a list over the given leaves and catalog with the default
    /// goal hours
    pub fn new(nodes: Vec<TrackNode>, catalog: PairCatalog) -> TrackingList {
        TrackingList::with_goals(nodes, catalog, 8, 40)
    }

    /// Create a list with explicit goal-hour settings
    pub fn with_goals(
        nodes: Vec<TrackNode>,
        catalog: PairCatalog,
        total_hours_goal: i32,
        total_acc_hours_goal: i32,
    ) -> TrackingList {
        TrackingList {
            nodes,
            catalog,
            mode: Mode::Normal,
            selected: None,
            active: None,
            previous_active: None,
            last_timestamp: None,
            accumulated_time: 0,
            total_hours_goal,
            total_acc_hours_goal,
        }
    }

    // ----- read access -------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn previous_active_index(&self) -> Option<usize> {
        self.previous_active
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    pub fn accumulated_time(&self) -> i32 {
        self.accumulated_time
    }

    /// Daily goal hours; stored for external notification logic only
    pub fn total_hours_goal(&self) -> i32 {
        self.total_hours_goal
    }

    /// Accumulated goal hours; stored for external notification logic only
    pub fn total_acc_hours_goal(&self) -> i32 {
        self.total_acc_hours_goal
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&TrackNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[TrackNode] {
        &self.nodes
    }

    pub fn catalog(&self) -> &PairCatalog {
        &self.catalog
    }

    /// Number of leaves across all top-level nodes
    pub fn total_height(&self) -> usize {
        self.nodes.iter().map(TrackNode::height).sum()
    }

    /// Sum of all top-level node times, optionally plus the accumulated
    /// pool
    pub fn total_time(&self, include_accumulated: bool) -> i32 {
        let total: i32 = self.nodes.iter().map(TrackNode::time).sum();
        if include_accumulated {
            total + self.accumulated_time
        } else {
            total
        }
    }

    // ----- time accrual ------------------------------------------------

    /// Fold wall-clock time since the last flush into the active node
    ///
    /// Accrual applies only in `Normal` mode with an active node and an
    /// established baseline; the baseline timestamp is re-stamped
    /// unconditionally. Returns the active node's new time when accrual
    /// applied, `None` otherwise. This must be called on every external
    /// tick and immediately before every mode or active-node switch, or
    /// elapsed time is silently lost.
    pub fn update_accrual(&mut self, now: i64) -> Option<i32> {
        let mut new_time = None;
        if self.mode == Mode::Normal {
            if let (Some(last), Some(index)) = (self.last_timestamp, self.active) {
                if let Some(node) = self.nodes.get_mut(index) {
                    node.add_time((now - last) as i32);
                    new_time = Some(node.time());
                }
            }
        }
        self.last_timestamp = Some(now);
        new_time
    }

    /// Switch modes, flushing pending accrual first so no elapsed time
    /// leaks across the transition
    pub fn set_mode(&mut self, mode: Mode, now: i64) {
        self.update_accrual(now);
        log::debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    // ----- navigation --------------------------------------------------

    /// Step the selection cursor forward circularly, one position at a
    /// time; an unset cursor enters at the first entry. Clears the
    /// previous-active slot. Fails without state change on an empty list.
    pub fn move_next(&mut self, steps: usize) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        self.previous_active = None;
        for _ in 0..steps {
            self.selected = match self.selected {
                Some(index) if index + 1 < self.nodes.len() => Some(index + 1),
                _ => Some(0),
            };
        }
        true
    }

    /// Step the selection cursor backward circularly; an unset cursor
    /// enters at the last entry. Clears the previous-active slot. Fails
    /// without state change on an empty list.
    pub fn move_prev(&mut self, steps: usize) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        self.previous_active = None;
        for _ in 0..steps {
            self.selected = match self.selected {
                Some(index) if index > 0 => Some(index - 1),
                _ => Some(self.nodes.len() - 1),
            };
        }
        true
    }

    /// Act on the selected node according to the current mode
    ///
    /// `Normal`: flush accrual, then make the selection the active node,
    /// demoting the previous one, or stop tracking entirely when the
    /// selection already is active. `BuildBreak`: clicking the anchored
    /// node clears the anchor; clicking one of its direct neighbors
    /// attempts a merge; anywhere else (or after a failed merge) the
    /// click re-anchors. `Freeze` ignores the gesture, as does any mode
    /// without a selection.
    pub fn toggle_active(&mut self, now: i64) -> bool {
        let selected = match self.selected {
            Some(index) => index,
            None => return false,
        };
        match self.mode {
            Mode::Normal => {
                self.update_accrual(now);
                if self.active == Some(selected) {
                    self.active = None;
                    self.previous_active = None;
                } else {
                    self.previous_active = self.active;
                    self.active = Some(selected);
                }
                true
            }
            Mode::BuildBreak => {
                if self.active == Some(selected) {
                    self.active = None;
                    return true;
                }
                let merged = match self.active {
                    Some(anchor) if anchor.abs_diff(selected) == 1 => {
                        self.merge_at(anchor.min(selected))
                    }
                    _ => false,
                };
                if !merged {
                    self.active = Some(selected);
                }
                true
            }
            Mode::Freeze => false,
        }
    }

    /// Swap the active and previous-active slots and move the selection
    /// to the restored node
    pub fn restore_previous_active(&mut self) {
        std::mem::swap(&mut self.active, &mut self.previous_active);
        self.selected = self.active;
    }

    /// Move the selection onto the active node, if any
    pub fn select_active(&mut self) {
        if self.active.is_some() {
            self.selected = self.active;
        }
    }

    /// Clear the selection and the previous-active slot; the active node
    /// keeps accruing
    pub fn reset_selection(&mut self) {
        self.previous_active = None;
        self.selected = None;
    }

    // ----- manual time edits -------------------------------------------

    /// Apply a manual time edit of `value` seconds (negative to subtract)
    ///
    /// With a selection, the selected node takes the edit floored at zero
    /// and a *different* active node gives the same amount back (borrowing
    /// from the running activity, as used in freeze mode). With no
    /// selection the edit lands on the accumulated pool instead.
    pub fn add_delta(&mut self, value: i32) {
        match self.selected {
            Some(selected) => {
                if let Some(node) = self.nodes.get_mut(selected) {
                    node.set_time((node.time() + value).max(0));
                }
                if let Some(active) = self.active {
                    if active != selected {
                        if let Some(node) = self.nodes.get_mut(active) {
                            node.set_time((node.time() - value).max(0));
                        }
                    }
                }
            }
            None => {
                self.accumulated_time = (self.accumulated_time + value).max(0);
            }
        }
    }

    /// Zero the selected node's time, or the accumulated pool when
    /// nothing is selected
    pub fn reset_selected_time(&mut self) {
        match self.selected {
            Some(index) => {
                if let Some(node) = self.nodes.get_mut(index) {
                    node.set_time(0);
                }
            }
            None => self.accumulated_time = 0,
        }
    }

    /// Zero every top-level node's time
    ///
    /// Without `also_reset_accumulated` the pre-reset top-level total is
    /// folded into the accumulated pool first, so nothing is lost. Only
    /// top-level nodes are zeroed; stale child times inside pairs are
    /// corrected by split redistribution.
    pub fn reset_time(&mut self, also_reset_accumulated: bool) {
        if also_reset_accumulated {
            self.accumulated_time = 0;
        } else {
            self.accumulated_time += self.total_time(false);
        }
        for node in &mut self.nodes {
            node.set_time(0);
        }
    }

    // ----- pairing orchestration ---------------------------------------

    /// Merge the node at `index` with its right neighbor if the catalog
    /// allows; cursors pointing into the merged span land on the result
    pub fn merge_at(&mut self, index: usize) -> bool {
        if pairing::merge_at(&mut self.nodes, &self.catalog, index) {
            self.fix_cursors_after_merge(index);
            true
        } else {
            false
        }
    }

    /// Merge around the active node, or sweep once without one
    ///
    /// With an active node: try its left neighbor first, then its right
    /// neighbor if that failed; on success the active cursor ends on the
    /// merge result. With none: exactly one left-to-right sweep against
    /// the mutating sequence. That is a single pass, not a fixpoint: a
    /// merge at position `i` consumes the operand the next position would
    /// have used.
    pub fn merge_from_active(&mut self) -> bool {
        match self.active {
            None => {
                let mut index = 0;
                while index + 1 < self.nodes.len() {
                    self.merge_at(index);
                    index += 1;
                }
                true
            }
            Some(index) => {
                let mut merged = false;
                if index > 0 {
                    merged = self.merge_at(index - 1);
                }
                if !merged && index + 1 < self.nodes.len() {
                    merged = self.merge_at(index);
                }
                merged
            }
        }
    }

    /// Collapse everything the catalog can build: at each position, merge
    /// repeatedly until it fails before advancing (a per-position
    /// fixpoint, unlike the single pass of [`merge_from_active`]).
    /// Clears the active cursor.
    pub fn merge_all(&mut self) -> bool {
        let mut index = 0;
        while index + 1 < self.nodes.len() {
            while self.merge_at(index) {}
            index += 1;
        }
        self.active = None;
        true
    }

    /// Split the pair at `index`; cursors past it shift right
    pub fn split_at(&mut self, index: usize) -> bool {
        if pairing::split_at(&mut self.nodes, index) {
            self.fix_cursors_after_split(index);
            true
        } else {
            false
        }
    }

    /// Split the selected node, else the active node, else sweep the
    /// whole list one level
    ///
    /// The sweep skips over the two children of each successful split, so
    /// a single call unwraps at most one nesting level per position.
    pub fn split_selection_or_active(&mut self) -> bool {
        if let Some(index) = self.selected {
            return self.split_at(index);
        }
        if let Some(index) = self.active {
            return self.split_at(index);
        }
        let mut index = 0;
        while index < self.nodes.len() {
            if self.split_at(index) {
                index += 1;
            }
            index += 1;
        }
        true
    }

    /// Flatten every top-level node down to leaves
    pub fn split_all(&mut self) -> bool {
        let mut index = 0;
        while index < self.nodes.len() {
            while self.split_at(index) {}
            index += 1;
        }
        true
    }

    // ----- cursor maintenance ------------------------------------------

    fn fix_cursors_after_merge(&mut self, index: usize) {
        for cursor in [
            &mut self.selected,
            &mut self.active,
            &mut self.previous_active,
        ] {
            if let Some(at) = *cursor {
                if at == index + 1 {
                    *cursor = Some(index);
                } else if at > index + 1 {
                    *cursor = Some(at - 1);
                }
            }
        }
    }

    fn fix_cursors_after_split(&mut self, index: usize) {
        for cursor in [
            &mut self.selected,
            &mut self.active,
            &mut self.previous_active,
        ] {
            if let Some(at) = *cursor {
                if at > index {
                    *cursor = Some(at + 1);
                }
            }
        }
    }
}
