//! Fixed-layout binary persistence codec
//!
//! Layout, native byte order of the target platform:
//! - Byte 0: mode
//! - Byte 1: selected index (signed 8-bit, -1 = none)
//! - Byte 2: active index (signed 8-bit, -1 = none)
//! - Bytes 3-6: last flush timestamp (signed seconds, -1 = none)
//! - Bytes 7-10: accumulated time pool (signed seconds)
//! - Body: one 5-byte record per leaf in flattened left-to-right order:
//!   4-byte signed time + 1 marker byte (`,` continue, `)` group close)
//!
//! Total size is `11 + 5 * leaf count`. Encoding works on a disposable
//! copy of the node tree, so the live structure is untouched; callers
//! wanting the legacy flatten-on-save behavior invoke
//! [`TrackingList::split_all`] themselves.

use byteorder::{ByteOrder, NativeEndian};

use crate::list::TrackingList;
use crate::pairing;
use crate::types::{self, Mode, Result, TrackerError};

/// Fixed header size in bytes
pub const HEADER_SIZE: usize = 11;
/// Bytes per leaf record
pub const RECORD_SIZE: usize = 5;
/// Marker: another leaf record follows at the next cursor position
pub const MARK_CONTINUE: u8 = b',';
/// Marker: last leaf of a group that was merged when the state was saved
pub const MARK_CLOSE: u8 = b')';

impl TrackingList {
    /// Exact size of the encoded state in bytes
    pub fn binary_size(&self) -> usize {
        HEADER_SIZE + RECORD_SIZE * self.total_height()
    }

    /// Encode the full list state
    ///
    /// A copy of the node tree is flattened with the regular split
    /// primitive (so persisted leaf times are the values after drift
    /// redistribution) while group-close markers record where merged
    /// groups ended: before each split of the node at position `i`, the
    /// record at index `i + height - 1` is marked.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.binary_size()];
        buf[0] = self.mode.to_byte();
        buf[1] = types::index_to_byte(self.selected) as u8;
        buf[2] = types::index_to_byte(self.active) as u8;
        NativeEndian::write_i32(
            &mut buf[3..7],
            self.last_timestamp.map(|t| t as i32).unwrap_or(-1),
        );
        NativeEndian::write_i32(&mut buf[7..11], self.accumulated_time);

        let mut nodes = self.nodes.clone();
        let mut index = 0;
        while index < nodes.len() {
            while nodes[index].height() > 1 {
                let close_at = HEADER_SIZE + (index + nodes[index].height()) * RECORD_SIZE - 1;
                buf[close_at] = MARK_CLOSE;
                pairing::split_at(&mut nodes, index);
            }
            let offset = HEADER_SIZE + index * RECORD_SIZE;
            NativeEndian::write_i32(&mut buf[offset..offset + 4], nodes[index].time());
            if buf[offset + 4] != MARK_CLOSE {
                buf[offset + 4] = MARK_CONTINUE;
            }
            index += 1;
        }

        log::debug!(
            "encoded tracker state: {} bytes, {} leaf records",
            buf.len(),
            nodes.len()
        );
        buf
    }

    /// Decode persisted state into a list freshly built from the same
    /// configuration
    ///
    /// Leaf records are consumed against a cursor over the top-level
    /// sequence: each record sets the cursor node's time, a continue
    /// marker advances the cursor and a close marker replays one
    /// catalog-driven merge, greedily rebuilding the saved nesting left
    /// to right. The header is restored afterwards and the accrual
    /// baseline re-anchored at `now` (so time elapsed since the save is
    /// credited to the active node when accrual applies).
    ///
    /// Fails without touching header state if the buffer is smaller than
    /// [`binary_size`](TrackingList::binary_size); callers treat that as
    /// "no saved state".
    pub fn decode(&mut self, bytes: &[u8], now: i64) -> Result<()> {
        let expected = self.binary_size();
        if bytes.len() < expected {
            return Err(TrackerError::StateTooSmall {
                expected,
                actual: bytes.len(),
            });
        }

        let mut cursor = 0;
        let mut record = 0;
        while cursor < self.nodes.len() {
            let offset = HEADER_SIZE + record * RECORD_SIZE;
            if offset + RECORD_SIZE > bytes.len() {
                break;
            }
            self.nodes[cursor].set_time(NativeEndian::read_i32(&bytes[offset..offset + 4]));
            if bytes[offset + 4] == MARK_CONTINUE {
                cursor += 1;
            } else if cursor > 0 {
                // a catalog mismatch (stale snapshot against a newer
                // configuration) leaves the cursor in place and the next
                // record overwrites the same slot
                pairing::merge_at(&mut self.nodes, &self.catalog, cursor - 1);
            }
            record += 1;
        }

        let len = self.nodes.len();
        self.mode = Mode::from_byte(bytes[0]);
        self.selected = types::index_from_byte(bytes[1] as i8, len);
        self.active = types::index_from_byte(bytes[2] as i8, len);
        self.previous_active = None;
        self.last_timestamp = match NativeEndian::read_i32(&bytes[3..7]) {
            -1 => None,
            stamp => Some(i64::from(stamp)),
        };
        self.accumulated_time = NativeEndian::read_i32(&bytes[7..11]);
        log::debug!(
            "decoded tracker state: mode={} selected={:?} active={:?}",
            self.mode,
            self.selected,
            self.active
        );
        self.update_accrual(now);
        Ok(())
    }
}
