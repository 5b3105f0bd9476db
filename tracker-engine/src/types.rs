//! Core types shared across the tracking-list engine
//!
//! Engine operations (merge, split, navigation) report failure through
//! boolean or `Option` outcomes and never mutate state on failure; the
//! error enum below only covers configuration and persistence plumbing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while configuring the engine or moving its state
/// through a persistence store
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("saved state too small: expected {expected} bytes, got {actual}")]
    StateTooSmall { expected: usize, actual: usize },

    #[error("no saved state under key {0}")]
    MissingState(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interaction mode of the tracking list
///
/// The mode gates what the selection gesture means: in `Normal` it toggles
/// which node accrues wall-clock time, in `BuildBreak` it drives the
/// pairing engine, and in `Freeze` accrual is suspended so times can be
/// edited manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    BuildBreak,
    Freeze,
}

impl Mode {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Mode::Normal => 0,
            Mode::BuildBreak => 1,
            Mode::Freeze => 2,
        }
    }

    /// Unknown bytes decode as `Normal`
    pub(crate) fn from_byte(byte: u8) -> Mode {
        match byte {
            1 => Mode::BuildBreak,
            2 => Mode::Freeze,
            _ => Mode::Normal,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::BuildBreak => write!(f, "build-break"),
            Mode::Freeze => write!(f, "freeze"),
        }
    }
}

/// Persisted form of "no index"
pub(crate) const NONE_INDEX: i8 = -1;

/// Cursor to its 1-byte persisted form. Indices must fit in [0, 127];
/// keeping the list that small is a configuration obligation.
pub(crate) fn index_to_byte(index: Option<usize>) -> i8 {
    match index {
        Some(i) => i as i8,
        None => NONE_INDEX,
    }
}

/// Persisted byte back to a cursor. Negative or out-of-range values are
/// treated as unset.
pub(crate) fn index_from_byte(byte: i8, len: usize) -> Option<usize> {
    if byte < 0 {
        return None;
    }
    let index = byte as usize;
    if index < len {
        Some(index)
    } else {
        None
    }
}
