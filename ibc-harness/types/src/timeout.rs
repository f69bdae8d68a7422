//! Packet timeouts by destination height and destination timestamp.

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::height::Height;

/// Indicates a consensus height on the destination chain after which the packet
/// will no longer be processed, and will instead count as having timed-out.
///
/// On the wire a zero height means "no timeout"; the explicit `Never` variant
/// keeps that sentinel out of [`Height`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TimeoutHeight {
    Never,
    At(Height),
}

impl TimeoutHeight {
    /// Builds a timeout at `revision_height` on revision `0`, which is the only
    /// revision the local chains ever run. A zero height yields `Never`.
    pub fn at_revision_height(revision_height: u64) -> Self {
        match Height::new(0, revision_height) {
            Ok(height) => Self::At(height),
            Err(_) => Self::Never,
        }
    }

    /// Revision number and height as passed to the handler, with `Never`
    /// encoded as `(0, 0)`.
    pub fn revision_pair(&self) -> (u64, u64) {
        match self {
            Self::At(height) => (height.revision_number(), height.revision_height()),
            Self::Never => (0, 0),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }
}

impl Default for TimeoutHeight {
    fn default() -> Self {
        Self::Never
    }
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            TimeoutHeight::At(timeout_height) => write!(f, "{timeout_height}"),
            TimeoutHeight::Never => write!(f, "no timeout"),
        }
    }
}

/// Indicates a timestamp on the destination chain after which the packet will
/// no longer be processed, and will instead count as having timed-out.
///
/// Timestamps are u64 Unix timestamps in nanoseconds, where `0` means that the
/// timestamp is not set.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TimeoutTimestamp {
    Never,
    At(u64),
}

impl TimeoutTimestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Self {
        if nanoseconds == 0 {
            Self::Never
        } else {
            Self::At(nanoseconds)
        }
    }

    /// Returns the timestamp in nanoseconds, where 0 indicates the absence
    /// of a timeout.
    pub fn nanoseconds(&self) -> u64 {
        match self {
            Self::At(nanoseconds) => *nanoseconds,
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    pub fn no_timeout() -> Self {
        Self::Never
    }
}

impl Default for TimeoutTimestamp {
    fn default() -> Self {
        Self::Never
    }
}

impl Display for TimeoutTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            TimeoutTimestamp::At(nanoseconds) => write!(f, "{nanoseconds}ns"),
            TimeoutTimestamp::Never => write!(f, "no timeout timestamp"),
        }
    }
}
