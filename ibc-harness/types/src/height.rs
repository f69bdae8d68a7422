//! Defines the `Height` type used for packet timeouts.

use crate::error::HeightError;

/// The height of a chain as seen by IBC: a block number within a revision.
///
/// EVM chains driven by this harness never upgrade through revisions, so the
/// revision number is `0` everywhere in practice; it is kept so the value
/// encodes exactly like the handler's `Height.Data` struct.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Height {
    revision_number: u64,
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, HeightError> {
        if revision_height == 0 {
            return Err(HeightError::ZeroRevisionHeight);
        }

        Ok(Self {
            revision_number,
            revision_height,
        })
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }
}

impl core::fmt::Debug for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        f.debug_struct("Height")
            .field("revision", &self.revision_number)
            .field("height", &self.revision_height)
            .finish()
    }
}

impl core::fmt::Display for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}
