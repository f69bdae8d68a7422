//! Defines the packet a harness invocation asks an application to send.

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::error::PacketError;
use crate::identifiers::{ChannelId, PortId};
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Everything the application's `sendPacket` needs: payload, source
/// addressing and timeouts. The destination side is resolved on chain from the
/// channel end, and the sequence is assigned by the handler.
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct PacketDescriptor {
    pub payload: Vec<u8>,
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub timeout_height: TimeoutHeight,
    pub timeout_timestamp: TimeoutTimestamp,
}

impl PacketDescriptor {
    /// Builds the packet the `send-packet` command dispatches: the message is
    /// sent as its UTF-8 bytes, the timeout height is on revision `0` and the
    /// timeout timestamp is disabled.
    pub fn from_message(
        message: &str,
        source_port: PortId,
        source_channel: ChannelId,
        timeout_revision_height: u64,
    ) -> Self {
        Self {
            payload: message.as_bytes().to_vec(),
            source_port,
            source_channel,
            timeout_height: TimeoutHeight::at_revision_height(timeout_revision_height),
            timeout_timestamp: TimeoutTimestamp::no_timeout(),
        }
    }

    /// Rejects packets the handler is bound to refuse, before paying for a
    /// transaction that would revert.
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        if !self.timeout_height.is_set() && !self.timeout_timestamp.is_set() {
            return Err(PacketError::MissingTimeout);
        }
        Ok(())
    }
}

struct PacketData<'a>(&'a [u8]);

impl<'a> core::fmt::Debug for PacketData<'a> {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "{:?}", self.0)
    }
}

impl core::fmt::Debug for PacketDescriptor {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Remember: if you alter the definition of `PacketDescriptor`,
        // 1. update the formatter debug struct builder calls (return object of
        //    this function)
        // 2. update this destructuring assignment accordingly
        let PacketDescriptor {
            payload: _,
            source_port: _,
            source_channel: _,
            timeout_height: _,
            timeout_timestamp: _,
        } = self;

        formatter
            .debug_struct("PacketDescriptor")
            .field("payload", &PacketData(&self.payload))
            .field("source_port", &self.source_port)
            .field("source_channel", &self.source_channel)
            .field("timeout_height", &self.timeout_height)
            .field("timeout_timestamp", &self.timeout_timestamp)
            .finish()
    }
}

impl Display for PacketDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "payload: {}, source: {}/{}, timeout height: {:?}, timeout timestamp: {}",
            String::from_utf8_lossy(&self.payload),
            self.source_port,
            self.source_channel,
            self.timeout_height.revision_pair(),
            self.timeout_timestamp.nanoseconds(),
        )
    }
}
