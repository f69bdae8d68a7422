use derive_more::Into;

use super::impl_validated_identifier;
use crate::validate::validate_channel_identifier;

/// Channels opened on the handler are named `channel-{N}`, with `N` taken from
/// the handler's channel counter.
pub(crate) const CHANNEL_PREFIX: &str = "channel";

/// Source channel a packet is sent on.
///
/// The harness never opens channels itself. A relayer runs the handshake, so
/// the id given here must name a channel that is already open on the handler.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
pub struct ChannelId(String);

impl ChannelId {
    /// ```
    /// # use ibc_harness_types::identifiers::ChannelId;
    /// assert_eq!(ChannelId::new(3).as_str(), "channel-3");
    /// ```
    pub fn new(counter: u64) -> Self {
        Self(format!("{CHANNEL_PREFIX}-{counter}"))
    }

    /// The first channel opened between two fresh handlers.
    pub fn zero() -> Self {
        Self::new(0)
    }
}

impl_validated_identifier!(ChannelId, validate_channel_identifier);
