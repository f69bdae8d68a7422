//! Defines identifier types

mod channel_id;
mod client_type;
mod network;
mod port_id;

pub(crate) use channel_id::CHANNEL_PREFIX;
pub use channel_id::ChannelId;
pub use client_type::{ClientType, ClientVariant};
pub use network::NetworkName;
pub use port_id::PortId;

/// Implements the string accessors and parsing shared by identifiers that
/// wrap a validated `String`. `$validate` is run on every parse.
macro_rules! impl_validated_identifier {
    ($id:ident, $validate:path) => {
        impl $id {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $id {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl core::str::FromStr for $id {
            type Err = $crate::error::IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $validate(s).map(|()| Self(s.to_string()))
            }
        }

        impl AsRef<str> for $id {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $id {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

pub(crate) use impl_validated_identifier;
