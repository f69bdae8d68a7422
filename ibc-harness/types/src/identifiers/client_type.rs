//! Defines the `ClientType` tag the handler registers light clients under,
//! and the light client variants this harness knows how to deploy.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::error::IdentifierError;
use crate::record::RoleKey;
use crate::validate::validate_client_type;

pub const IBFT2_CLIENT_TYPE: &str = "hb-ibft2";
pub const QBFT_CLIENT_TYPE: &str = "hb-qbft";

/// Type of the client, depending on the specific consensus algorithm.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct ClientType(String);

impl ClientType {
    /// Constructs a new `ClientType` from the given `str` if it forms a valid
    /// client id prefix.
    pub fn new(client_type: &str) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type).map(|()| Self(client_type.into()))
    }

    /// Yields this identifier as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientType {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ClientType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Light client implementations for Hyperledger Besu consensus.
///
/// Each variant fixes the type tag the client is registered under, the
/// artifact that is deployed for it and the key its address is recorded under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClientVariant {
    #[default]
    Ibft2,
    Qbft,
}

impl ClientVariant {
    pub const ALL: [ClientVariant; 2] = [ClientVariant::Ibft2, ClientVariant::Qbft];

    /// Infallible creation of the client type tag of this variant.
    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Ibft2 => ClientType(IBFT2_CLIENT_TYPE.to_string()),
            Self::Qbft => ClientType(QBFT_CLIENT_TYPE.to_string()),
        }
    }

    /// Name of the compiled light client contract.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Self::Ibft2 => "IBFT2Client",
            Self::Qbft => "QBFTClient",
        }
    }

    /// Key the deployed client address is recorded under.
    pub fn role_key(&self) -> RoleKey {
        match self {
            Self::Ibft2 => RoleKey::ibft2_client(),
            Self::Qbft => RoleKey::qbft_client(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ibft2 => "ibft2",
            Self::Qbft => "qbft",
        }
    }
}

impl Display for ClientVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientVariant {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IdentifierError::UnknownVariant {
                kind: "client variant",
                value: s.to_string(),
                expected: "ibft2, qbft",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_type_trims_whitespace() {
        let client_type = ClientType::new("  hb-ibft2 ").expect("valid client type");
        assert_eq!(client_type.as_str(), "hb-ibft2");
    }

    #[test]
    fn client_variants_are_self_consistent() {
        for variant in ClientVariant::ALL {
            let parsed = ClientType::new(variant.client_type().as_str());
            assert_eq!(parsed, Ok(variant.client_type()));
            assert_eq!(variant.as_str().parse::<ClientVariant>(), Ok(variant));
        }
        assert_eq!(ClientVariant::Ibft2.role_key().as_str(), "IBFT2_CLIENT");
        assert_eq!(ClientVariant::Qbft.role_key().as_str(), "QBFT_CLIENT");
    }

    #[test]
    fn unknown_client_variant() {
        assert!(matches!(
            "tendermint".parse::<ClientVariant>(),
            Err(IdentifierError::UnknownVariant { .. })
        ));
    }
}
