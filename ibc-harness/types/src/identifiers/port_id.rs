use derive_more::Into;

use super::impl_validated_identifier;
use crate::validate::validate_port_identifier;

const MOCKAPP_PORT: &str = "mockapp";

/// Port an application module is bound to on the handler.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
pub struct PortId(String);

impl PortId {
    /// Port of the mock application deployed by the harness.
    pub fn mockapp() -> Self {
        Self(MOCKAPP_PORT.to_string())
    }
}

impl_validated_identifier!(PortId, validate_port_identifier);
