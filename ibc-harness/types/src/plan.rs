//! Deployment plans: which logic modules the IBC handler is assembled from.
//!
//! The handler receives its logic modules as positional constructor
//! arguments and delegates to them by position, never by name. Every
//! [`LogicModule`] therefore owns a fixed slot, and a [`DeploymentPlan`] can
//! only be built from modules listed in slot order. The check runs in a
//! `const fn`, so a reordered plan constant fails to compile.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::error::IdentifierError;

/// Artifact name of the aggregating handler contract.
pub const HANDLER_ARTIFACT: &str = "OwnableIBCHandler";

/// Logic modules of the IBC handler, declared in handler constructor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicModule {
    Client,
    ConnectionSelfStateNoValidation,
    ChannelHandshake,
    ChannelPacketSendRecv,
    ChannelPacketTimeout,
    ChannelUpgradeInitTryAck,
    ChannelUpgradeConfirmOpenTimeoutCancel,
}

impl LogicModule {
    pub const ALL: [LogicModule; 7] = [
        LogicModule::Client,
        LogicModule::ConnectionSelfStateNoValidation,
        LogicModule::ChannelHandshake,
        LogicModule::ChannelPacketSendRecv,
        LogicModule::ChannelPacketTimeout,
        LogicModule::ChannelUpgradeInitTryAck,
        LogicModule::ChannelUpgradeConfirmOpenTimeoutCancel,
    ];

    /// Position of this module's address in the handler constructor.
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Name of the compiled contract implementing this module.
    pub const fn artifact_name(self) -> &'static str {
        match self {
            Self::Client => "IBCClient",
            Self::ConnectionSelfStateNoValidation => "IBCConnectionSelfStateNoValidation",
            Self::ChannelHandshake => "IBCChannelHandshake",
            Self::ChannelPacketSendRecv => "IBCChannelPacketSendRecv",
            Self::ChannelPacketTimeout => "IBCChannelPacketTimeout",
            Self::ChannelUpgradeInitTryAck => "IBCChannelUpgradeInitTryAck",
            Self::ChannelUpgradeConfirmOpenTimeoutCancel => {
                "IBCChannelUpgradeConfirmOpenTimeoutCancel"
            }
        }
    }

    pub fn from_artifact_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|module| module.artifact_name() == name)
    }
}

impl Display for LogicModule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.artifact_name())
    }
}

/// A named, ordered set of logic modules to build a handler from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeploymentPlan {
    name: &'static str,
    modules: &'static [LogicModule],
}

impl DeploymentPlan {
    /// Client, connection and channel handshakes plus packet send, receive and
    /// timeout.
    pub const MINIMAL: Self = Self::new(
        "minimal",
        &[
            LogicModule::Client,
            LogicModule::ConnectionSelfStateNoValidation,
            LogicModule::ChannelHandshake,
            LogicModule::ChannelPacketSendRecv,
            LogicModule::ChannelPacketTimeout,
        ],
    );

    /// The minimal plan plus the channel upgrade lifecycle.
    pub const EXTENDED: Self = Self::new("extended", &LogicModule::ALL);

    pub const ALL: [DeploymentPlan; 2] = [Self::MINIMAL, Self::EXTENDED];

    /// Builds a plan. Panics, at compile time for constants, unless the i-th
    /// module is the one occupying handler slot i.
    pub const fn new(name: &'static str, modules: &'static [LogicModule]) -> Self {
        assert!(!modules.is_empty(), "a deployment plan needs logic modules");

        let mut i = 0;
        while i < modules.len() {
            assert!(
                modules[i].slot() == i,
                "logic modules must be listed in handler slot order"
            );
            i += 1;
        }

        Self { name, modules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn modules(&self) -> &'static [LogicModule] {
        self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LogicModule> + 'static {
        self.modules.iter().copied()
    }
}

impl Default for DeploymentPlan {
    fn default() -> Self {
        Self::MINIMAL
    }
}

impl Display for DeploymentPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.name)
    }
}

impl FromStr for DeploymentPlan {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IdentifierError::UnknownVariant {
                kind: "deployment plan",
                value: s.to_string(),
                expected: "minimal, extended",
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DeploymentPlan::MINIMAL, 5)]
    #[case(DeploymentPlan::EXTENDED, 7)]
    fn plans_follow_handler_slots(#[case] plan: DeploymentPlan, #[case] len: usize) {
        assert_eq!(plan.len(), len);
        for (i, module) in plan.iter().enumerate() {
            assert_eq!(module.slot(), i);
        }
    }

    #[test]
    fn extended_plan_extends_minimal_plan() {
        let minimal = DeploymentPlan::MINIMAL.modules();
        let extended = DeploymentPlan::EXTENDED.modules();
        assert_eq!(&extended[..minimal.len()], minimal);
        assert_eq!(
            &extended[minimal.len()..],
            &[
                LogicModule::ChannelUpgradeInitTryAck,
                LogicModule::ChannelUpgradeConfirmOpenTimeoutCancel
            ]
        );
    }

    #[test]
    fn artifact_names_round_trip() {
        for module in LogicModule::ALL {
            assert_eq!(
                LogicModule::from_artifact_name(module.artifact_name()),
                Some(module)
            );
        }
        assert_eq!(LogicModule::from_artifact_name(HANDLER_ARTIFACT), None);
    }

    #[test]
    #[should_panic(expected = "handler slot order")]
    fn out_of_order_plan_is_rejected() {
        let _ = DeploymentPlan::new(
            "swapped",
            &[LogicModule::ConnectionSelfStateNoValidation, LogicModule::Client],
        );
    }

    #[test]
    fn parse_plan_names() {
        assert_eq!("minimal".parse::<DeploymentPlan>(), Ok(DeploymentPlan::MINIMAL));
        assert_eq!("Extended".parse::<DeploymentPlan>(), Ok(DeploymentPlan::EXTENDED));
        assert!("full".parse::<DeploymentPlan>().is_err());
    }
}
