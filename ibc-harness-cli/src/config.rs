//! Harness configuration, read from an optional TOML file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use ibc_harness_rpc::wallet::{self, PrivateKeySigner};
use ibc_harness_rpc::ConfirmationPolicy;
use ibc_harness_types::identifiers::NetworkName;
use ibc_harness_types::Address;
use serde::Deserialize;

/// Mnemonic the local e2e Besu chains fund their accounts from.
const LOCAL_CHAIN_MNEMONIC: &str =
    "math razor capable expose worth grape metal sunset metal sudden usage scheme";

/// An EVM endpoint the harness can target.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub url: String,
    /// Account to sign with; defaults to the wallet account, then to the
    /// node's first account.
    #[serde(default)]
    pub from: Option<Address>,
    /// Mnemonic of the local signing wallet.
    #[serde(default)]
    pub mnemonic: Option<String>,
    /// Account of `mnemonic` to use, on the path `m/44'/60'/0'/0/{index}`.
    #[serde(default)]
    pub account_index: u32,
    /// Hex private key of the local signing wallet, instead of a mnemonic.
    #[serde(default)]
    pub private_key: Option<String>,
}

impl NetworkConfig {
    fn local(url: &str) -> Self {
        Self {
            url: url.to_string(),
            from: None,
            mnemonic: Some(LOCAL_CHAIN_MNEMONIC.to_string()),
            account_index: 0,
            private_key: None,
        }
    }

    /// The local signing wallet, if one is configured. Without one every
    /// transaction is signed by the node.
    pub fn wallet(&self) -> anyhow::Result<Option<PrivateKeySigner>> {
        let wallet = match (&self.mnemonic, &self.private_key) {
            (Some(_), Some(_)) => bail!("set either `mnemonic` or `private_key`, not both"),
            (Some(phrase), None) => Some(wallet::from_mnemonic(phrase, self.account_index)?),
            (None, Some(key)) => Some(wallet::from_private_key(key)?),
            (None, None) => None,
        };

        Ok(wallet)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfirmationConfig {
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        let policy = ConfirmationPolicy::default();
        Self {
            poll_interval_ms: u64::try_from(policy.poll_interval.as_millis()).unwrap_or(u64::MAX),
            max_attempts: policy.max_attempts,
        }
    }
}

impl From<ConfirmationConfig> for ConfirmationPolicy {
    fn from(config: ConfirmationConfig) -> Self {
        ConfirmationPolicy::new(
            Duration::from_millis(config.poll_interval_ms),
            config.max_attempts,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Root of the compiled contract artifacts.
    pub artifacts: PathBuf,
    /// Directory the `<network>.env.sh` address records are written to.
    pub out_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub confirmation: ConfirmationConfig,
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            artifacts: PathBuf::from("artifacts"),
            out_dir: PathBuf::from("."),
            http_timeout_secs: 30,
            confirmation: ConfirmationConfig::default(),
            networks: BTreeMap::from([
                ("chain0".to_string(), NetworkConfig::local("http://127.0.0.1:8545")),
                ("chain1".to_string(), NetworkConfig::local("http://127.0.0.1:8645")),
            ]),
        }
    }
}

impl HarnessConfig {
    /// Reads the configuration at `path`, or returns the defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn network(&self, name: &NetworkName) -> anyhow::Result<&NetworkConfig> {
        self.networks.get(name.as_str()).ok_or_else(|| {
            let known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
            anyhow!(
                "unknown network `{name}`, configured networks: {}",
                known.join(", ")
            )
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
