use core::fmt::{Display, Error as FmtError, Formatter};

use alloy_primitives::{Address, B256};
use derive_more::{From, Into};

/// The account that signs and pays for the harness's transactions.
///
/// Keys never pass through the harness; the chain endpoint signs on behalf of
/// this account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, From, Into)]
pub struct Signer(Address);

impl Signer {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn address(&self) -> Address {
        self.0
    }
}

impl Display for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

/// Receipt of a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    /// Address of the created contract, for deployment transactions.
    pub contract_address: Option<Address>,
}
