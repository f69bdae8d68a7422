//! `ChainContext` over Ethereum JSON-RPC, signing locally or on the node.

use std::thread;

use alloy_consensus::TxLegacy;
use alloy_primitives::{Bytes, TxKind, U128, U256, U64};
use ibc_harness::ChainContext;
use ibc_harness::ChainError;
use ibc_harness_types::identifiers::{ClientType, PortId};
use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::{Address, Signer, TxReceipt, B256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::abi;
use crate::artifact::ArtifactStore;
use crate::client::JsonRpcClient;
use crate::confirmation::ConfirmationPolicy;
use crate::wallet::{self, PrivateKeySigner};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRequest {
    from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Address>,
    data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<U64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: B256,
    block_number: U64,
    #[serde(default)]
    status: Option<U64>,
    #[serde(default)]
    contract_address: Option<Address>,
}

impl RpcReceipt {
    fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status != U64::ZERO)
    }
}

/// Chain access through a JSON-RPC node.
///
/// Transactions from the address of the configured wallet are signed locally
/// and sent with `eth_sendRawTransaction`. Any other signer must be an account
/// the node manages, and is sent with `eth_sendTransaction`.
///
/// Every transaction is preflighted with `eth_estimateGas`, so a call the
/// handler would reject fails as [`ChainError::Reverted`] without being
/// submitted. Submitted transactions are then awaited according to the
/// [`ConfirmationPolicy`].
#[derive(Debug)]
pub struct RpcContext {
    client: JsonRpcClient,
    artifacts: ArtifactStore,
    policy: ConfirmationPolicy,
    wallet: Option<PrivateKeySigner>,
}

impl RpcContext {
    pub fn new(client: JsonRpcClient, artifacts: ArtifactStore, policy: ConfirmationPolicy) -> Self {
        Self {
            client,
            artifacts,
            policy,
            wallet: None,
        }
    }

    /// Signs transactions from `wallet`'s address locally.
    pub fn with_wallet(mut self, wallet: PrivateKeySigner) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn wallet_address(&self) -> Option<Address> {
        self.wallet.as_ref().map(PrivateKeySigner::address)
    }

    pub fn client(&self) -> &JsonRpcClient {
        &self.client
    }

    pub fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.client.request("eth_accounts", [(); 0])
    }

    /// The first account managed by the node, which is what deployments are
    /// signed with unless another account is chosen.
    pub fn default_signer(&self) -> Result<Signer, ChainError> {
        self.accounts()?
            .first()
            .copied()
            .map(Signer::from)
            .ok_or_else(|| ChainError::InvalidResponse {
                description: "node manages no accounts".to_string(),
            })
    }

    pub fn balance(&self, address: &Address) -> Result<U256, ChainError> {
        self.client
            .request("eth_getBalance", (address, "latest"))
    }

    pub fn chain_id(&self) -> Result<u64, ChainError> {
        let chain_id: U64 = self.client.request("eth_chainId", [(); 0])?;
        Ok(chain_id.to::<u64>())
    }

    fn transact(
        &self,
        signer: &Signer,
        to: Option<Address>,
        data: Vec<u8>,
    ) -> Result<RpcReceipt, ChainError> {
        let mut tx = TransactionRequest {
            from: signer.address(),
            to,
            data: data.into(),
            gas: None,
        };

        let gas: U64 = self.client.request("eth_estimateGas", [&tx])?;

        let local_key = self
            .wallet
            .as_ref()
            .filter(|key| key.address() == signer.address());

        let tx_hash = match local_key {
            Some(key) => self.send_raw(key, &tx, gas)?,
            None => {
                tx.gas = Some(gas);
                self.client.request::<_, B256>("eth_sendTransaction", [&tx])?
            }
        };
        debug!("submitted tx {tx_hash} with gas limit {gas}");

        let receipt = self.wait_for_receipt(tx_hash)?;
        if !receipt.succeeded() {
            return Err(ChainError::Reverted {
                reason: format!("transaction {tx_hash} failed in block {}", receipt.block_number),
            });
        }

        Ok(receipt)
    }

    fn send_raw(
        &self,
        key: &PrivateKeySigner,
        tx: &TransactionRequest,
        gas: U64,
    ) -> Result<B256, ChainError> {
        let nonce: U64 = self
            .client
            .request("eth_getTransactionCount", (tx.from, "pending"))?;
        let gas_price: U128 = self.client.request("eth_gasPrice", [(); 0])?;

        let raw = wallet::sign_legacy(
            key,
            TxLegacy {
                chain_id: Some(self.chain_id()?),
                nonce: nonce.to::<u64>(),
                gas_price: gas_price.to::<u128>(),
                gas_limit: gas.to::<u64>(),
                to: tx.to.map_or(TxKind::Create, TxKind::Call),
                value: U256::ZERO,
                input: tx.data.clone(),
            },
        )?;

        self.client.request("eth_sendRawTransaction", [raw])
    }

    fn wait_for_receipt(&self, tx_hash: B256) -> Result<RpcReceipt, ChainError> {
        for attempt in 1..=self.policy.max_attempts {
            let receipt: Option<RpcReceipt> = self
                .client
                .request("eth_getTransactionReceipt", [tx_hash])?;

            if let Some(receipt) = receipt {
                debug!("tx {tx_hash} mined in block {} after {attempt} polls", receipt.block_number);
                return Ok(receipt);
            }

            thread::sleep(self.policy.poll_interval);
        }

        Err(ChainError::Unconfirmed {
            tx_hash,
            attempts: self.policy.max_attempts,
        })
    }

    fn call(&self, signer: &Signer, to: &Address, data: Vec<u8>) -> Result<TxReceipt, ChainError> {
        let receipt = self.transact(signer, Some(*to), data)?;

        Ok(into_tx_receipt(receipt))
    }
}

fn into_tx_receipt(receipt: RpcReceipt) -> TxReceipt {
    TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number.to::<u64>(),
        contract_address: receipt.contract_address,
    }
}

impl ChainContext for RpcContext {
    fn deploy_contract(
        &mut self,
        signer: &Signer,
        name: &str,
        constructor_args: &[Address],
    ) -> Result<Address, ChainError> {
        let bytecode = self.artifacts.bytecode(name)?;
        let data = abi::encode_deployment(&bytecode, constructor_args);

        let receipt = self.transact(signer, None, data)?;
        let tx_hash = receipt.transaction_hash;

        let address = receipt
            .contract_address
            .ok_or(ChainError::MissingContractAddress { tx_hash })?;

        info!("deployed {name} in tx {tx_hash}");

        Ok(address)
    }

    fn register_client(
        &mut self,
        signer: &Signer,
        handler: &Address,
        client_type: &ClientType,
        client: &Address,
    ) -> Result<TxReceipt, ChainError> {
        self.call(signer, handler, abi::encode_register_client(client_type, client))
    }

    fn bind_port(
        &mut self,
        signer: &Signer,
        handler: &Address,
        port_id: &PortId,
        module: &Address,
    ) -> Result<TxReceipt, ChainError> {
        self.call(signer, handler, abi::encode_bind_port(port_id, module))
    }

    fn send_packet(
        &mut self,
        signer: &Signer,
        app: &Address,
        packet: &PacketDescriptor,
    ) -> Result<TxReceipt, ChainError> {
        self.call(signer, app, abi::encode_send_packet(packet))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy_primitives::address;
    use serde_json::json;

    use super::*;

    #[test]
    fn wallet_address_is_the_local_signer() {
        let client = JsonRpcClient::new("http://127.0.0.1:8545", Duration::from_secs(1)).unwrap();
        let ctx = RpcContext::new(
            client,
            ArtifactStore::new("artifacts"),
            ConfirmationPolicy::default(),
        );
        assert!(ctx.wallet_address().is_none());

        let key =
            wallet::from_private_key("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
                .unwrap();
        let ctx = ctx.with_wallet(key);

        assert_eq!(
            ctx.wallet_address(),
            Some(address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
        );
    }

    #[test]
    fn deployment_request_has_no_recipient() {
        let tx = TransactionRequest {
            from: address!("00000000000000000000000000000000000000aa"),
            to: None,
            data: Bytes::from_static(&[0x60, 0x80]),
            gas: None,
        };

        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({
                "from": "0x00000000000000000000000000000000000000aa",
                "data": "0x6080"
            })
        );
    }

    #[test]
    fn receipt_is_parsed_from_node_json() {
        let receipt: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x1",
            "contractAddress": "0x00000000000000000000000000000000000000cc",
            "gasUsed": "0x5208",
            "logs": []
        }))
        .unwrap();

        assert!(receipt.succeeded());

        let receipt = into_tx_receipt(receipt);
        assert_eq!(receipt.block_number, 16);
        assert_eq!(
            receipt.contract_address,
            Some(address!("00000000000000000000000000000000000000cc"))
        );
    }

    #[test]
    fn failed_status_is_detected() {
        let receipt: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "cd".repeat(32)),
            "blockNumber": "0x2",
            "status": "0x0",
            "contractAddress": null
        }))
        .unwrap();

        assert!(!receipt.succeeded());
    }
}
