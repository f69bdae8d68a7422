//! Local transaction signing for nodes that manage no accounts, such as Besu.
//!
//! Keys come from a BIP-39 mnemonic on the standard Ethereum path
//! `m/44'/60'/0'/0/{index}` or from a raw private key. Transactions signed
//! here are submitted with `eth_sendRawTransaction`.

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::Bytes;
use alloy_signer::SignerSync;
use alloy_signer_local::coins_bip39::English;
use alloy_signer_local::MnemonicBuilder;
pub use alloy_signer_local::PrivateKeySigner;
use ibc_harness::ChainError;

fn key_error(e: impl core::fmt::Display) -> ChainError {
    ChainError::SigningKey {
        description: e.to_string(),
    }
}

/// Derives account `index` of `phrase`.
pub fn from_mnemonic(phrase: &str, index: u32) -> Result<PrivateKeySigner, ChainError> {
    MnemonicBuilder::<English>::default()
        .phrase(phrase.trim())
        .index(index)
        .and_then(|builder| builder.build())
        .map_err(key_error)
}

/// Parses a hex private key, with or without the `0x` prefix.
pub fn from_private_key(key: &str) -> Result<PrivateKeySigner, ChainError> {
    key.trim().parse::<PrivateKeySigner>().map_err(key_error)
}

/// Signs `tx` with `key` and returns its EIP-2718 encoding. `tx.chain_id`
/// should be set so the signature is replay protected.
pub fn sign_legacy(key: &PrivateKeySigner, tx: TxLegacy) -> Result<Bytes, ChainError> {
    let signature = key
        .sign_hash_sync(&tx.signature_hash())
        .map_err(key_error)?;

    let envelope = TxEnvelope::from(tx.into_signed(signature));

    Ok(envelope.encoded_2718().into())
}

#[cfg(test)]
mod tests {
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{address, TxKind, U256};
    use rstest::rstest;

    use super::*;

    const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[rstest]
    #[case(0, address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))]
    #[case(1, address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"))]
    fn mnemonic_accounts_follow_the_ethereum_path(
        #[case] index: u32,
        #[case] expected: alloy_primitives::Address,
    ) {
        assert_eq!(from_mnemonic(DEV_MNEMONIC, index).unwrap().address(), expected);
    }

    #[test]
    fn private_key_matches_its_mnemonic_account() {
        let key =
            from_private_key("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
                .unwrap();

        assert_eq!(key.address(), from_mnemonic(DEV_MNEMONIC, 0).unwrap().address());
    }

    #[test]
    fn invalid_key_material_is_rejected() {
        assert!(matches!(
            from_mnemonic("not a valid mnemonic", 0),
            Err(ChainError::SigningKey { .. })
        ));
        assert!(matches!(
            from_private_key("0x1234"),
            Err(ChainError::SigningKey { .. })
        ));
    }

    #[test]
    fn signed_transaction_recovers_to_the_key() {
        let key = from_mnemonic(DEV_MNEMONIC, 0).unwrap();
        let tx = TxLegacy {
            chain_id: Some(1337),
            nonce: 4,
            gas_price: 0,
            gas_limit: 3_000_000,
            to: TxKind::Create,
            value: U256::ZERO,
            input: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
        };

        let raw = sign_legacy(&key, tx).unwrap();

        let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
        assert_eq!(envelope.recover_signer().unwrap(), key.address());

        let legacy = envelope.as_legacy().unwrap().tx();
        assert_eq!(legacy.chain_id, Some(1337));
        assert_eq!(legacy.nonce, 4);
        assert_eq!(legacy.input.as_ref(), &[0x60, 0x80, 0x60, 0x40]);
    }
}
