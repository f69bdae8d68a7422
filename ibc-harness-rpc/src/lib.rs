//! Runs the harness against a live EVM chain over Ethereum JSON-RPC.
//!
//! [`RpcContext`] implements [`ChainContext`](ibc_harness::ChainContext) on
//! top of any Ethereum node. Transactions are signed with a local key from
//! [`wallet`] when one is configured, which Besu requires, or otherwise by an
//! account the node manages, as on a Hardhat node.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod abi;
pub mod artifact;
pub mod client;
pub mod confirmation;
pub mod context;
pub mod wallet;

pub use artifact::ArtifactStore;
pub use client::JsonRpcClient;
pub use confirmation::ConfirmationPolicy;
pub use context::RpcContext;
