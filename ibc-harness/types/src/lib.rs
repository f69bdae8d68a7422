//! Domain types for deploying and exercising an IBC stack on EVM chains.
//!
//! Everything in here is plain data: identifiers validated the ICS-24 way,
//! heights and packet timeouts, the deployment plans describing which logic
//! modules the handler is built from, and the address record written after a
//! successful deployment.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod error;
pub mod height;
pub mod identifiers;
pub mod packet;
pub mod plan;
pub mod record;
pub mod signer;
pub mod timeout;
pub(crate) mod validate;

pub use alloy_primitives::{Address, B256};
pub use height::Height;
pub use signer::{Signer, TxReceipt};
