//! Deployment and dispatch flows for an IBC stack on EVM chains.
//!
//! The flows are free functions generic over a [`ChainContext`], the same way
//! protocol handlers are generic over their host context. Each one issues its
//! transactions strictly in order and returns as soon as a step fails.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod context;
pub mod deploy;
pub mod dispatch;
pub mod error;
pub mod stack;
pub mod store;
pub mod wiring;

/// Re-exports the domain types from the `ibc-harness-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_harness_types::*;
}

pub use context::ChainContext;
pub use error::{ChainError, HarnessError};
