//! Test doubles for the harness contexts.
//!
//! [`MockChain`](chain::MockChain) emulates the handler, client and
//! application contracts closely enough to exercise the deployment and
//! dispatch flows, including the reverts the real contracts produce for
//! duplicate registrations and unknown channels.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod chain;
pub mod fixtures;
pub mod store;
