//! An in-process host for quay actors.
//!
//! The [`Sandbox`] routes each message to the actor registered under the
//! destination [`Address`], processes it to completion, and records a
//! [`Transaction`] receipt. Actors start [`Lifecycle::Uninitialized`] and
//! become [`Lifecycle::Active`] on their first `Deploy`.
//!
//! Committed actor state is written through to a [`StateStore`], so a new
//! sandbox built on the same store picks up where the old one left off.
//!
//! [`Address`]: quay_types::Address

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{SandboxError, TxError};

mod sandbox;
pub use sandbox::{Lifecycle, Sandbox};

mod store;
pub use store::{MemoryStore, StateStore};

mod tx;
pub use tx::Transaction;
