//! Types shared by quay actors and the sandbox that hosts them.
//!
//! This crate contains the identity scheme ([`Address`]), the fixed-point
//! amount type ([`Nano`]), the inbound message bodies ([`Body`]) and the
//! configuration used to construct a reserve pair.

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

mod address;
pub use address::{Address, AddressError, BASECHAIN};

pub mod config;
pub use config::{ConfigError, NotifierKind, PairConfig};

mod message;
pub use message::{Add, Body, Deploy, MessageError, QueryId, Subtract, TokenNotification};

mod nano;
pub use nano::{from_nano, to_nano, Nano, NanoError, NANO_DECIMALS, NANO_PER_UNIT};
