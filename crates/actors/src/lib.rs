//! Quay actors.
//!
//! Each actor is a closed state machine: it changes only in response to an
//! inbound [`Body`], and exposes read-only [`Getter`]s. Handlers check every
//! precondition before touching state, so a rejected message leaves the
//! actor exactly as it was.
//!
//! [`Body`]: quay_types::Body

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

mod actor;
pub use actor::{Actor, Context, GetValue, Getter, Outcome};

mod counter;
pub use counter::Counter;

mod error;
pub use error::ActorError;

mod pair;
pub use pair::{AdminForwarder, AssetContract, NotifierPolicy, ReservePair};
