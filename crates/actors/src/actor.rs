use crate::ActorError;
use quay_types::{Address, Body, Nano, QueryId};
use std::{any::Any, fmt};

/// Per-message execution context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Context {
    /// The identity that sent the message.
    pub sender: Address,
    /// The address of the receiving actor.
    pub this: Address,
}

impl Context {
    /// Create a new context.
    pub const fn new(sender: Address, this: Address) -> Self {
        Self { sender, this }
    }
}

/// The result of a committed transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The actor acknowledged a deploy handshake.
    DeployOk {
        /// Correlation token from the handshake.
        query_id: QueryId,
    },
    /// The message was applied.
    Accepted {
        /// Correlation token from the message.
        query_id: QueryId,
    },
}

impl Outcome {
    /// The correlation token of the message that produced this outcome.
    pub const fn query_id(&self) -> QueryId {
        match self {
            Self::DeployOk { query_id } | Self::Accepted { query_id } => *query_id,
        }
    }
}

/// A read-only query against an actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Getter {
    /// `getCounter()`
    Counter,
    /// `getPrice(assetId)`
    Price {
        /// The asset to price.
        asset: Address,
    },
}

impl Getter {
    /// The getter name, for logs and errors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Price { .. } => "price",
        }
    }
}

/// The value returned by a [`Getter`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GetValue {
    /// A signed integer.
    Int(i64),
    /// A fixed-point amount.
    Nano(Nano),
}

impl GetValue {
    /// The integer value, if this is an [`GetValue::Int`].
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Nano(_) => None,
        }
    }

    /// The amount, if this is a [`GetValue::Nano`].
    pub const fn as_nano(&self) -> Option<Nano> {
        match self {
            Self::Nano(v) => Some(*v),
            Self::Int(_) => None,
        }
    }
}

/// An addressable, message-driven state machine.
///
/// Implementors must be atomic: when [`Actor::receive`] returns an error,
/// the actor state must be unchanged.
pub trait Actor: fmt::Debug + Send + 'static {
    /// A short tag identifying the actor's code. Part of the address
    /// preimage.
    fn code(&self) -> &'static str;

    /// The encoded constructor parameters. Part of the address preimage.
    fn init_data(&self) -> Vec<u8>;

    /// The address derived from [`Actor::code`] and [`Actor::init_data`].
    fn address(&self) -> Address {
        Address::from_init(self.code(), &self.init_data())
    }

    /// Apply an inbound message.
    fn receive(&mut self, ctx: &Context, body: &Body) -> Result<Outcome, ActorError>;

    /// Run a read-only query.
    fn get(&self, getter: &Getter) -> Result<GetValue, ActorError>;

    /// Snapshot the actor state.
    fn save(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Restore the actor state from a snapshot produced by [`Actor::save`].
    fn load(&mut self, state: serde_json::Value) -> Result<(), serde_json::Error>;

    /// Upcast for typed access to a concrete actor.
    fn as_any(&self) -> &dyn Any;
}
