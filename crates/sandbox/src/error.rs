use quay_actors::ActorError;
use quay_types::Address;

/// Error type for sandbox operations that do not produce a transaction.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// No actor is registered at the address.
    #[error("no actor at {0}")]
    UnknownActor(Address),
    /// The actor has not completed its deploy handshake.
    #[error("actor at {0} is not active")]
    Inactive(Address),
    /// A getter failed.
    #[error(transparent)]
    Actor(#[from] ActorError),
    /// A getter returned a value of a different kind than its caller
    /// expects.
    #[error("getter {getter} at {address} returned an unexpected value kind")]
    UnexpectedValue {
        /// The actor address.
        address: Address,
        /// The getter name.
        getter: &'static str,
    },
    /// A state snapshot could not be written or restored.
    #[error("state snapshot for {address} failed: {source}")]
    Snapshot {
        /// The actor address.
        address: Address,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// The reason a transaction failed. The receiving actor's state is
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    /// A non-deploy message reached an actor that has not been deployed.
    #[error("actor is not active")]
    Inactive,
    /// The actor rejected the message.
    #[error(transparent)]
    Actor(#[from] ActorError),
    /// The actor accepted the message but its new state could not be
    /// snapshotted. The prior state was restored.
    #[error("state snapshot failed: {0}")]
    Snapshot(String),
}

impl TxError {
    /// The actor error, if the actor rejected the message.
    pub const fn as_actor_error(&self) -> Option<&ActorError> {
        match self {
            Self::Actor(err) => Some(err),
            Self::Inactive | Self::Snapshot(_) => None,
        }
    }
}
