use crate::TxError;
use quay_actors::{ActorError, Outcome};
use quay_types::Address;

/// A receipt for one processed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Position in the sandbox's transaction log, starting at 0.
    pub seq: u64,
    /// The sender.
    pub from: Address,
    /// The receiving actor.
    pub to: Address,
    /// The message kind, or `None` if the body could not be decoded.
    pub kind: Option<&'static str>,
    /// True if this message activated the receiver.
    pub deploy: bool,
    /// What the receiver did with the message.
    pub result: Result<Outcome, TxError>,
}

impl Transaction {
    /// True if the message was applied.
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The outcome, if the message was applied.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.result.as_ref().ok()
    }

    /// The failure, if the message was rejected.
    pub fn error(&self) -> Option<&TxError> {
        self.result.as_ref().err()
    }

    /// The actor error, if the receiver rejected the message.
    pub fn actor_error(&self) -> Option<&ActorError> {
        self.error().and_then(TxError::as_actor_error)
    }
}
