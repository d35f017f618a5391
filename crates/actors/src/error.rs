use quay_types::Address;

/// Error type for actor transitions and getters.
///
/// Every error is local to the message or query that raised it. The actor
/// keeps accepting messages afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActorError {
    /// A required field is absent or of the wrong type.
    #[error("malformed message: {0}")]
    MalformedMessage(String),
    /// A notification was not sent by a trusted notifier, or reports an
    /// asset that is not part of the pair.
    #[error("unauthorized notification from {sender} for asset {asset}")]
    Unauthorized {
        /// The message sender.
        sender: Address,
        /// The asset the notification reported.
        asset: Address,
    },
    /// A price was requested for an asset that is not part of the pair.
    #[error("unknown asset {asset}")]
    UnknownAsset {
        /// The requested asset.
        asset: Address,
    },
    /// A price was requested while the counterpart reserve is empty.
    #[error("cannot price {asset}: counterpart reserve is zero")]
    DivisionByZero {
        /// The requested asset.
        asset: Address,
    },
    /// An accumulation or result exceeds the integer width.
    #[error("arithmetic overflow in {op}")]
    ArithmeticOverflow {
        /// The operation that overflowed.
        op: &'static str,
    },
    /// A well-formed message the actor has no handler for.
    #[error("{kind} is not handled by {code}")]
    UnhandledMessage {
        /// The receiving actor's code tag.
        code: &'static str,
        /// The message kind.
        kind: &'static str,
    },
    /// A getter the actor does not expose.
    #[error("getter {getter} is not exposed by {code}")]
    UnhandledGetter {
        /// The queried actor's code tag.
        code: &'static str,
        /// The getter name.
        getter: &'static str,
    },
}

impl From<quay_types::MessageError> for ActorError {
    fn from(err: quay_types::MessageError) -> Self {
        Self::MalformedMessage(err.to_string())
    }
}
