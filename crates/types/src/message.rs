use crate::{Address, Nano};
use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque correlation token carried by every message. Actors never read it
/// beyond echoing it back in acknowledgements.
pub type QueryId = u64;

/// Error type for decoding a [`Body`].
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// A required field is absent, ill-typed, or the `$$type` tag is unknown.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Activation handshake. Carries no state change.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deploy {
    /// Correlation token.
    pub query_id: QueryId,
}

/// Increase a counter by `number`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Add {
    /// Correlation token.
    pub query_id: QueryId,
    /// Signed delta.
    pub number: i64,
}

/// Decrease a counter by `number`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtract {
    /// Correlation token.
    pub query_id: QueryId,
    /// Signed delta.
    pub number: i64,
}

/// Report that `amount` of the asset identified by `from` has been
/// transferred to the receiving actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenNotification {
    /// Correlation token.
    pub query_id: QueryId,
    /// Amount transferred, in nano-units.
    pub amount: Nano,
    /// Identifier of the transferred asset.
    pub from: Address,
    /// Auxiliary data. Not interpreted by the receiver.
    #[serde(default)]
    pub forward_payload: Bytes,
}

/// An inbound message body.
///
/// JSON-encoded with the variant name in a `$$type` field and camelCase
/// field names:
///
/// ```
/// # use quay_types::{Add, Body};
/// let body = Body::from_json(br#"{"$$type":"Add","queryId":0,"number":10}"#)?;
/// assert_eq!(body, Body::Add(Add { query_id: 0, number: 10 }));
/// # Ok::<_, quay_types::MessageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$$type")]
pub enum Body {
    /// See [`Deploy`].
    Deploy(Deploy),
    /// See [`Add`].
    Add(Add),
    /// See [`Subtract`].
    Subtract(Subtract),
    /// See [`TokenNotification`].
    TokenNotification(TokenNotification),
}

impl Body {
    /// Decode a body from its JSON form.
    pub fn from_json(raw: &[u8]) -> Result<Self, MessageError> {
        serde_json::from_slice(raw).map_err(Into::into)
    }

    /// Encode the body to its JSON form.
    pub fn to_json(&self) -> Result<Vec<u8>, MessageError> {
        serde_json::to_vec(self).map_err(Into::into)
    }

    /// The variant name, as used in the `$$type` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Deploy(_) => "Deploy",
            Self::Add(_) => "Add",
            Self::Subtract(_) => "Subtract",
            Self::TokenNotification(_) => "TokenNotification",
        }
    }

    /// The correlation token of the message.
    pub const fn query_id(&self) -> QueryId {
        match self {
            Self::Deploy(m) => m.query_id,
            Self::Add(m) => m.query_id,
            Self::Subtract(m) => m.query_id,
            Self::TokenNotification(m) => m.query_id,
        }
    }

    /// True if this is a [`Deploy`] handshake.
    pub const fn is_deploy(&self) -> bool {
        matches!(self, Self::Deploy(_))
    }
}

impl From<Deploy> for Body {
    fn from(m: Deploy) -> Self {
        Self::Deploy(m)
    }
}

impl From<Add> for Body {
    fn from(m: Add) -> Self {
        Self::Add(m)
    }
}

impl From<Subtract> for Body {
    fn from(m: Subtract) -> Self {
        Self::Subtract(m)
    }
}

impl From<TokenNotification> for Body {
    fn from(m: TokenNotification) -> Self {
        Self::TokenNotification(m)
    }
}
