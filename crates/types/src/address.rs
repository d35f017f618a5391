use alloy::primitives::{hex, keccak256, B256};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The workchain on which actors are derived unless stated otherwise.
pub const BASECHAIN: i32 = 0;

/// Error type for parsing an [`Address`] from its raw textual form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    /// The `workchain:hash` separator is absent.
    #[error("missing ':' separator in raw address {0:?}")]
    MissingSeparator(String),
    /// The workchain component is not a signed 32-bit integer.
    #[error("invalid workchain: {0}")]
    Workchain(#[from] core::num::ParseIntError),
    /// The workchain is not in canonical decimal form, e.g. `+0` or `00`.
    #[error("workchain {0:?} is not in canonical form")]
    NonCanonicalWorkchain(String),
    /// The hash component is not exactly 64 hex digits.
    #[error("hash must be 64 hex digits, got {0}")]
    HashLength(usize),
    /// The hash component contains non-hex characters.
    #[error("invalid hash: {0}")]
    Hash(#[from] hex::FromHexError),
}

/// The identity of an actor or of an external sender.
///
/// An address is a workchain number plus a 256-bit account hash. Its raw
/// textual form is `<workchain>:<64 hex digits>`, for example
/// `0:0000000000000000000000000000000000000000000000000000000000000001`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    workchain: i32,
    hash: B256,
}

impl Address {
    /// Create a new address.
    pub const fn new(workchain: i32, hash: B256) -> Self {
        Self { workchain, hash }
    }

    /// Derive the address of an actor from its code tag and constructor
    /// parameters. Actors with identical code and parameters share an
    /// address.
    pub fn from_init(code: &str, data: &[u8]) -> Self {
        let mut preimage = Vec::with_capacity(code.len() + 1 + data.len());
        preimage.extend_from_slice(code.as_bytes());
        preimage.push(0);
        preimage.extend_from_slice(data);
        Self::new(BASECHAIN, keccak256(preimage))
    }

    /// An address on the basechain whose hash is `value`, big-endian and
    /// left-padded with zeroes.
    pub fn from_low_u64(value: u64) -> Self {
        Self::new(BASECHAIN, B256::left_padding_from(&value.to_be_bytes()))
    }

    /// Get the workchain.
    pub const fn workchain(&self) -> i32 {
        self.workchain
    }

    /// Get the account hash.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Serialize the address into 36 bytes: the big-endian workchain followed
    /// by the hash.
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..4].copy_from_slice(&self.workchain.to_be_bytes());
        out[4..].copy_from_slice(self.hash.as_slice());
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workchain, hash) =
            s.split_once(':').ok_or_else(|| AddressError::MissingSeparator(s.to_owned()))?;
        let parsed = workchain.parse::<i32>()?;
        if parsed.to_string() != workchain {
            return Err(AddressError::NonCanonicalWorkchain(workchain.to_owned()));
        }
        if hash.len() != 64 {
            return Err(AddressError::HashLength(hash.len()));
        }
        let hash = hex::decode_to_array::<_, 32>(hash)?;
        Ok(Self::new(parsed, B256::from(hash)))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
