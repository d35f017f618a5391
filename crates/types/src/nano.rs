use core::{fmt, str::FromStr};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of fractional decimal digits carried by a [`Nano`] amount.
pub const NANO_DECIMALS: usize = 9;

/// Nano-units in one whole unit.
pub const NANO_PER_UNIT: u128 = 1_000_000_000;

/// Error type for parsing a decimal amount into nano-units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NanoError {
    /// The input is empty or consists only of a decimal point.
    #[error("empty amount")]
    Empty,
    /// The input contains a character other than digits and one `.`.
    #[error("invalid character {0:?} in amount")]
    InvalidChar(char),
    /// More than [`NANO_DECIMALS`] fractional digits.
    #[error("amount has more than 9 fractional digits")]
    TooPrecise,
    /// The amount does not fit in 128 bits of nano-units.
    #[error("amount overflows")]
    Overflow,
}

/// An unsigned fixed-point amount with 9 fractional decimal digits, stored
/// as an integer count of nano-units.
///
/// Serialized as a decimal string of nano-units so that amounts above
/// [`u64::MAX`] survive JSON. Deserialization also accepts a non-negative
/// JSON integer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nano(u128);

impl Nano {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw count of nano-units.
    pub const fn new(nano: u128) -> Self {
        Self(nano)
    }

    /// An amount of `units` whole units.
    pub const fn from_units(units: u64) -> Self {
        Self(units as u128 * NANO_PER_UNIT)
    }

    /// The raw count of nano-units.
    pub const fn get(self) -> u128 {
        self.0
    }

    /// True if the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl From<u128> for Nano {
    fn from(nano: u128) -> Self {
        Self(nano)
    }
}

impl From<Nano> for u128 {
    fn from(nano: Nano) -> Self {
        nano.0
    }
}

impl fmt::Display for Nano {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&from_nano(*self))
    }
}

impl FromStr for Nano {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_nano(s)
    }
}

/// Parse a decimal amount of whole units, e.g. `"10"` or `"0.05"`, into
/// nano-units.
pub fn to_nano(amount: &str) -> Result<Nano, NanoError> {
    let (int, frac) = amount.split_once('.').unwrap_or((amount, ""));
    if int.is_empty() && frac.is_empty() {
        return Err(NanoError::Empty);
    }
    if let Some(c) = int.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(NanoError::InvalidChar(c));
    }
    if frac.len() > NANO_DECIMALS {
        return Err(NanoError::TooPrecise);
    }

    let whole =
        if int.is_empty() { 0 } else { int.parse::<u128>().map_err(|_| NanoError::Overflow)? };
    let frac = if frac.is_empty() {
        0
    } else {
        // right-pad to nine digits, e.g. "05" -> 050000000
        frac.parse::<u128>().map_err(|_| NanoError::Overflow)?
            * 10u128.pow((NANO_DECIMALS - frac.len()) as u32)
    };

    whole
        .checked_mul(NANO_PER_UNIT)
        .and_then(|w| w.checked_add(frac))
        .map(Nano)
        .ok_or(NanoError::Overflow)
}

/// Format nano-units as a decimal amount of whole units, trimming trailing
/// fractional zeroes.
pub fn from_nano(amount: Nano) -> String {
    let whole = amount.0 / NANO_PER_UNIT;
    let frac = amount.0 % NANO_PER_UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:09}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

impl Serialize for Nano {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct NanoVisitor;

impl de::Visitor<'_> for NanoVisitor {
    type Value = Nano;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer count of nano-units")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Nano, E> {
        Ok(Nano(v as u128))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Nano, E> {
        u128::try_from(v).map(Nano).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Nano, E> {
        let invalid = || E::invalid_value(de::Unexpected::Str(v), &self);
        if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        v.parse::<u128>().map(Nano).map_err(|_| invalid())
    }
}

impl<'de> Deserialize<'de> for Nano {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NanoVisitor)
    }
}
