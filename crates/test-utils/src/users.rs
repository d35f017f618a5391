use alloy::primitives::keccak256;
use quay_types::{Address, BASECHAIN};

/// A deterministic sender identity for `name`. The same name always yields
/// the same address, e.g. `treasury("admin")`.
pub fn treasury(name: &str) -> Address {
    Address::new(BASECHAIN, keccak256(format!("treasury:{name}")))
}

/// The asset identifiers used by the reserve-pair scenarios:
/// `0:00..01` and `0:00..02`.
pub fn token_pair() -> (Address, Address) {
    (Address::from_low_u64(1), Address::from_low_u64(2))
}
