/// A signed accumulator, opened and driven through a sandbox.
pub mod counter;

/// A dual-asset reserve tracker, opened and driven through a sandbox.
pub mod pair;
