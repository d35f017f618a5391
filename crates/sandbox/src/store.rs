use quay_types::Address;
use std::{collections::HashMap, fmt};

/// Durable storage for actor snapshots, keyed by actor address.
pub trait StateStore: fmt::Debug + Send {
    /// The latest snapshot of the actor at `address`, if any.
    fn load(&self, address: &Address) -> Option<serde_json::Value>;

    /// Replace the snapshot of the actor at `address`.
    fn store(&mut self, address: Address, state: serde_json::Value);
}

/// A [`StateStore`] backed by a [`HashMap`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStore {
    states: HashMap<Address, serde_json::Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if the store holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, address: &Address) -> Option<serde_json::Value> {
        self.states.get(address).cloned()
    }

    fn store(&mut self, address: Address, state: serde_json::Value) {
        self.states.insert(address, state);
    }
}
