use quay_actors::{Counter, Getter};
use quay_sandbox::{Sandbox, SandboxError, StateStore, Transaction};
use quay_types::{Add, Address, Deploy, Subtract};

/// Typed access to a counter registered in a [`Sandbox`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CounterHandle {
    address: Address,
}

impl CounterHandle {
    /// Register a fresh counter. It still needs its deploy message.
    pub fn open<S: StateStore>(sandbox: &mut Sandbox<S>) -> Result<Self, SandboxError> {
        sandbox.open(Counter::new()).map(|address| Self { address })
    }

    /// Attach to a counter already registered at `address`.
    pub const fn at(address: Address) -> Self {
        Self { address }
    }

    /// The counter's address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Send the deploy handshake.
    pub fn deploy<S: StateStore>(
        &self,
        sandbox: &mut Sandbox<S>,
        sender: Address,
    ) -> Result<Transaction, SandboxError> {
        sandbox.send(sender, self.address, Deploy { query_id: 0 })
    }

    /// Send `Add { number }`.
    pub fn send_add<S: StateStore>(
        &self,
        sandbox: &mut Sandbox<S>,
        sender: Address,
        number: i64,
    ) -> Result<Transaction, SandboxError> {
        sandbox.send(sender, self.address, Add { query_id: 0, number })
    }

    /// Send `Subtract { number }`.
    pub fn send_subtract<S: StateStore>(
        &self,
        sandbox: &mut Sandbox<S>,
        sender: Address,
        number: i64,
    ) -> Result<Transaction, SandboxError> {
        sandbox.send(sender, self.address, Subtract { query_id: 0, number })
    }

    /// `getCounter()`
    pub fn get_counter<S: StateStore>(&self, sandbox: &Sandbox<S>) -> Result<i64, SandboxError> {
        let getter = Getter::Counter;
        sandbox.get(self.address, &getter)?.as_int().ok_or(SandboxError::UnexpectedValue {
            address: self.address,
            getter: getter.name(),
        })
    }
}
