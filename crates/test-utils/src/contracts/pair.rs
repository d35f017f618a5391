use alloy::primitives::Bytes;
use quay_actors::{AdminForwarder, Getter, NotifierPolicy, ReservePair};
use quay_sandbox::{Sandbox, SandboxError, StateStore, Transaction};
use quay_types::{Address, Deploy, Nano, PairConfig, TokenNotification};

/// Typed access to a reserve pair registered in a [`Sandbox`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReservePairHandle {
    address: Address,
    config: PairConfig,
}

impl ReservePairHandle {
    /// Register a fresh pair that trusts its admin as forwarder.
    pub fn open<S: StateStore>(
        sandbox: &mut Sandbox<S>,
        config: PairConfig,
    ) -> Result<Self, SandboxError> {
        Self::open_with_policy(sandbox, config, AdminForwarder)
    }

    /// Register a fresh pair with the given notifier policy.
    pub fn open_with_policy<S: StateStore, P: NotifierPolicy>(
        sandbox: &mut Sandbox<S>,
        config: PairConfig,
        policy: P,
    ) -> Result<Self, SandboxError> {
        let address = sandbox.open(ReservePair::with_policy(config, policy))?;
        Ok(Self { address, config })
    }

    /// The pair's address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The pair's configuration.
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// Send the deploy handshake.
    pub fn deploy<S: StateStore>(
        &self,
        sandbox: &mut Sandbox<S>,
        sender: Address,
    ) -> Result<Transaction, SandboxError> {
        sandbox.send(sender, self.address, Deploy { query_id: 0 })
    }

    /// Report that `amount` of `asset` arrived at the pair.
    pub fn send_notification<S: StateStore>(
        &self,
        sandbox: &mut Sandbox<S>,
        sender: Address,
        asset: Address,
        amount: Nano,
    ) -> Result<Transaction, SandboxError> {
        let body =
            TokenNotification { query_id: 0, amount, from: asset, forward_payload: Bytes::new() };
        sandbox.send(sender, self.address, body)
    }

    /// `getPrice(asset)`
    pub fn get_price<S: StateStore>(
        &self,
        sandbox: &Sandbox<S>,
        asset: Address,
    ) -> Result<Nano, SandboxError> {
        let getter = Getter::Price { asset };
        sandbox.get(self.address, &getter)?.as_nano().ok_or(SandboxError::UnexpectedValue {
            address: self.address,
            getter: getter.name(),
        })
    }
}
