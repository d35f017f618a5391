use crate::{MemoryStore, SandboxError, StateStore, Transaction, TxError};
use quay_actors::{Actor, ActorError, Context, GetValue, Getter};
use quay_types::{Address, Body};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Lifecycle of a registered actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// Registered, waiting for its deploy handshake.
    Uninitialized,
    /// Deployed. Accepts every message type it handles.
    Active,
}

/// A registered actor and its lifecycle.
#[derive(Debug)]
struct Slot {
    actor: Box<dyn Actor>,
    lifecycle: Lifecycle,
}

/// Hosts actors and dispatches messages to them, one at a time.
///
/// ## Example
///
/// ```
/// # use quay_actors::{Counter, Getter, GetValue};
/// # use quay_sandbox::Sandbox;
/// # use quay_types::{Add, Address, Deploy};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = Address::from_low_u64(7);
/// let mut sandbox = Sandbox::new();
/// let counter = sandbox.open(Counter::new())?;
///
/// let tx = sandbox.send(sender, counter, Deploy { query_id: 0 })?;
/// assert!(tx.deploy && tx.is_success());
///
/// sandbox.send(sender, counter, Add { query_id: 0, number: 10 })?;
/// assert_eq!(sandbox.get(counter, &Getter::Counter)?, GetValue::Int(10));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Sandbox<S = MemoryStore> {
    /// Dispatch table.
    actors: HashMap<Address, Slot>,
    /// Write-through snapshot storage.
    store: S,
    /// Every processed message, in processing order.
    transactions: Vec<Transaction>,
}

impl Sandbox {
    /// Create a sandbox backed by an empty [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: StateStore> Sandbox<S> {
    /// Create a sandbox on top of an existing store. Actors opened later
    /// resume from any snapshot the store holds for their address.
    pub fn with_store(store: S) -> Self {
        Self { actors: HashMap::new(), store, transactions: Vec::new() }
    }

    /// Get the state store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the sandbox, keeping its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Every processed message, in processing order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The lifecycle of the actor at `address`, if one is registered.
    pub fn lifecycle(&self, address: Address) -> Option<Lifecycle> {
        self.actors.get(&address).map(|slot| slot.lifecycle)
    }

    /// Typed access to the actor at `address`. `None` if no actor is
    /// registered there or it is not an `A`.
    pub fn actor<A: Actor>(&self, address: Address) -> Option<&A> {
        self.actors.get(&address)?.actor.as_any().downcast_ref()
    }

    /// Register an actor under its derived address and return the address.
    ///
    /// If the store holds a snapshot for that address, the actor is restored
    /// from it and is immediately active. Opening an address that is
    /// already registered keeps the registered actor.
    #[instrument(skip_all, fields(code = actor.code()))]
    pub fn open<A: Actor>(&mut self, mut actor: A) -> Result<Address, SandboxError> {
        let address = actor.address();
        if self.actors.contains_key(&address) {
            debug!(%address, "actor already open");
            return Ok(address);
        }

        let lifecycle = match self.store.load(&address) {
            Some(state) => {
                actor.load(state).map_err(|source| SandboxError::Snapshot { address, source })?;
                debug!(%address, "restored from store");
                Lifecycle::Active
            }
            None => Lifecycle::Uninitialized,
        };

        self.actors.insert(address, Slot { actor: Box::new(actor), lifecycle });
        Ok(address)
    }

    /// Deliver a message and process it to completion.
    ///
    /// Returns the transaction receipt, which is also appended to
    /// [`Self::transactions`]. A rejected message is a failed transaction,
    /// not an `Err`, and so is a message whose resulting state cannot be
    /// snapshotted; the actor is rolled back to its prior state. `Err` is
    /// reserved for an unknown destination or an actor whose prior state
    /// cannot be snapshotted or restored.
    pub fn send(
        &mut self,
        sender: Address,
        to: Address,
        body: impl Into<Body>,
    ) -> Result<Transaction, SandboxError> {
        self.dispatch(sender, to, Ok(body.into()))
    }

    /// Decode a JSON body and deliver it. A body that does not decode is a
    /// failed transaction with [`ActorError::MalformedMessage`].
    pub fn send_json(
        &mut self,
        sender: Address,
        to: Address,
        raw: &[u8],
    ) -> Result<Transaction, SandboxError> {
        self.dispatch(sender, to, Body::from_json(raw).map_err(ActorError::from))
    }

    #[instrument(skip_all, fields(%sender, %to))]
    fn dispatch(
        &mut self,
        sender: Address,
        to: Address,
        body: Result<Body, ActorError>,
    ) -> Result<Transaction, SandboxError> {
        let slot = self.actors.get_mut(&to).ok_or(SandboxError::UnknownActor(to))?;
        let ctx = Context::new(sender, to);
        let snapshot_err = |source| SandboxError::Snapshot { address: to, source };

        let kind = body.as_ref().ok().map(Body::kind);
        let (body, deploy) = match (body, slot.lifecycle) {
            (Err(err), _) => (Err(TxError::Actor(err)), false),
            (Ok(body), Lifecycle::Uninitialized) if body.is_deploy() => (Ok(body), true),
            (Ok(_), Lifecycle::Uninitialized) => (Err(TxError::Inactive), false),
            (Ok(body), Lifecycle::Active) => (Ok(body), false),
        };

        let result = match body {
            Err(err) => Err(err),
            Ok(body) => {
                let prior = slot.actor.save().map_err(snapshot_err)?;
                let result = slot.actor.receive(&ctx, &body).map_err(TxError::from);
                let committed = result.and_then(|outcome| match slot.actor.save() {
                    Ok(state) => Ok((outcome, state)),
                    Err(err) => Err(TxError::Snapshot(err.to_string())),
                });
                match committed {
                    Ok((outcome, state)) => {
                        self.store.store(to, state);
                        Ok(outcome)
                    }
                    Err(err) => {
                        slot.actor.load(prior).map_err(snapshot_err)?;
                        Err(err)
                    }
                }
            }
        };

        let deploy = deploy && result.is_ok();
        match &result {
            Ok(outcome) => {
                if deploy {
                    slot.lifecycle = Lifecycle::Active;
                }
                debug!(kind, deploy, query_id = outcome.query_id(), "message committed");
            }
            Err(err) => warn!(kind, %err, "message rejected"),
        }

        let tx = Transaction {
            seq: self.transactions.len() as u64,
            from: sender,
            to,
            kind,
            deploy,
            result,
        };
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Run a read-only getter against an active actor.
    #[instrument(skip_all, fields(%address, getter = getter.name()))]
    pub fn get(&self, address: Address, getter: &Getter) -> Result<GetValue, SandboxError> {
        let slot = self.actors.get(&address).ok_or(SandboxError::UnknownActor(address))?;
        if slot.lifecycle != Lifecycle::Active {
            return Err(SandboxError::Inactive(address));
        }
        slot.actor.get(getter).map_err(Into::into)
    }
}
