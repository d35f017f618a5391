use quay_sandbox::Transaction;
use quay_types::Address;

/// A partial description of a [`Transaction`]. Unset fields match anything.
///
/// ```
/// # use quay_test_utils::{matchers::{has_transaction, TxMatcher}, users::treasury};
/// # use quay_sandbox::Transaction;
/// # let txs: Vec<Transaction> = vec![];
/// let deployed = TxMatcher::new().from(treasury("deployer")).deploy(true).success(true);
/// assert!(!has_transaction(&txs, &deployed));
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TxMatcher {
    from: Option<Address>,
    to: Option<Address>,
    deploy: Option<bool>,
    success: Option<bool>,
}

impl TxMatcher {
    /// A matcher that matches every transaction.
    pub const fn new() -> Self {
        Self { from: None, to: None, deploy: None, success: None }
    }

    /// Require the sender.
    pub const fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Require the receiver.
    pub const fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Require the deploy flag.
    pub const fn deploy(mut self, deploy: bool) -> Self {
        self.deploy = Some(deploy);
        self
    }

    /// Require success or failure.
    pub const fn success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    /// True if `tx` satisfies every set field.
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.from.map_or(true, |from| tx.from == from)
            && self.to.map_or(true, |to| tx.to == to)
            && self.deploy.map_or(true, |deploy| tx.deploy == deploy)
            && self.success.map_or(true, |success| tx.is_success() == success)
    }
}

/// True if any of `txs` matches.
pub fn has_transaction(txs: &[Transaction], matcher: &TxMatcher) -> bool {
    txs.iter().any(|tx| matcher.matches(tx))
}
