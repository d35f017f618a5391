use quay_types::{Address, NotifierKind, PairConfig};
use std::fmt;

/// Decides which sender may report a transfer of a given pair asset.
///
/// The asset itself has already been checked against the pair
/// configuration when the policy is consulted.
pub trait NotifierPolicy: fmt::Debug + Send + 'static {
    /// Stable tag for the policy. Part of the pair's address preimage, so
    /// pairs that differ only by policy get different addresses.
    fn tag(&self) -> u8;

    /// True if `sender` may credit the reserve of `asset`.
    fn authorize(&self, config: &PairConfig, sender: Address, asset: Address) -> bool;
}

/// Trust the pair admin, which forwards notifications on behalf of the
/// asset contracts.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AdminForwarder;

impl NotifierPolicy for AdminForwarder {
    fn tag(&self) -> u8 {
        0
    }

    fn authorize(&self, config: &PairConfig, sender: Address, _asset: Address) -> bool {
        sender == config.admin()
    }
}

/// Trust only the asset contract being reported on.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AssetContract;

impl NotifierPolicy for AssetContract {
    fn tag(&self) -> u8 {
        1
    }

    fn authorize(&self, _config: &PairConfig, sender: Address, asset: Address) -> bool {
        sender == asset
    }
}

/// Runtime-selected policy, e.g. from [`NotifierKind::from_env`].
impl NotifierPolicy for NotifierKind {
    fn tag(&self) -> u8 {
        match self {
            Self::Admin => AdminForwarder.tag(),
            Self::AssetContract => AssetContract.tag(),
        }
    }

    fn authorize(&self, config: &PairConfig, sender: Address, asset: Address) -> bool {
        match self {
            Self::Admin => AdminForwarder.authorize(config, sender, asset),
            Self::AssetContract => AssetContract.authorize(config, sender, asset),
        }
    }
}
