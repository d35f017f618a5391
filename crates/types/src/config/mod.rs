//! Construction parameters for reserve pairs, loadable from the environment.

mod env_utils;
use env_utils::{load_address, load_string_opt};

mod error;
pub use error::ConfigError;

use crate::Address;
use core::{fmt, str::FromStr};

/// Environment variable holding the pair admin address.
pub const PAIR_ADMIN_ENV: &str = "QUAY_PAIR_ADMIN";
/// Environment variable holding the asset A identifier.
pub const PAIR_ASSET_A_ENV: &str = "QUAY_PAIR_ASSET_A";
/// Environment variable holding the asset B identifier.
pub const PAIR_ASSET_B_ENV: &str = "QUAY_PAIR_ASSET_B";
/// Environment variable selecting the notifier policy.
pub const NOTIFIER_POLICY_ENV: &str = "QUAY_NOTIFIER_POLICY";

/// Which party a reserve pair trusts to report asset transfers.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifierKind {
    /// Notifications must be sent by the pair admin, which forwards them on
    /// behalf of the asset contracts.
    #[default]
    Admin,
    /// Notifications must be sent by the asset contract they report on.
    AssetContract,
}

impl NotifierKind {
    /// Load the policy from [`NOTIFIER_POLICY_ENV`]. Defaults to
    /// [`NotifierKind::Admin`] when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_string_opt(NOTIFIER_POLICY_ENV).map_or(Ok(Self::default()), |s| s.parse())
    }
}

impl FromStr for NotifierKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "asset-contract" | "asset" => Ok(Self::AssetContract),
            _ => Err(ConfigError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::AssetContract => f.write_str("asset-contract"),
        }
    }
}

/// Immutable construction parameters of a reserve pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairConfig {
    /// The admin identity.
    admin: Address,
    /// The first asset. Order matters.
    asset_a: Address,
    /// The second asset.
    asset_b: Address,
}

impl PairConfig {
    /// Create a new pair configuration. Fails if both assets are the same.
    pub fn new(admin: Address, asset_a: Address, asset_b: Address) -> Result<Self, ConfigError> {
        if asset_a == asset_b {
            return Err(ConfigError::DuplicateAsset(asset_a));
        }
        Ok(Self { admin, asset_a, asset_b })
    }

    /// Load the configuration from [`PAIR_ADMIN_ENV`], [`PAIR_ASSET_A_ENV`]
    /// and [`PAIR_ASSET_B_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin = load_address(PAIR_ADMIN_ENV)?;
        let asset_a = load_address(PAIR_ASSET_A_ENV)?;
        let asset_b = load_address(PAIR_ASSET_B_ENV)?;
        Self::new(admin, asset_a, asset_b)
    }

    /// Get the admin identity.
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Get the first asset.
    pub const fn asset_a(&self) -> Address {
        self.asset_a
    }

    /// Get the second asset.
    pub const fn asset_b(&self) -> Address {
        self.asset_b
    }

    /// True if `asset` is one of the two configured assets.
    pub fn is_pair_asset(&self, asset: Address) -> bool {
        asset == self.asset_a || asset == self.asset_b
    }

    /// The configured asset that is not `asset`, or `None` if `asset` is not
    /// part of the pair.
    pub fn counterpart(&self, asset: Address) -> Option<Address> {
        if asset == self.asset_a {
            Some(self.asset_b)
        } else if asset == self.asset_b {
            Some(self.asset_a)
        } else {
            None
        }
    }
}
