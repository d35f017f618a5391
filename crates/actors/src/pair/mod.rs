mod policy;
pub use policy::{AdminForwarder, AssetContract, NotifierPolicy};

use crate::{Actor, ActorError, Context, GetValue, Getter, Outcome};
use alloy::primitives::U256;
use quay_types::{Address, Body, Nano, NotifierKind, PairConfig, TokenNotification, NANO_PER_UNIT};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{debug, trace};

/// The persisted state of a [`ReservePair`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairState {
    config: PairConfig,
    reserve_a: Nano,
    reserve_b: Nano,
}

/// Tracks the credited reserves of two assets and prices each against the
/// other.
///
/// Reserves only grow, by the amount of each accepted `TokenNotification`.
/// Notifications are not deduplicated: replaying one credits it again.
///
/// Which sender may credit a reserve is decided by the [`NotifierPolicy`]
/// `P`. The default, [`AdminForwarder`], trusts the pair admin.
///
/// ## Example
///
/// ```
/// # use quay_actors::ReservePair;
/// # use quay_types::{Address, Nano, PairConfig};
/// let (admin, a, b) = (Address::from_low_u64(9), Address::from_low_u64(1), Address::from_low_u64(2));
/// let mut pair = ReservePair::new(PairConfig::new(admin, a, b)?);
/// pair.credit(admin, a, Nano::from_units(10))?;
/// pair.credit(admin, b, Nano::from_units(2))?;
/// assert_eq!(pair.price(a)?, Nano::from_units(5));
/// assert_eq!(pair.price(b)?, Nano::new(200_000_000));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservePair<P = AdminForwarder> {
    config: PairConfig,
    reserve_a: Nano,
    reserve_b: Nano,
    policy: P,
}

impl ReservePair {
    /// Create a pair that trusts the admin to forward notifications.
    pub const fn new(config: PairConfig) -> Self {
        Self::with_policy(config, AdminForwarder)
    }
}

impl ReservePair<NotifierKind> {
    /// Create a pair whose policy is chosen at runtime.
    pub const fn from_config(config: PairConfig, kind: NotifierKind) -> Self {
        Self::with_policy(config, kind)
    }
}

impl<P> ReservePair<P> {
    /// The code tag for reserve pairs.
    pub const CODE: &'static str = "reserve-pair";

    /// Create a pair with empty reserves and the given notifier policy.
    pub const fn with_policy(config: PairConfig, policy: P) -> Self {
        Self { config, reserve_a: Nano::ZERO, reserve_b: Nano::ZERO, policy }
    }

    /// Get the construction parameters.
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// Get the notifier policy.
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// The reserve of `asset`, or `None` if it is not part of the pair.
    pub fn reserve(&self, asset: Address) -> Option<Nano> {
        if asset == self.config.asset_a() {
            Some(self.reserve_a)
        } else if asset == self.config.asset_b() {
            Some(self.reserve_b)
        } else {
            None
        }
    }

    /// `getPrice(asset)`: the reserve of `asset` scaled by 10^9 and divided
    /// by the counterpart reserve, truncating.
    ///
    /// The product is computed in 256 bits, so it cannot overflow. A
    /// quotient wider than 128 bits is reported as
    /// [`ActorError::ArithmeticOverflow`].
    pub fn price(&self, asset: Address) -> Result<Nano, ActorError> {
        let (numerator, denominator) = self
            .config
            .counterpart(asset)
            .and_then(|other| Some((self.reserve(asset)?, self.reserve(other)?)))
            .ok_or(ActorError::UnknownAsset { asset })?;

        if denominator.is_zero() {
            return Err(ActorError::DivisionByZero { asset });
        }

        let scaled = U256::from(numerator.get()) * U256::from(NANO_PER_UNIT);
        let quotient = scaled / U256::from(denominator.get());
        if quotient > U256::from(u128::MAX) {
            return Err(ActorError::ArithmeticOverflow { op: "price" });
        }
        Ok(Nano::new(quotient.to::<u128>()))
    }
}

impl<P: NotifierPolicy> ReservePair<P> {
    /// Credit `amount` to the reserve of `asset` on behalf of `sender`,
    /// returning the new reserve.
    ///
    /// Fails with [`ActorError::Unauthorized`] if `asset` is not part of the
    /// pair or the policy rejects `sender`, and with
    /// [`ActorError::ArithmeticOverflow`] if the reserve would exceed
    /// [`u128::MAX`] nano-units. Nothing changes on failure.
    pub fn credit(
        &mut self,
        sender: Address,
        asset: Address,
        amount: Nano,
    ) -> Result<Nano, ActorError> {
        let unauthorized = ActorError::Unauthorized { sender, asset };
        if !self.config.is_pair_asset(asset) {
            return Err(unauthorized);
        }
        if !self.policy.authorize(&self.config, sender, asset) {
            return Err(unauthorized);
        }

        let reserve = if asset == self.config.asset_a() {
            &mut self.reserve_a
        } else {
            &mut self.reserve_b
        };
        *reserve =
            reserve.checked_add(amount).ok_or(ActorError::ArithmeticOverflow { op: "credit" })?;
        Ok(*reserve)
    }

    fn on_notification(
        &mut self,
        ctx: &Context,
        notification: &TokenNotification,
    ) -> Result<(), ActorError> {
        let reserve = self
            .credit(ctx.sender, notification.from, notification.amount)
            .inspect_err(|err| debug!(%err, "notification rejected"))?;
        trace!(asset = %notification.from, %reserve, "reserve credited");
        Ok(())
    }
}

impl<P: NotifierPolicy> Actor for ReservePair<P> {
    fn code(&self) -> &'static str {
        Self::CODE
    }

    fn init_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(36 * 3 + 1);
        data.extend_from_slice(&self.config.admin().to_bytes());
        data.extend_from_slice(&self.config.asset_a().to_bytes());
        data.extend_from_slice(&self.config.asset_b().to_bytes());
        data.push(self.policy.tag());
        data
    }

    fn receive(&mut self, ctx: &Context, body: &Body) -> Result<Outcome, ActorError> {
        let query_id = body.query_id();
        match body {
            Body::Deploy(_) => Ok(Outcome::DeployOk { query_id }),
            Body::TokenNotification(n) => {
                self.on_notification(ctx, n)?;
                Ok(Outcome::Accepted { query_id })
            }
            _ => Err(ActorError::UnhandledMessage { code: Self::CODE, kind: body.kind() }),
        }
    }

    fn get(&self, getter: &Getter) -> Result<GetValue, ActorError> {
        match getter {
            Getter::Price { asset } => self.price(*asset).map(GetValue::Nano),
            _ => Err(ActorError::UnhandledGetter { code: Self::CODE, getter: getter.name() }),
        }
    }

    fn save(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(PairState {
            config: self.config,
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
        })
    }

    fn load(&mut self, state: serde_json::Value) -> Result<(), serde_json::Error> {
        let state: PairState = serde_json::from_value(state)?;
        if state.config != self.config {
            return Err(serde::de::Error::custom("snapshot belongs to a different pair"));
        }
        self.reserve_a = state.reserve_a;
        self.reserve_b = state.reserve_b;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quay_types::{Add, Deploy};

    const ADMIN: Address = Address::new(0, alloy::primitives::B256::repeat_byte(0xad));

    fn token_a() -> Address {
        Address::from_low_u64(1)
    }

    fn token_b() -> Address {
        Address::from_low_u64(2)
    }

    fn config() -> PairConfig {
        PairConfig::new(ADMIN, token_a(), token_b()).unwrap()
    }

    fn notify(from: Address, amount: Nano) -> Body {
        TokenNotification { query_id: 0, amount, from, forward_payload: Default::default() }.into()
    }

    fn funded() -> ReservePair {
        let mut pair = ReservePair::new(config());
        let ctx = Context::new(ADMIN, pair.address());
        pair.receive(&ctx, &notify(token_a(), Nano::from_units(10))).unwrap();
        pair.receive(&ctx, &notify(token_b(), Nano::from_units(2))).unwrap();
        pair
    }

    #[test]
    fn harness_prices() {
        let pair = funded();
        assert_eq!(pair.price(token_a()).unwrap(), Nano::new(5_000_000_000));
        assert_eq!(pair.price(token_b()).unwrap(), Nano::new(200_000_000));
        assert_eq!(
            pair.get(&Getter::Price { asset: token_b() }).unwrap(),
            GetValue::Nano(Nano::new(200_000_000))
        );
    }

    #[test]
    fn price_truncates() {
        let mut pair = ReservePair::new(config());
        pair.credit(ADMIN, token_a(), Nano::new(1)).unwrap();
        pair.credit(ADMIN, token_b(), Nano::new(3)).unwrap();
        // 1e9 / 3 = 333_333_333.33..
        assert_eq!(pair.price(token_a()).unwrap(), Nano::new(333_333_333));
        assert_eq!(pair.price(token_b()).unwrap(), Nano::new(3_000_000_000));
    }

    #[test]
    fn price_needs_counterpart_reserve() {
        let mut pair = ReservePair::new(config());
        assert_eq!(pair.price(token_a()), Err(ActorError::DivisionByZero { asset: token_a() }));
        assert_eq!(pair.price(token_b()), Err(ActorError::DivisionByZero { asset: token_b() }));

        // B priced against A is defined once A is non-zero, even if B is zero
        pair.credit(ADMIN, token_a(), Nano::from_units(1)).unwrap();
        assert_eq!(pair.price(token_b()).unwrap(), Nano::ZERO);
        assert!(pair.price(token_a()).is_err());
    }

    #[test]
    fn price_unknown_asset() {
        let pair = funded();
        let other = Address::from_low_u64(3);
        assert_eq!(pair.price(other), Err(ActorError::UnknownAsset { asset: other }));
    }

    #[test]
    fn price_wider_than_u128() {
        let mut pair = ReservePair::new(config());
        pair.credit(ADMIN, token_a(), Nano::new(u128::MAX)).unwrap();
        pair.credit(ADMIN, token_b(), Nano::new(1)).unwrap();
        assert_eq!(pair.price(token_a()), Err(ActorError::ArithmeticOverflow { op: "price" }));
        assert_eq!(pair.price(token_b()).unwrap(), Nano::ZERO);
    }

    #[test]
    fn foreign_asset_is_rejected() {
        let mut pair = funded();
        let before = pair.clone();
        let other = Address::from_low_u64(3);
        let ctx = Context::new(ADMIN, pair.address());
        assert_eq!(
            pair.receive(&ctx, &notify(other, Nano::from_units(1))),
            Err(ActorError::Unauthorized { sender: ADMIN, asset: other })
        );
        assert_eq!(pair, before);
    }

    #[test]
    fn admin_policy_rejects_strangers() {
        let mut pair = funded();
        let before = pair.clone();
        let stranger = Address::from_low_u64(77);
        let ctx = Context::new(stranger, pair.address());
        assert!(matches!(
            pair.receive(&ctx, &notify(token_a(), Nano::from_units(1))),
            Err(ActorError::Unauthorized { .. })
        ));
        // the asset contract itself is not the admin either
        let ctx = Context::new(token_a(), pair.address());
        assert!(pair.receive(&ctx, &notify(token_a(), Nano::from_units(1))).is_err());
        assert_eq!(pair, before);
    }

    #[test]
    fn asset_contract_policy() {
        let mut pair = ReservePair::with_policy(config(), AssetContract);
        let reserve = pair.credit(token_a(), token_a(), Nano::from_units(4)).unwrap();
        assert_eq!(reserve, Nano::from_units(4));
        // token B cannot credit token A, and the admin cannot credit at all
        assert!(pair.credit(token_b(), token_a(), Nano::from_units(1)).is_err());
        assert!(pair.credit(ADMIN, token_b(), Nano::from_units(1)).is_err());
        assert_eq!(pair.reserve(token_a()), Some(Nano::from_units(4)));
        assert_eq!(pair.reserve(token_b()), Some(Nano::ZERO));
    }

    #[test]
    fn runtime_policy_changes_address() {
        let admin = ReservePair::from_config(config(), NotifierKind::Admin);
        let asset = ReservePair::from_config(config(), NotifierKind::AssetContract);
        assert_eq!(admin.address(), ReservePair::new(config()).address());
        assert_ne!(admin.address(), asset.address());
    }

    #[test]
    fn replay_double_credits() {
        let mut pair = ReservePair::new(config());
        let ctx = Context::new(ADMIN, pair.address());
        let body = notify(token_a(), Nano::from_units(10));
        pair.receive(&ctx, &body).unwrap();
        pair.receive(&ctx, &body).unwrap();
        assert_eq!(pair.reserve(token_a()), Some(Nano::from_units(20)));
    }

    #[test]
    fn overflowing_credit_is_rejected() {
        let mut pair = ReservePair::new(config());
        pair.credit(ADMIN, token_a(), Nano::new(u128::MAX)).unwrap();
        assert_eq!(
            pair.credit(ADMIN, token_a(), Nano::new(1)),
            Err(ActorError::ArithmeticOverflow { op: "credit" })
        );
        assert_eq!(pair.reserve(token_a()), Some(Nano::new(u128::MAX)));
    }

    #[test]
    fn deploy_and_unhandled() {
        let mut pair = ReservePair::new(config());
        let ctx = Context::new(Address::from_low_u64(5), pair.address());
        assert_eq!(
            pair.receive(&ctx, &Deploy { query_id: 3 }.into()).unwrap(),
            Outcome::DeployOk { query_id: 3 }
        );
        assert_eq!(
            pair.receive(&ctx, &Add { query_id: 0, number: 1 }.into()),
            Err(ActorError::UnhandledMessage { code: "reserve-pair", kind: "Add" })
        );
        assert!(pair.get(&Getter::Counter).is_err());
        assert_eq!(pair.reserve(token_a()), Some(Nano::ZERO));
    }

    #[test]
    fn snapshot_is_bound_to_config() {
        let pair = funded();
        let state = pair.save().unwrap();

        let mut restored = ReservePair::new(config());
        restored.load(state.clone()).unwrap();
        assert_eq!(restored, pair);

        let other = PairConfig::new(ADMIN, token_b(), token_a()).unwrap();
        assert!(ReservePair::new(other).load(state).is_err());
    }
}
