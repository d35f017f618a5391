use alloy::primitives::Bytes;
use quay_actors::{Actor, ActorError, AssetContract, NotifierPolicy, ReservePair};
use quay_sandbox::{Sandbox, SandboxError};
use quay_test_utils::{
    contracts::pair::ReservePairHandle,
    init_tracing,
    matchers::{has_transaction, TxMatcher},
    to_nano,
    users::{token_pair, treasury},
};
use quay_types::{Address, Deploy, Nano, NotifierKind, PairConfig, TokenNotification};

fn config() -> PairConfig {
    let (token_a, token_b) = token_pair();
    PairConfig::new(treasury("admin"), token_a, token_b).unwrap()
}

fn deployed() -> (Sandbox, ReservePairHandle) {
    init_tracing();
    let mut sandbox = Sandbox::new();
    let pair = ReservePairHandle::open(&mut sandbox, config()).unwrap();
    pair.deploy(&mut sandbox, treasury("deployer")).unwrap();
    (sandbox, pair)
}

/// Trusts an explicit set of senders, regardless of asset.
#[derive(Debug)]
struct AllowList(Vec<Address>);

impl NotifierPolicy for AllowList {
    fn tag(&self) -> u8 {
        0x10
    }

    fn authorize(&self, _config: &PairConfig, sender: Address, _asset: Address) -> bool {
        self.0.contains(&sender)
    }
}

#[test]
fn deploy() {
    init_tracing();
    let deployer = treasury("deployer");
    let mut sandbox = Sandbox::new();
    let pair = ReservePairHandle::open(&mut sandbox, config()).unwrap();

    pair.deploy(&mut sandbox, deployer).unwrap();

    assert!(has_transaction(
        sandbox.transactions(),
        &TxMatcher::new().from(deployer).to(pair.address()).deploy(true).success(true)
    ));
}

#[test]
fn prices_follow_reserves() {
    let (mut sandbox, pair) = deployed();
    let admin = treasury("admin");
    let (token_a, token_b) = token_pair();

    pair.send_notification(&mut sandbox, admin, token_a, to_nano("10").unwrap()).unwrap();
    pair.send_notification(&mut sandbox, admin, token_b, to_nano("2").unwrap()).unwrap();

    assert_eq!(pair.get_price(&sandbox, token_a).unwrap(), Nano::new(5_000_000_000));
    assert_eq!(pair.get_price(&sandbox, token_b).unwrap(), Nano::new(200_000_000));

    let reserves = sandbox.actor::<ReservePair>(pair.address()).unwrap();
    assert_eq!(reserves.reserve(token_a), Some(to_nano("10").unwrap()));
    assert_eq!(reserves.reserve(token_b), Some(to_nano("2").unwrap()));
}

#[test]
fn price_before_both_reserves() {
    let (mut sandbox, pair) = deployed();
    let (token_a, token_b) = token_pair();

    assert!(matches!(
        pair.get_price(&sandbox, token_a),
        Err(SandboxError::Actor(ActorError::DivisionByZero { asset })) if asset == token_a
    ));

    pair.send_notification(&mut sandbox, treasury("admin"), token_b, Nano::from_units(4))
        .unwrap();
    assert_eq!(pair.get_price(&sandbox, token_a).unwrap(), Nano::ZERO);
    assert!(pair.get_price(&sandbox, token_b).is_err());
}

#[test]
fn price_of_unknown_asset() {
    let (sandbox, pair) = deployed();
    let stranger = Address::from_low_u64(3);
    assert!(matches!(
        pair.get_price(&sandbox, stranger),
        Err(SandboxError::Actor(ActorError::UnknownAsset { asset })) if asset == stranger
    ));
}

#[test]
fn foreign_asset_is_unauthorized() {
    let (mut sandbox, pair) = deployed();
    let admin = treasury("admin");
    let stranger = Address::from_low_u64(3);

    let tx = pair.send_notification(&mut sandbox, admin, stranger, Nano::from_units(1)).unwrap();
    assert_eq!(
        tx.actor_error(),
        Some(&ActorError::Unauthorized { sender: admin, asset: stranger })
    );
    let reserves = sandbox.actor::<ReservePair>(pair.address()).unwrap();
    assert_eq!(reserves.reserve(stranger), None);
}

#[test]
fn non_admin_sender_is_unauthorized() {
    let (mut sandbox, pair) = deployed();
    let (token_a, _) = token_pair();
    let mallory = treasury("mallory");

    let tx = pair.send_notification(&mut sandbox, mallory, token_a, Nano::from_units(1)).unwrap();
    assert!(!tx.is_success());
    assert_eq!(
        tx.actor_error(),
        Some(&ActorError::Unauthorized { sender: mallory, asset: token_a })
    );

    // the asset itself is not trusted under the admin policy either
    let tx = pair.send_notification(&mut sandbox, token_a, token_a, Nano::from_units(1)).unwrap();
    assert!(!tx.is_success());
}

#[test]
fn replayed_notification_credits_twice() {
    let (mut sandbox, pair) = deployed();
    let admin = treasury("admin");
    let (token_a, token_b) = token_pair();

    let amount = to_nano("1.5").unwrap();
    pair.send_notification(&mut sandbox, admin, token_a, amount).unwrap();
    pair.send_notification(&mut sandbox, admin, token_a, amount).unwrap();
    pair.send_notification(&mut sandbox, admin, token_b, Nano::from_units(1)).unwrap();

    assert_eq!(pair.get_price(&sandbox, token_a).unwrap(), to_nano("3").unwrap());
}

#[test]
fn asset_contract_policy() {
    init_tracing();
    let mut sandbox = Sandbox::new();
    let (token_a, token_b) = token_pair();
    let pair = ReservePairHandle::open_with_policy(&mut sandbox, config(), AssetContract).unwrap();
    pair.deploy(&mut sandbox, treasury("deployer")).unwrap();

    // a different policy is a different pair
    assert_ne!(pair.address(), ReservePair::new(config()).address());

    let tx = pair
        .send_notification(&mut sandbox, treasury("admin"), token_a, Nano::from_units(1))
        .unwrap();
    assert!(!tx.is_success());

    pair.send_notification(&mut sandbox, token_a, token_a, Nano::from_units(6)).unwrap();
    pair.send_notification(&mut sandbox, token_b, token_b, Nano::from_units(3)).unwrap();
    assert_eq!(pair.get_price(&sandbox, token_a).unwrap(), Nano::from_units(2));

    // the asset contract may only report on itself
    let tx = pair.send_notification(&mut sandbox, token_a, token_b, Nano::from_units(1)).unwrap();
    assert_eq!(
        tx.actor_error(),
        Some(&ActorError::Unauthorized { sender: token_a, asset: token_b })
    );
}

#[test]
fn runtime_selected_policy() {
    init_tracing();
    let mut sandbox = Sandbox::new();
    let (token_a, _) = token_pair();

    let address =
        sandbox.open(ReservePair::from_config(config(), NotifierKind::AssetContract)).unwrap();
    assert_eq!(
        address,
        ReservePair::with_policy(config(), AssetContract).address(),
        "runtime and static selection of the same policy agree"
    );

    sandbox.send(treasury("deployer"), address, Deploy { query_id: 0 }).unwrap();
    let pair = sandbox.actor::<ReservePair<NotifierKind>>(address).unwrap();
    assert_eq!(pair.policy(), &NotifierKind::AssetContract);
    assert_eq!(pair.reserve(token_a), Some(Nano::ZERO));
}

#[test]
fn injected_policy() {
    init_tracing();
    let mut sandbox = Sandbox::new();
    let (token_a, token_b) = token_pair();
    let oracle = treasury("oracle");
    let pair =
        ReservePairHandle::open_with_policy(&mut sandbox, config(), AllowList(vec![oracle]))
            .unwrap();
    pair.deploy(&mut sandbox, treasury("deployer")).unwrap();

    pair.send_notification(&mut sandbox, oracle, token_a, Nano::from_units(1)).unwrap();
    pair.send_notification(&mut sandbox, oracle, token_b, Nano::from_units(4)).unwrap();
    assert_eq!(pair.get_price(&sandbox, token_b).unwrap(), Nano::from_units(4));

    let tx = pair
        .send_notification(&mut sandbox, treasury("admin"), token_a, Nano::from_units(1))
        .unwrap();
    assert!(!tx.is_success());
}

#[test]
fn reserve_overflow_is_rejected() {
    let (mut sandbox, pair) = deployed();
    let admin = treasury("admin");
    let (token_a, token_b) = token_pair();

    pair.send_notification(&mut sandbox, admin, token_a, Nano::new(u128::MAX)).unwrap();
    let tx = pair.send_notification(&mut sandbox, admin, token_a, Nano::new(1)).unwrap();
    assert_eq!(tx.actor_error(), Some(&ActorError::ArithmeticOverflow { op: "credit" }));

    // price wider than 128 bits
    pair.send_notification(&mut sandbox, admin, token_b, Nano::new(1)).unwrap();
    assert!(matches!(
        pair.get_price(&sandbox, token_a),
        Err(SandboxError::Actor(ActorError::ArithmeticOverflow { op: "price" }))
    ));
    assert_eq!(pair.get_price(&sandbox, token_b).unwrap(), Nano::ZERO);
}

#[test]
fn notification_from_json() {
    let (mut sandbox, pair) = deployed();
    let admin = treasury("admin");
    let (token_a, token_b) = token_pair();

    let body = format!(
        r#"{{"$$type":"TokenNotification","queryId":0,"amount":"2500000000","from":"{token_a}"}}"#
    );
    let tx = sandbox.send_json(admin, pair.address(), body.as_bytes()).unwrap();
    assert!(tx.is_success(), "{:?}", tx.error());

    pair.send_notification(&mut sandbox, admin, token_b, Nano::from_units(1)).unwrap();
    assert_eq!(pair.get_price(&sandbox, token_a).unwrap(), to_nano("2.5").unwrap());
}

#[test]
fn forward_payload_is_not_interpreted() {
    let admin = treasury("admin");
    let (token_a, token_b) = token_pair();

    let (mut plain, pair) = deployed();
    pair.send_notification(&mut plain, admin, token_a, Nano::from_units(3)).unwrap();
    pair.send_notification(&mut plain, admin, token_b, Nano::from_units(2)).unwrap();

    let (mut with_payload, _) = deployed();
    let tx = with_payload
        .send(
            admin,
            pair.address(),
            TokenNotification {
                query_id: 1,
                amount: Nano::from_units(3),
                from: token_a,
                forward_payload: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            },
        )
        .unwrap();
    assert!(tx.is_success());

    let body = format!(
        r#"{{"$$type":"TokenNotification","queryId":2,"amount":"2000000000","from":"{token_b}","forwardPayload":"0xdead"}}"#
    );
    let tx = with_payload.send_json(admin, pair.address(), body.as_bytes()).unwrap();
    assert!(tx.is_success(), "{:?}", tx.error());

    for asset in [token_a, token_b] {
        let expected = plain.actor::<ReservePair>(pair.address()).unwrap().reserve(asset);
        let actual = with_payload.actor::<ReservePair>(pair.address()).unwrap().reserve(asset);
        assert_eq!(actual, expected);
        assert_eq!(
            pair.get_price(&with_payload, asset).unwrap(),
            pair.get_price(&plain, asset).unwrap()
        );
    }
}
