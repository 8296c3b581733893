use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use alloy::primitives::{address, Address, B256};
use async_trait::async_trait;
use serde_json::{json, Value};

use super::*;
use crate::{
    cache::MetadataCaches,
    config::{ClientConfig, GuardPolicy},
    eip712::{Eip712, TypedDataPayload},
    environment::{Environment, EnvironmentConfig},
    errors::GuardKind,
    helpers::{uuid_to_hex_string, NonceSource},
    market::Side,
    prelude::*,
    signature::{create_l1_action_hash, sign_l1_action, SignatureParts},
    testing::{test_wallet, MockTransport},
    wallet::{LocalWallet, Wallet},
    Error, ErrorKind,
};

const NONCE: u64 = 1583838;

fn joined(parts: &SignatureParts) -> String {
    format!("{}{}{:02x}", parts.r, &parts.s[2..], parts.v)
}

fn meta_json() -> Value {
    json!({"universe": [
        {"name": "BTC", "szDecimals": 5, "maxLeverage": 40},
        {"name": "ETH", "szDecimals": 4, "maxLeverage": 25}
    ]})
}

fn ok_statuses(statuses: Value) -> Value {
    json!({"status": "ok", "response": {"type": "order", "data": {"statuses": statuses}}})
}

fn client_with(
    transport: Arc<MockTransport>,
    wallet: Arc<dyn Wallet>,
    config: ClientConfig,
) -> ExchangeClient {
    let environment =
        EnvironmentConfig::defaults(config.environment).with_base_url("https://api.test");
    ExchangeClient::from_parts(
        wallet,
        &config,
        environment,
        transport,
        MetadataCaches::in_memory(),
    )
}

fn client(transport: Arc<MockTransport>) -> ExchangeClient {
    client_with(transport, Arc::new(test_wallet()), ClientConfig::testnet())
}

/// Wallet that can also bridge, recording the transfers it was asked for.
#[derive(Default)]
struct BridgeWallet {
    inner: Option<LocalWallet>,
    transfers: std::sync::Mutex<Vec<(Address, Address, alloy::primitives::U256)>>,
}

#[async_trait]
impl Wallet for BridgeWallet {
    fn address(&self) -> Address {
        self.inner.as_ref().map(|w| w.address()).unwrap_or_default()
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String> {
        match &self.inner {
            Some(wallet) => wallet.sign_typed_data(payload).await,
            None => Err(Error::signing("no key")),
        }
    }

    async fn transfer_erc20(
        &self,
        token: Address,
        to: Address,
        amount: alloy::primitives::U256,
    ) -> Result<B256> {
        self.transfers.lock().unwrap().push((token, to, amount));
        Ok(B256::repeat_byte(0xab))
    }
}

struct Counter(AtomicU64);

impl NonceSource for Counter {
    fn next_nonce(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

fn limit_order_request(cloid: Option<String>) -> OrderRequest {
    OrderRequest {
        asset: 1,
        is_buy: true,
        limit_px: "2000.0".to_string(),
        sz: "3.5".to_string(),
        reduce_only: false,
        order_type: Order::Limit(Limit {
            tif: "Ioc".to_string(),
        }),
        cloid,
    }
}

async fn assert_agent_signatures(action: &Actions, mainnet: &str, testnet: &str) {
    let wallet = test_wallet();
    let connection_id = create_l1_action_hash(action, NONCE, None, None).unwrap();

    let signature = sign_l1_action(&wallet, connection_id, Environment::Mainnet)
        .await
        .unwrap();
    assert_eq!(joined(&signature), mainnet);

    let signature = sign_l1_action(&wallet, connection_id, Environment::Testnet)
        .await
        .unwrap();
    assert_eq!(joined(&signature), testnet);
}

#[tokio::test]
async fn test_limit_order_action_hashing() {
    let action = Actions::Order(BulkOrder {
        orders: vec![limit_order_request(None)],
        grouping: "na".to_string(),
        builder: None,
    });
    assert_agent_signatures(
        &action,
        "0x77957e58e70f43b6b68581f2dc42011fc384538a2e5b7bf42d5b936f19fbb67360721a8598727230f67080efee48c812a6a4442013fd3b0eed509171bef9f23f1c",
        "0xcd0925372ff1ed499e54883e9a6205ecfadec748f80ec463fe2f84f1209648776377961965cb7b12414186b1ea291e95fd512722427efcbcfb3b0b2bcd4d79d01c",
    )
    .await;
}

#[tokio::test]
async fn test_limit_order_action_hashing_with_cloid() {
    let cloid = uuid::Uuid::parse_str("1e60610f-0b3d-4205-97c8-8c1fed2ad5ee").unwrap();
    let action = Actions::Order(BulkOrder {
        orders: vec![limit_order_request(Some(uuid_to_hex_string(cloid)))],
        grouping: "na".to_string(),
        builder: None,
    });
    assert_agent_signatures(
        &action,
        "0xd3e894092eb27098077145714630a77bbe3836120ee29df7d935d8510b03a08f456de5ec1be82aa65fc6ecda9ef928b0445e212517a98858cfaa251c4cd7552b1c",
        "0x3768349dbb22a7fd770fc9fc50c7b5124a7da342ea579b309f58002ceae49b4357badc7909770919c45d850aabb08474ff2b7b3204ae5b66d9f7375582981f111c",
    )
    .await;
}

#[tokio::test]
async fn test_tpsl_order_action_hashing() {
    for (tpsl, mainnet, testnet) in [
        (
            "tp",
            "0xb91e5011dff15e4b4a40753730bda44972132e7b75641f3cac58b66159534a170d422ee1ac3c7a7a2e11e298108a2d6b8da8612caceaeeb3e571de3b2dfda9e41b",
            "0x6df38b609904d0d4439884756b8f366f22b3a081801dbdd23f279094a2299fac6424cb0cdc48c3706aeaa368f81959e91059205403d3afd23a55983f710aee871b",
        ),
        (
            "sl",
            "0x8456d2ace666fce1bee1084b00e9620fb20e810368841e9d4dd80eb29014611a0843416e51b1529c22dd2fc28f7ff8f6443875635c72011f60b62cbb8ce90e2d1c",
            "0xeb5bdb52297c1d19da45458758bd569dcb24c07e5c7bd52cf76600fd92fdd8213e661e21899c985421ec018a9ee7f3790e7b7d723a9932b7b5adcd7def5354601c",
        ),
    ] {
        let mut order = limit_order_request(None);
        order.order_type = Order::Trigger(Trigger {
            is_market: true,
            trigger_px: "2000.0".to_string(),
            tpsl: tpsl.to_string(),
        });
        let action = Actions::Order(BulkOrder {
            orders: vec![order],
            grouping: "na".to_string(),
            builder: None,
        });
        assert_agent_signatures(&action, mainnet, testnet).await;
    }
}

#[tokio::test]
async fn test_cancel_action_hashing() {
    let action = Actions::Cancel(BulkCancel {
        cancels: vec![CancelRequest {
            asset: 1,
            oid: 82382,
        }],
    });
    assert_agent_signatures(
        &action,
        "0x02f76cc5b16e0810152fa0e14e7b219f49c361e3325f771544c6f54e157bf9fa17ed0afc11a98596be85d5cd9f86600aad515337318f7ab346e5ccc1b03425d51b",
        "0x6ffebadfd48067663390962539fbde76cfa36f53be65abe2ab72c9db6d0db44457720db9d7c4860f142a484f070c84eb4b9694c3a617c83f0d698a27e55fd5e01c",
    )
    .await;
}

#[tokio::test]
async fn test_approve_builder_fee_signing() {
    let wallet = test_wallet();
    let fee = |chain: &str| ApproveBuilderFee {
        signature_chain_id: 421614,
        hyperliquid_chain: chain.to_string(),
        max_fee_rate: "0.001%".to_string(),
        builder: address!("1234567890123456789012345678901234567890"),
        nonce: NONCE,
    };

    let mainnet = wallet.sign_typed_data(&fee("Mainnet").typed_data()).await.unwrap();
    assert_eq!(
        mainnet,
        "0x343c9078af7c3d6683abefd0ca3b2960de5b669b716863e6dc49090853a4a3cd6c016301239461091a8ca3ea5ac783362526c4d9e9e624ffc563aea93d6ac2391b"
    );

    let testnet = wallet.sign_typed_data(&fee("Testnet").typed_data()).await.unwrap();
    assert_eq!(
        testnet,
        "0x2ada43eeebeba9cfe13faf95aa84e5b8c4885c3a07cbf4536f2df5edd340d4eb1ed0e24f60a80d199a842258d5fa737a18d486f7d4e656268b434d226f2811d71c"
    );
}

#[tokio::test]
async fn test_place_order_returns_resting_oid() {
    let transport = MockTransport::new();
    transport.push_json(meta_json());
    transport.push_json(json!({"status": "ok", "response": {"data": {"statuses": [{"resting": {"oid": 42}}]}}}));
    let client = client(transport.clone());

    let response = client
        .place_order(OrderIntent::limit("BTC", Side::Buy, "100.25", "1.5"), None)
        .await
        .unwrap();
    assert_eq!(response.oids(), vec![42]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url, "https://api.test/exchange");
    let body = requests[1].json();
    let order = &body["action"]["orders"][0];
    assert_eq!(order["a"], 0);
    assert_eq!(order["b"], true);
    assert_eq!(order["p"], "100.25");
    assert_eq!(order["s"], "1.5");
    assert_eq!(order["t"], json!({"limit": {"tif": "Gtc"}}));
    assert_eq!(body["action"]["type"], "order");
    assert_eq!(body["action"]["grouping"], "na");
    assert_eq!(
        body["action"]["builder"],
        json!({"b": "0x1ab189b7801140900c711e458212f9c76f8dac79", "f": 100})
    );
    assert!(body["signature"]["r"].as_str().unwrap().starts_with("0x"));
    assert!(matches!(body["signature"]["v"].as_u64(), Some(27) | Some(28)));
    assert!(body.get("vaultAddress").is_none());
    assert!(body.get("expiresAfter").is_none());
}

#[tokio::test]
async fn test_rejected_order_surfaces_message() {
    let transport = MockTransport::new();
    transport.push_json(meta_json());
    transport.push_json(ok_statuses(json!([{"error": "Insufficient margin"}])));
    let client = client(transport);

    let err = client
        .place_order(OrderIntent::limit("ETH", Side::Sell, "2500", "0.1"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(err.to_string().contains("Insufficient margin"));
}

#[tokio::test]
async fn test_invalid_order_fails_before_network() {
    let transport = MockTransport::new();
    let client = client(transport.clone());

    let err = client
        .place_order(OrderIntent::limit("BTC", Side::Buy, "-1", "1"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_batch_orders_resolve_once() {
    let transport = MockTransport::new();
    transport.push_json(meta_json());
    transport.push_json(ok_statuses(json!([
        {"resting": {"oid": 1}},
        {"filled": {"totalSz": "0.1", "avgPx": "2500", "oid": 2}}
    ])));
    let client = client(transport.clone());

    let response = client
        .place_orders(
            vec![
                OrderIntent::limit("BTC", Side::Buy, "100", "1").tif(TimeInForce::Alo),
                OrderIntent::limit("@12", Side::Sell, "0.5", "10").reduce_only(true),
            ],
            Some(&ActionOptions::with_nonce(7)),
        )
        .await
        .unwrap();
    assert_eq!(response.oids(), vec![1, 2]);

    let body = transport.requests_of_type("order").remove(0);
    assert_eq!(body["nonce"], 7);
    assert_eq!(body["action"]["orders"][0]["a"], 0);
    assert_eq!(body["action"]["orders"][1]["a"], 10012);
    assert_eq!(body["action"]["orders"][1]["r"], true);
}

#[tokio::test]
async fn test_vault_and_expiry_in_envelope() {
    let vault = address!("00000000000000000000000000000000000000aa");
    let transport = MockTransport::new();
    transport.push_json(json!({"status": "ok", "response": {"type": "default"}}));
    let config = ClientConfig {
        vault_address: Some(vault),
        expires_after: Some(1_700_000_000_000),
        ..ClientConfig::testnet()
    };
    let client = client_with(transport.clone(), Arc::new(test_wallet()), config);

    client
        .schedule_cancel(Some(1_700_000_100_000), Some(&ActionOptions::with_nonce(NONCE)))
        .await
        .unwrap();

    let body = transport.requests()[0].json();
    assert_eq!(body["vaultAddress"], "0x00000000000000000000000000000000000000aa");
    assert_eq!(body["expiresAfter"], 1_700_000_000_000u64);
    assert_eq!(body["action"], json!({"type": "scheduleCancel", "time": 1_700_000_100_000u64}));

    // the signature covers the vault and expiry
    let action = Actions::ScheduleCancel(ScheduleCancel {
        time: Some(1_700_000_100_000),
    });
    let hash = create_l1_action_hash(&action, NONCE, Some(vault), Some(1_700_000_000_000)).unwrap();
    let expected = sign_l1_action(&test_wallet(), hash, Environment::Testnet)
        .await
        .unwrap();
    let sent: SignatureParts = serde_json::from_value(body["signature"].clone()).unwrap();
    assert_eq!(sent, expected);
}

#[tokio::test]
async fn test_nonce_precedence() {
    let transport = MockTransport::new();
    let wallet_source = Arc::new(Counter(AtomicU64::new(500)));
    let wallet: Arc<dyn Wallet> = Arc::new(test_wallet().with_nonce_source(wallet_source));
    let client = client_with(transport, wallet, ClientConfig::testnet())
        .with_nonce_fallback(Arc::new(Counter(AtomicU64::new(900))));

    let call_source: Arc<dyn NonceSource> = Arc::new(Counter(AtomicU64::new(100)));
    let explicit = ActionOptions::with_nonce(5).nonce_source(call_source.clone());
    assert_eq!(client.next_nonce(Some(&explicit)).unwrap(), 5);

    let call = ActionOptions::default().nonce_source(call_source);
    assert_eq!(client.next_nonce(Some(&call)).unwrap(), 100);
    assert_eq!(client.next_nonce(Some(&call)).unwrap(), 101);

    assert_eq!(client.next_nonce(None).unwrap(), 500);
    assert_eq!(client.next_nonce(None).unwrap(), 501);
}

#[tokio::test]
async fn test_nonce_fallbacks_and_missing_source() {
    let bare: Arc<dyn Wallet> = Arc::new(test_wallet().without_nonce_source());

    let client = client_with(MockTransport::new(), bare.clone(), ClientConfig::testnet());
    let err = client.next_nonce(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    let client = client_with(MockTransport::new(), bare.clone(), ClientConfig::testnet())
        .with_nonce_fallback(Arc::new(Counter(AtomicU64::new(900))));
    assert_eq!(client.next_nonce(None).unwrap(), 900);

    let config = ClientConfig {
        allow_timestamp_nonce: true,
        ..ClientConfig::testnet()
    };
    let client = client_with(MockTransport::new(), bare, config);
    assert!(client.next_nonce(None).unwrap() > 1_600_000_000_000);
}

#[tokio::test]
async fn test_deposit_below_minimum_is_rejected_locally() {
    let transport = MockTransport::new();
    let wallet = Arc::new(BridgeWallet::default());
    let client = client_with(transport.clone(), wallet.clone(), ClientConfig::testnet());

    let err = client.deposit_to_bridge("4").await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "amount", .. }));
    assert_eq!(transport.request_count(), 0);
    assert!(wallet.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_deposit_transfers_usdc_to_bridge() {
    let wallet = Arc::new(BridgeWallet::default());
    let client = client_with(MockTransport::new(), wallet.clone(), ClientConfig::testnet());

    let tx = client.deposit_to_bridge("5.25").await.unwrap();
    assert_eq!(tx, B256::repeat_byte(0xab));

    let transfers = wallet.transfers.lock().unwrap().clone();
    let environment = EnvironmentConfig::defaults(Environment::Testnet);
    assert_eq!(
        transfers,
        vec![(
            environment.usdc_address,
            environment.bridge_address,
            alloy::primitives::U256::from(5_250_000u64)
        )]
    );
}

#[tokio::test]
async fn test_deposit_needs_capable_wallet() {
    let client = client(MockTransport::new());
    let err = client.deposit_to_bridge("10").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_cancel_all_orders() {
    let transport = MockTransport::new();
    transport.push_json(json!([
        {"coin": "ETH", "limitPx": "2500", "oid": 11, "side": "B", "sz": "1", "timestamp": 1},
        {"coin": "BTC", "limitPx": "60000", "oid": 12, "side": "A", "sz": "0.1", "timestamp": 2}
    ]));
    transport.push_json(meta_json());
    transport.push_json(ok_statuses(json!(["success", "success"])));
    let client = client(transport.clone());

    let response = client.cancel_all_orders(None).await.unwrap().unwrap();
    assert_eq!(response.statuses(), vec![ExchangeDataStatus::Success; 2]);

    let open_orders = transport.requests_of_type("openOrders");
    assert_eq!(
        open_orders[0]["user"].as_str().unwrap().to_lowercase(),
        crate::helpers::address_to_wire(&test_wallet().address())
    );
    let cancel = transport.requests_of_type("cancel").remove(0);
    assert_eq!(
        cancel["action"]["cancels"],
        json!([{"a": 1, "o": 11}, {"a": 0, "o": 12}])
    );
}

#[tokio::test]
async fn test_cancel_all_orders_without_open_orders() {
    let transport = MockTransport::new();
    transport.push_json(json!([]));
    let client = client(transport.clone());

    assert!(client.cancel_all_orders(None).await.unwrap().is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_cancel_by_cloid_and_modify() {
    let transport = MockTransport::new();
    transport.push_json(meta_json());
    transport.push_json(ok_statuses(json!(["success"])));
    transport.push_json(ok_statuses(json!([{"resting": {"oid": 99}}])));
    let client = client(transport.clone());

    client
        .cancel_by_cloid(
            vec![CancelByCloidIntent::new("ETH", "0x1E60610F0B3D420597C88C1FED2AD5EE")],
            None,
        )
        .await
        .unwrap();
    let modify = ModifyIntent::new(
        77u64,
        OrderIntent::limit("ETH", Side::Buy, 2400.5, "0.2"),
    );
    client.modify_order(modify, None).await.unwrap();

    let cancel = transport.requests_of_type("cancelByCloid").remove(0);
    assert_eq!(
        cancel["action"]["cancels"],
        json!([{"asset": 1, "cloid": "0x1e60610f0b3d420597c88c1fed2ad5ee"}])
    );
    let modify = transport.requests_of_type("modify").remove(0);
    assert_eq!(modify["action"]["oid"], 77);
    assert_eq!(modify["action"]["order"]["p"], "2400.5");

    let err = client
        .batch_modify(
            vec![ModifyIntent::new(
                OrderRef::Cloid("0x12".into()),
                OrderIntent::limit("ETH", Side::Buy, "1", "1"),
            )],
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "cloid", .. }));
}

#[tokio::test]
async fn test_twap_and_leverage_actions() {
    let transport = MockTransport::new();
    transport.push_json(meta_json());
    transport.push_json(json!({"status": "ok", "response": {"type": "twapOrder", "data": {"status": {"running": {"twapId": 5}}}}}));
    transport.push_json(json!({"status": "ok", "response": {"type": "default"}}));
    transport.push_json(json!({"status": "ok", "response": {"type": "default"}}));
    let client = client(transport.clone());

    let response = client
        .place_twap(TwapIntent::new("BTC", Side::Buy, "0.5", 30).randomize(true), None)
        .await
        .unwrap();
    assert_eq!(response.twap_id(), Some(5));
    client.update_leverage("ETH", 10, false, None).await.unwrap();
    client
        .update_isolated_margin("ETH", true, "-1.5", None)
        .await
        .unwrap();

    let twap = transport.requests_of_type("twapOrder").remove(0);
    assert_eq!(
        twap["action"]["twap"],
        json!({"a": 0, "b": true, "s": "0.5", "r": false, "m": 30, "t": true})
    );
    let leverage = transport.requests_of_type("updateLeverage").remove(0);
    assert_eq!(
        leverage["action"],
        json!({"type": "updateLeverage", "asset": 1, "isCross": false, "leverage": 10})
    );
    let margin = transport.requests_of_type("updateIsolatedMargin").remove(0);
    assert_eq!(margin["action"]["ntli"], -1_500_000);

    let err = client.update_leverage("ETH", 0, true, None).await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "leverage", .. }));
}

#[tokio::test]
async fn test_user_signed_actions() {
    let transport = MockTransport::new();
    for _ in 0..3 {
        transport.push_json(json!({"status": "ok", "response": {"type": "default"}}));
    }
    let vault = address!("00000000000000000000000000000000000000bb");
    let config = ClientConfig {
        vault_address: Some(vault),
        ..ClientConfig::testnet()
    };
    let client = client_with(transport.clone(), Arc::new(test_wallet()), config);
    let destination = address!("1234567890123456789012345678901234567890");

    client
        .usd_class_transfer("12.5", true, Some(&ActionOptions::with_nonce(NONCE)))
        .await
        .unwrap();
    client
        .spot_send(destination, "PURR:0xc4bf3f870c0e9465323c0b6ed28096c2", "3", Some(&ActionOptions::with_nonce(NONCE + 1)))
        .await
        .unwrap();
    client
        .approve_builder_fee(destination, "0.01%", Some(&ActionOptions::with_nonce(NONCE + 2)))
        .await
        .unwrap();

    let class = transport.requests_of_type("usdClassTransfer").remove(0);
    assert_eq!(
        class["action"],
        json!({
            "type": "usdClassTransfer",
            "signatureChainId": "0x66eee",
            "hyperliquidChain": "Testnet",
            "amount": "12.5 subaccount:0x00000000000000000000000000000000000000bb",
            "toPerp": true,
            "nonce": NONCE
        })
    );
    assert!(class.get("vaultAddress").is_none());

    let send = transport.requests_of_type("spotSend").remove(0);
    assert_eq!(send["action"]["time"], NONCE + 1);
    assert_eq!(send["nonce"], NONCE + 1);
    assert_eq!(send["action"]["destination"], "0x1234567890123456789012345678901234567890");

    // the envelope signature recovers to the wallet over the typed message
    let typed = SpotSend {
        signature_chain_id: 0x66eee,
        hyperliquid_chain: "Testnet".into(),
        destination: "0x1234567890123456789012345678901234567890".into(),
        token: "PURR:0xc4bf3f870c0e9465323c0b6ed28096c2".into(),
        amount: "3".into(),
        time: NONCE + 1,
    };
    let expected = test_wallet().sign_typed_data(&typed.typed_data()).await.unwrap();
    let sent: SignatureParts = serde_json::from_value(send["signature"].clone()).unwrap();
    assert_eq!(joined(&sent), expected);

    let approval = transport.requests_of_type("approveBuilderFee").remove(0);
    assert_eq!(approval["action"]["maxFeeRate"], "0.01%");
    assert_eq!(approval["action"]["builder"], "0x1234567890123456789012345678901234567890");
}

#[tokio::test]
async fn test_terms_guard() {
    let transport = MockTransport::new();
    transport.push_json(meta_json());
    transport.push_json(ok_statuses(json!([{"resting": {"oid": 1}}])));
    let config = ClientConfig {
        guards: GuardPolicy {
            require_terms_acceptance: true,
            require_builder_approval: false,
        },
        ..ClientConfig::testnet()
    };
    let client = client_with(transport.clone(), Arc::new(test_wallet()), config);
    let order = OrderIntent::limit("BTC", Side::Buy, "100", "1");

    let err = client.place_order(order.clone(), None).await.unwrap_err();
    assert!(matches!(&err, Error::Guard(guard) if guard.kind == GuardKind::Terms));
    assert_eq!(transport.request_count(), 0);

    let acceptance = client.accept_terms(Some(1_700_000_000_000));
    assert_eq!(client.terms_acceptance(), Some(acceptance));
    client.place_order(order, None).await.unwrap();
}

#[tokio::test]
async fn test_builder_approval_guard() {
    let transport = MockTransport::new();
    transport.push_json(json!(10));
    let config = ClientConfig {
        guards: GuardPolicy {
            require_terms_acceptance: false,
            require_builder_approval: true,
        },
        ..ClientConfig::testnet()
    };
    let client = client_with(transport.clone(), Arc::new(test_wallet()), config);

    let err = client
        .place_order(OrderIntent::limit("BTC", Side::Buy, "100", "1"), None)
        .await
        .unwrap_err();
    let Error::Guard(guard) = err else {
        panic!("expected guard error, got {err:?}");
    };
    assert_eq!(guard.kind, GuardKind::BuilderApproval);
    let detail = guard.detail.unwrap();
    assert_eq!(detail["approved"], 10);
    assert_eq!(detail["required"], 100);
    assert_eq!(transport.requests_of_type("maxBuilderFee").len(), 1);
    assert_eq!(transport.request_count(), 1);

    transport.push_json(json!(100));
    assert_eq!(client.ensure_builder_approval().await.unwrap(), Some(100));
}
