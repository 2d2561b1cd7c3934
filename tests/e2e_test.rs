use ladderbot::api::{Credentials, ToobitClient};
use ladderbot::config::{AuthMode, ExchangeConfig, StrategyConfig};
use ladderbot::execution::{LadderRunner, RunOutcome};
use ladderbot::{Side, TrendSignal};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

const CANDLES_PATH: &str = "/api/v1/market/candles";
const ORDER_PATH: &str = "/api/v1/trade/placeOrder";

fn client_for(server: &ServerGuard) -> ToobitClient {
    let config = ExchangeConfig {
        base_url: server.url(),
        timeout_secs: 5,
        auth_mode: AuthMode::ApiKey,
    };
    ToobitClient::new(&config, Credentials::new("e2e_key", "e2e_secret")).unwrap()
}

fn strategy() -> StrategyConfig {
    StrategyConfig {
        order_delay_ms: 0,
        ..StrategyConfig::default()
    }
}

/// Candle payload with closes encoded as strings, like the live API
fn candles_body(closes: &[f64]) -> String {
    let data: Vec<_> = closes
        .iter()
        .map(|c| json!({ "close": c.to_string() }))
        .collect();
    json!({ "data": data }).to_string()
}

async fn mock_candles(server: &mut ServerGuard, closes: &[f64]) -> Mock {
    server
        .mock("GET", CANDLES_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbol".into(), "BTCUSDT".into()),
            Matcher::UrlEncoded("interval".into(), "1m".into()),
            Matcher::UrlEncoded("limit".into(), "50".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candles_body(closes))
        .create_async()
        .await
}

async fn mock_order(server: &mut ServerGuard, side: &str, price: f64, status: usize) -> Mock {
    server
        .mock("POST", ORDER_PATH)
        .match_header("x-api-key", "e2e_key")
        .match_body(Matcher::PartialJson(json!({
            "symbol": "BTCUSDT",
            "side": side,
            "type": "LIMIT",
            "price": price,
            "quantity": 0.001,
            "timeInForce": "GTC"
        })))
        .with_status(status)
        .with_body(if status == 200 {
            r#"{"orderId":"1","status":"NEW"}"#
        } else {
            r#"{"code":-1013,"msg":"rejected"}"#
        })
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn test_uptrend_pass_places_buy_ladder() {
    let _ = tracing_subscriber::fmt::try_init();
    let mut server = mockito::Server::new_async().await;

    let closes: Vec<f64> = (0..50).map(|i| 60000.0 + i as f64 * 10.0).collect();
    let candles = mock_candles(&mut server, &closes).await;

    let mut orders = Vec::new();
    for price in [60490.0, 60290.0, 60090.0, 59890.0, 59690.0] {
        orders.push(mock_order(&mut server, "BUY", price, 200).await);
    }

    let client = client_for(&server);
    let runner = LadderRunner::new(client.clone(), client, strategy());
    let report = runner.run_once().await;

    assert_eq!(report.outcome, RunOutcome::Submitted);
    assert_eq!(report.trend.unwrap().signal, TrendSignal::Uptrend);
    assert_eq!(report.placed(), 5);
    assert!(report.orders.iter().all(|o| o.intent.side == Side::Buy));

    candles.assert_async().await;
    for order in orders {
        order.assert_async().await;
    }
}

#[tokio::test]
async fn test_downtrend_pass_isolates_rejected_order() {
    let mut server = mockito::Server::new_async().await;

    let closes: Vec<f64> = (0..50).map(|i| 60000.0 - i as f64 * 10.0).collect();
    let _candles = mock_candles(&mut server, &closes).await;

    // step 2 of 5 is rejected by the exchange
    let prices = [59510.0, 59710.0, 59910.0, 60110.0, 60310.0];
    let mut orders = Vec::new();
    for (i, price) in prices.iter().enumerate() {
        let status = if i == 1 { 400 } else { 200 };
        orders.push(mock_order(&mut server, "SELL", *price, status).await);
    }

    let client = client_for(&server);
    let runner = LadderRunner::new(client.clone(), client, strategy());
    let report = runner.run_once().await;

    assert_eq!(report.outcome, RunOutcome::Submitted);
    assert_eq!(report.orders.len(), 5);
    assert_eq!(report.placed(), 4);
    assert!(!report.orders[1].is_placed());

    for order in orders {
        order.assert_async().await;
    }
}

#[tokio::test]
async fn test_short_history_places_no_orders() {
    let mut server = mockito::Server::new_async().await;

    let closes: Vec<f64> = (0..10).map(|i| 60000.0 + i as f64).collect();
    let _candles = mock_candles(&mut server, &closes).await;
    let orders = server
        .mock("POST", ORDER_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let runner = LadderRunner::new(client.clone(), client, strategy());
    let report = runner.run_once().await;

    assert_eq!(
        report.outcome,
        RunOutcome::InsufficientHistory { have: 10, need: 20 }
    );
    orders.assert_async().await;
}

#[tokio::test]
async fn test_candle_outage_places_no_orders() {
    let mut server = mockito::Server::new_async().await;

    let candles = server
        .mock("GET", CANDLES_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;
    let orders = server
        .mock("POST", ORDER_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let runner = LadderRunner::new(client.clone(), client, strategy());
    let report = runner.run_once().await;

    assert_eq!(report.outcome, RunOutcome::NoData);
    assert!(report.plan.is_empty());
    candles.assert_async().await;
    orders.assert_async().await;
}

#[tokio::test]
async fn test_dry_run_only_fetches() {
    let mut server = mockito::Server::new_async().await;

    let closes: Vec<f64> = (0..50).map(|i| 60000.0 + i as f64 * 10.0).collect();
    let _candles = mock_candles(&mut server, &closes).await;
    let orders = server
        .mock("POST", ORDER_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let config = StrategyConfig {
        dry_run: true,
        ..strategy()
    };
    let runner = LadderRunner::new(client.clone(), client, config);
    let report = runner.run_once().await;

    assert_eq!(report.outcome, RunOutcome::DryRun);
    assert_eq!(report.plan.len(), 5);
    assert!(report.orders.is_empty());
    orders.assert_async().await;
}
