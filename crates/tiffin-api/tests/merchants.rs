//! Merchant service endpoint tests against a local mock server.

use serde_json::json;
use tiffin_api::{ApiClient, ApiConfig, ApiError};
use tiffin_core::{unsettled_total, Money};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    let mut cfg = ApiConfig::with_base("http://unused.invalid");
    cfg.merchant_base = server.uri();
    ApiClient::new(cfg).unwrap()
}

#[tokio::test]
async fn test_balances_are_bare_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/merchants-balances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "a", "merchantId": "TW-1", "firstName": "Asha", "lastName": "Rao",
              "phone": "9000000001", "upi": "asha@ybl", "outstanding": 1520.5 },
            { "_id": "b", "merchantId": "TW-2", "outstanding": 0, "extraPercentage": 2.5 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/merchants-unsettled-balances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let merchants = client.merchants_balances().await.unwrap();
    assert_eq!(merchants.len(), 2);
    assert_eq!(merchants[0].outstanding, Money::from_paise(152050));
    assert_eq!(merchants[1].extra_percentage, Some(2.5));

    assert!(client.merchants_unsettled_balances().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settle_all_sends_trimmed_settlement_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/settle-all/TW-1"))
        .and(body_json(json!({ "settlementId": "UTR998877" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "settled": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .await
        .settle_all_transactions("TW-1", "  UTR998877 ")
        .await
        .unwrap();
    assert_eq!(result["settled"], 3);
}

#[tokio::test]
async fn test_blank_settlement_id_never_hits_the_server() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    let err = client.settle_all_transactions("TW-1", "   ").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    let err = client.settle_merchant_extra_cash("TW-1", "").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_upi() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/merchant/TW-1/upi"))
        .and(body_json(json!({ "upi": "asha.rao@okaxis" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.update_merchant_upi("TW-1", "asha.rao@okaxis").await.unwrap();
    assert!(client.update_merchant_upi("TW-1", "").await.is_err());
}

#[tokio::test]
async fn test_extra_cash_ledger_and_settle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/extra-cash/TW-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "e1", "merchantId": "TW-1", "amount": 12.5, "isSettled": false },
            { "_id": "e2", "merchantId": "TW-1", "amount": 40, "isSettled": true, "settlementId": "UTR1" },
            { "_id": "e3", "merchantId": "TW-1", "amount": 7.25, "isSettled": false }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/extra-cash/settle/TW-1"))
        .and(body_json(json!({ "settlementId": "UTR2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let ledger = client.merchant_extra_cash("TW-1").await.unwrap();
    assert_eq!(unsettled_total(&ledger), Money::from_paise(1975));

    client.settle_merchant_extra_cash("TW-1", "UTR2").await.unwrap();
}

#[tokio::test]
async fn test_extra_percentage() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/merchant/TW-1/extra-percentage"))
        .and(body_json(json!({ "extraPercentage": 12.75 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.update_merchant_extra_percentage("TW-1", 12.75).await.unwrap();

    let err = client
        .update_merchant_extra_percentage("TW-1", 101.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_merchant_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/extra-cash/TW-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Merchant not found" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .merchant_extra_cash("TW-404")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}
