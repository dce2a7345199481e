//! Exercises the default `reqwest` transport against a local mock server.

use qiwi_bill_sdk::client::{BillPaymentsClient, ClientError};
use qiwi_bill_sdk::objects::{BillStatusValue, CreateBillInfo, MoneyAmount, RefundStatus};
use serde_json::json;
use time::macros::datetime;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bill_body(status: &str) -> serde_json::Value {
    json!({
        "siteId": "site-1",
        "billId": "order-1",
        "amount": { "value": "250.00", "currency": "RUB" },
        "status": { "value": status, "changedDateTime": "2024-05-01T10:00:00.000+03:00" },
        "customer": {},
        "creationDateTime": "2024-05-01T10:00:00.000+03:00",
        "expirationDateTime": "2024-05-02T10:00:00.000+03:00",
        "payUrl": "https://oplata.qiwi.com/form/?invoice_uid=0f0e",
        "customFields": { "apiClient": "rust_sdk" }
    })
}

fn client_for(server: &MockServer, secret: &str) -> BillPaymentsClient {
    let bills_url = Url::parse(&format!("{}/partner/bill/v1/bills/", server.uri())).unwrap();
    BillPaymentsClient::new(secret).with_bills_url(bills_url)
}

#[tokio::test]
async fn test_create_and_cancel_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/partner/bill/v1/bills/order-1"))
        .and(header("authorization", "Bearer merchant-secret"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json;charset=UTF-8"))
        .and(body_json(json!({
            "amount": { "value": "250.00", "currency": "RUB" },
            "expirationDateTime": "2024-05-02T10:00:00.000000+03:00",
            "customFields": {
                "apiClient": qiwi_bill_sdk::CLIENT_NAME,
                "apiClientVersion": qiwi_bill_sdk::CLIENT_VERSION
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_body("WAITING")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/partner/bill/v1/bills/order-1/reject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_body("REJECTED")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "merchant-secret");

    let mut info = CreateBillInfo::new(
        "order-1",
        MoneyAmount::from_str_value("250", "RUB").unwrap(),
        datetime!(2024-05-02 10:00 +03:00),
    );
    info.success_url = Some("https://shop.example/thanks".to_owned());

    let bill = client.create_bill(&info).await.unwrap();
    assert_eq!(bill.status.value, BillStatusValue::Waiting);
    assert_eq!(
        bill.pay_url,
        "https://oplata.qiwi.com/form/?invoice_uid=0f0e&successUrl=https%3A%2F%2Fshop.example%2Fthanks"
    );

    let cancelled = client.cancel_bill("order-1").await.unwrap();
    assert_eq!(cancelled.status.value, BillStatusValue::Rejected);
}

#[tokio::test]
async fn test_refund_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/partner/bill/v1/bills/order-1/refunds/r-1"))
        .and(body_json(json!({ "amount": { "value": "250.00", "currency": "RUB" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "amount": { "value": "250.00", "currency": "RUB" },
            "dateTime": "2024-05-01T12:00:00+03:00",
            "refundId": "r-1",
            "status": "FULL"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "merchant-secret");
    let refund = client
        .refund(
            "order-1",
            "r-1",
            MoneyAmount::from_str_value("250", "RUB").unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(refund.status, RefundStatus::Full);
    assert_eq!(refund.refund_id, "r-1");
}

#[tokio::test]
async fn test_error_response_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partner/bill/v1/bills/order-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "serviceName": "invoicing-api",
            "errorCode": "api.invoice.not.found",
            "description": "Invoice not found",
            "userMessage": "Invoice not found",
            "dateTime": "2024-05-01T12:00:00.000+03:00",
            "traceId": "bc5e1e4d3c7c5b20"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "merchant-secret");
    match client.get_bill_info("order-404").await {
        Err(ClientError::Api(error)) => {
            assert_eq!(error.error_code, "api.invoice.not.found");
            assert_eq!(error.trace_id, "bc5e1e4d3c7c5b20");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 1.
    let bills_url = Url::parse("http://127.0.0.1:1/bills/").unwrap();
    let client = BillPaymentsClient::new("merchant-secret").with_bills_url(bills_url);
    let err = client.get_bill_info("order-1").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
