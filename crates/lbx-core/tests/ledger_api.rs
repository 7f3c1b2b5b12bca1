//! HTTP contract tests for the ledger client against a mock server.

use lbx_core::api::LedgerClient;
use lbx_core::types::TransactionKind;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LedgerClient {
    LedgerClient::new(format!("{}/api/accounts", server.uri()))
}

#[tokio::test]
async fn test_register_sends_camel_case_body_and_decodes_account() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts"))
        .and(body_json(json!({
            "ownerName": "Renan Lima",
            "initialBalance": 0.0,
            "phoneNumber": "21999999999",
            "password": "s3cret"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({
                "agency": "0001",
                "number": "123456"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let account = client_for(&server)
        .register("Renan Lima", "21999999999", "s3cret")
        .await
        .unwrap();

    assert_eq!(account.agency, "0001");
    assert_eq!(account.number, "123456");
}

#[tokio::test]
async fn test_register_surfaces_server_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Phone already in use"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register("Ana", "11988887777", "pw")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Phone already in use");
}

#[tokio::test]
async fn test_sign_in_returns_account_id_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/login"))
        .and(body_json(json!({
            "agency": "0001",
            "number": "123456",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": "acc-42",
            "message": "2FA code sent via SMS"
        })))
        .mount(&server)
        .await;

    let granted = client_for(&server)
        .sign_in("0001", "123456", "s3cret")
        .await
        .unwrap();

    assert_eq!(granted.account_id, "acc-42");
    assert_eq!(granted.message, "2FA code sent via SMS");
}

#[tokio::test]
async fn test_sign_in_falls_back_on_empty_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .sign_in("0001", "123456", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials.");
}

#[tokio::test]
async fn test_validate_pin_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/validate-pin"))
        .and(body_json(json!({"accountId": "acc-42", "pin": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": "acc-42",
            "token": "jwt-token"
        })))
        .mount(&server)
        .await;

    let granted = client_for(&server)
        .validate_pin("acc-42", "123456")
        .await
        .unwrap();

    assert_eq!(granted.token, "jwt-token");
}

#[tokio::test]
async fn test_validate_pin_falls_back_on_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/validate-pin"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .validate_pin("acc-42", "000000")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid PIN.");
}

#[tokio::test]
async fn test_account_fetches_snapshot_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accounts/acc-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ownerName": "Renan Lima",
            "agency": "0001",
            "number": "123456",
            "balance": 150.75
        })))
        .mount(&server)
        .await;

    let account = client_for(&server).account("acc-42").await.unwrap();

    assert_eq!(account.owner_name, "Renan Lima");
    assert!((account.balance - 150.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_submit_transaction_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/acc-42/transaction"))
        .and(header("authorization", "Bearer jwt-token"))
        .and(body_json(json!({"amount": 50.0, "type": "CREDIT"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .submit_transaction("acc-42", 50.0, TransactionKind::Credit, "jwt-token")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_transaction_surfaces_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/acc-42/transaction"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "Insufficient funds"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_transaction("acc-42", 9999.0, TransactionKind::Debit, "jwt-token")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Insufficient funds");
}

#[tokio::test]
async fn test_transport_failure_reduces_to_fallback() {
    // Nothing listens on port 1; the connect error must not leak through.
    let client = LedgerClient::new("http://127.0.0.1:1/api/accounts");

    let err = client.sign_in("0001", "123456", "pw").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials.");
}
