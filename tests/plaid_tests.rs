// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bank_connector::errors::ApiError;
use bank_connector::fetcher::TransactionFetcher;
use bank_connector::models::{AccessToken, PublicToken};
use bank_connector::plaid::PlaidSession;
use bank_connector::settings::{CLIENT_ID_VAR, SECRET_VAR, Settings};
use chrono::NaiveDate;
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;

fn session(server: &MockServer) -> PlaidSession {
    let source: HashMap<String, String> = [
        (CLIENT_ID_VAR, "test-client"),
        (SECRET_VAR, "test-secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let settings = Settings::from_source(&source).unwrap();
    PlaidSession::new(&settings)
        .unwrap()
        .with_base_url(server.base_url())
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn sandbox_setup_creates_and_exchanges_token() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/sandbox/public_token/create")
            .header("content-type", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "public_token": "public-sandbox-123",
                "request_id": "req-1"
            }));
    });
    let exchange = server.mock(|when, then| {
        when.method(POST).path("/item/public_token/exchange");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "access_token": "access-sandbox-456",
                "item_id": "item-1",
                "request_id": "req-2"
            }));
    });

    let token = session(&server)
        .create_sandbox_access_token("ins_109508")
        .unwrap();

    create.assert();
    exchange.assert();
    assert_eq!(token.get(), "access-sandbox-456");
}

#[test]
fn failed_public_token_skips_exchange() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sandbox/public_token/create");
        then.status(400)
            .header("content-type", "application/json")
            .json_body(json!({
                "error_type": "INVALID_INPUT",
                "error_code": "INVALID_API_KEYS",
                "error_message": "invalid client_id or secret provided",
                "display_message": null,
                "request_id": "req-3"
            }));
    });

    let err = session(&server)
        .create_sandbox_access_token("ins_109508")
        .unwrap_err();
    match err {
        ApiError::Rejected {
            endpoint,
            status,
            error_code,
            ..
        } => {
            assert_eq!(endpoint, "/sandbox/public_token/create");
            assert_eq!(status, 400);
            assert_eq!(error_code.as_deref(), Some("INVALID_API_KEYS"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn exchange_public_token_standalone() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/item/public_token/exchange");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "access_token": "access-sandbox-789", "item_id": "item-2" }));
    });

    let token = session(&server)
        .exchange_public_token(&PublicToken::new("public-sandbox-abc"))
        .unwrap();
    assert_eq!(token.get(), "access-sandbox-789");
}

#[test]
fn item_info_reports_institution_and_products() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/item/get");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "item": {
                    "item_id": "item-1",
                    "institution_id": "ins_109508",
                    "available_products": ["balance", "identity"],
                    "billed_products": ["transactions"],
                    "webhook": ""
                },
                "status": null,
                "request_id": "req-4"
            }));
    });

    let item = session(&server)
        .get_item_info(&AccessToken::new("access-sandbox-456"))
        .unwrap();
    assert_eq!(item.item_id, "item-1");
    assert_eq!(item.institution_id.as_deref(), Some("ins_109508"));
    assert_eq!(item.available_products, ["balance", "identity"]);
    assert_eq!(item.billed_products, ["transactions"]);
}

#[test]
fn expired_token_is_a_rejection() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/item/get");
        then.status(400)
            .header("content-type", "application/json")
            .json_body(json!({
                "error_type": "ITEM_ERROR",
                "error_code": "ITEM_LOGIN_REQUIRED",
                "error_message": "the login details of this item have changed"
            }));
    });

    let err = session(&server)
        .get_item_info(&AccessToken::new("access-sandbox-old"))
        .unwrap_err();
    assert_eq!(err.error_code(), Some("ITEM_LOGIN_REQUIRED"));
    assert!(err.to_string().contains("the login details of this item have changed"));
}

#[test]
fn transactions_are_fetched_and_normalized() {
    let server = MockServer::start();
    let get = server.mock(|when, then| {
        when.method(POST).path("/transactions/get");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "accounts": [],
                "transactions": [
                    {
                        "transaction_id": "t1",
                        "account_id": "acc",
                        "date": "2024-06-01",
                        "amount": 15.0,
                        "name": "Uber 063015 SF**POOL**",
                        "merchant_name": null,
                        "category": null,
                        "pending": false
                    },
                    {
                        "transaction_id": "t2",
                        "account_id": "acc",
                        "date": "2024-06-03",
                        "amount": -100.0,
                        "name": "ACME REFUND",
                        "merchant_name": "Acme",
                        "category": ["Shops", "Electronics"],
                        "pending": true
                    }
                ],
                "total_transactions": 2,
                "request_id": "req-5"
            }));
    });

    let session = session(&server);
    let txns = TransactionFetcher::new(&session)
        .transactions_in_range(
            &AccessToken::new("access-sandbox-456"),
            date("2024-06-01"),
            date("2024-06-30"),
        )
        .unwrap();

    get.assert();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].transaction_id, "t2");
    assert_eq!(txns[0].amount, Decimal::new(-100, 0));
    assert_eq!(txns[0].merchant_name.as_deref(), Some("Acme"));
    assert_eq!(txns[1].transaction_id, "t1");
    assert_eq!(txns[1].description, "Uber 063015 SF**POOL**");
    assert!(txns[1].category.is_empty());
}

#[test]
fn malformed_transactions_fail_closed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/transactions/get");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "transactions": [{ "transaction_id": "t1" }] }));
    });

    let err = session(&server)
        .get_transactions(
            &AccessToken::new("access-sandbox-456"),
            date("2024-06-01"),
            date("2024-06-30"),
        )
        .unwrap_err();
    assert!(
        matches!(err, ApiError::Decode { endpoint: "/transactions/get", .. }),
        "{err:?}"
    );
}

#[test]
fn non_json_error_body_is_kept() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/transactions/get");
        then.status(503).body("upstream unavailable");
    });

    let err = session(&server)
        .get_transactions(
            &AccessToken::new("access-sandbox-456"),
            date("2024-06-01"),
            date("2024-06-30"),
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "/transactions/get rejected the request (503): upstream unavailable"
    );
}
