// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking session against the Plaid REST API.
//!
//! Only the four endpoints this tool needs are shaped here. Every call is a
//! single POST carrying `client_id` and `secret` in the JSON body; failures
//! surface immediately as [`ApiError`], there is no retry.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::fetcher::TransactionSource;
use crate::models::{AccessToken, ItemInfo, PublicToken, RawTransaction};
use crate::settings::Settings;
use crate::utils::http_client;

pub const DEFAULT_INSTITUTION_ID: &str = "ins_109508";
const TRANSACTIONS_PRODUCT: &str = "transactions";

const SANDBOX_PUBLIC_TOKEN_CREATE: &str = "/sandbox/public_token/create";
const ITEM_PUBLIC_TOKEN_EXCHANGE: &str = "/item/public_token/exchange";
const ITEM_GET: &str = "/item/get";
const TRANSACTIONS_GET: &str = "/transactions/get";

pub struct PlaidSession {
    client_id: String,
    secret: String,
    base_url: String,
    http: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct Authenticated<'a, B: Serialize> {
    client_id: &'a str,
    secret: &'a str,
    #[serde(flatten)]
    body: &'a B,
}

#[derive(Deserialize, Default)]
struct PlaidErrorBody {
    error_type: Option<String>,
    error_code: Option<String>,
    error_message: Option<String>,
}

impl PlaidSession {
    pub fn new(settings: &Settings) -> reqwest::Result<Self> {
        Ok(Self {
            client_id: settings.client_id.clone(),
            secret: settings.secret().to_string(),
            base_url: settings.environment_endpoint().to_string(),
            http: http_client()?,
        })
    }

    /// Override API base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint);
        let transport = |source| ApiError::Transport { endpoint, source };

        let response = self
            .http
            .post(&url)
            .json(&Authenticated {
                client_id: &self.client_id,
                secret: &self.secret,
                body,
            })
            .send()
            .map_err(transport)?;

        let status = response.status();
        let text = response.text().map_err(transport)?;
        if !status.is_success() {
            return Err(rejection(endpoint, status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Decode { endpoint, source })
    }

    /// Sandbox-only shortcut around the Link UI: creates a public token for a test institution.
    pub fn create_sandbox_public_token(
        &self,
        institution_id: &str,
    ) -> Result<PublicToken, ApiError> {
        #[derive(Serialize)]
        struct Request<'a> {
            institution_id: &'a str,
            initial_products: [&'a str; 1],
        }

        #[derive(Deserialize)]
        struct Response {
            public_token: PublicToken,
        }

        log::info!("Requesting sandbox public token for {institution_id}...");
        let response: Response = self.post(
            SANDBOX_PUBLIC_TOKEN_CREATE,
            &Request {
                institution_id,
                initial_products: [TRANSACTIONS_PRODUCT],
            },
        )?;
        log::info!("Requesting sandbox public token...done");
        Ok(response.public_token)
    }

    /// Creates a public token for `institution_id` and exchanges it for an access token.
    pub fn create_sandbox_access_token(
        &self,
        institution_id: &str,
    ) -> Result<AccessToken, ApiError> {
        let public_token = self.create_sandbox_public_token(institution_id)?;
        self.exchange_public_token(&public_token)
    }

    pub fn exchange_public_token(
        &self,
        public_token: &PublicToken,
    ) -> Result<AccessToken, ApiError> {
        #[derive(Serialize)]
        struct Request<'a> {
            public_token: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            access_token: AccessToken,
        }

        log::info!("Exchanging public token...");
        let response: Response = self.post(
            ITEM_PUBLIC_TOKEN_EXCHANGE,
            &Request {
                public_token: public_token.get(),
            },
        )?;
        log::info!("Exchanging public token...done");
        Ok(response.access_token)
    }

    pub fn get_item_info(&self, access_token: &AccessToken) -> Result<ItemInfo, ApiError> {
        #[derive(Serialize)]
        struct Request<'a> {
            access_token: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            item: ItemInfo,
        }

        log::info!("Requesting item...");
        let response: Response = self.post(
            ITEM_GET,
            &Request {
                access_token: access_token.get(),
            },
        )?;
        log::info!("Requesting item...done");
        Ok(response.item)
    }

    /// All transactions in `start..=end` that a single `/transactions/get` call yields.
    pub fn get_transactions(
        &self,
        access_token: &AccessToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawTransaction>, ApiError> {
        #[derive(Serialize)]
        struct Request<'a> {
            access_token: &'a str,
            start_date: NaiveDate,
            end_date: NaiveDate,
        }

        #[derive(Deserialize)]
        struct Response {
            transactions: Vec<RawTransaction>,
            #[serde(default)]
            total_transactions: Option<usize>,
        }

        log::info!("Requesting transactions {start}..{end}...");
        let response: Response = self.post(
            TRANSACTIONS_GET,
            &Request {
                access_token: access_token.get(),
                start_date: start,
                end_date: end,
            },
        )?;
        if let Some(total) = response.total_transactions {
            if total > response.transactions.len() {
                log::warn!(
                    "Plaid reported {total} transactions but returned {}; only the first page is shown",
                    response.transactions.len()
                );
            }
        }
        log::info!("Requesting transactions...done");
        Ok(response.transactions)
    }
}

impl TransactionSource for PlaidSession {
    fn fetch_transactions(
        &self,
        access_token: &AccessToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawTransaction>, ApiError> {
        self.get_transactions(access_token, start, end)
    }
}

fn rejection(endpoint: &'static str, status: u16, body: &str) -> ApiError {
    let parsed: PlaidErrorBody = serde_json::from_str(body).unwrap_or_default();
    let detail = match parsed.error_message {
        Some(msg) if !msg.is_empty() => msg,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => "no error details".to_string(),
    };
    let message = match &parsed.error_code {
        Some(code) => format!("{code}: {detail}"),
        None => detail,
    };
    ApiError::Rejected {
        endpoint,
        status,
        error_type: parsed.error_type,
        error_code: parsed.error_code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_uses_plaid_error_body() {
        let body = r#"{
            "error_type": "INVALID_INPUT",
            "error_code": "INVALID_ACCESS_TOKEN",
            "error_message": "provided access token is in an invalid format",
            "display_message": null,
            "request_id": "abc"
        }"#;
        let err = rejection(ITEM_GET, 400, body);
        assert_eq!(err.error_code(), Some("INVALID_ACCESS_TOKEN"));
        assert_eq!(
            err.to_string(),
            "/item/get rejected the request (400): INVALID_ACCESS_TOKEN: provided access token is in an invalid format"
        );
    }

    #[test]
    fn rejection_falls_back_to_raw_body() {
        let err = rejection(TRANSACTIONS_GET, 502, "Bad Gateway\n");
        assert_eq!(err.error_code(), None);
        assert_eq!(
            err.to_string(),
            "/transactions/get rejected the request (502): Bad Gateway"
        );
    }

    #[test]
    fn rejection_with_empty_body() {
        let err = rejection(ITEM_GET, 500, "");
        assert!(err.to_string().ends_with("(500): no error details"));
    }

    #[test]
    fn request_body_carries_credentials() {
        #[derive(Serialize)]
        struct Request<'a> {
            access_token: &'a str,
        }
        let body = serde_json::to_value(Authenticated {
            client_id: "id",
            secret: "s3cret",
            body: &Request { access_token: "tok" },
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"client_id": "id", "secret": "s3cret", "access_token": "tok"})
        );
    }
}
