// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// A single bank transaction as shown to the user.
///
/// `amount` keeps Plaid's sign convention: positive is money leaving the
/// account (debit), negative is money coming in (credit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub date: String, // YYYY-MM-DD
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub merchant_name: Option<String>,
    pub category: Vec<String>,
    pub pending: bool,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// A transaction record as returned by `/transactions/get`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub transaction_id: String,
    pub date: RawDate,
    pub amount: Decimal,
    pub name: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Calendar(NaiveDate),
    Text(String),
}

impl RawDate {
    pub fn to_iso_string(&self) -> String {
        match self {
            RawDate::Calendar(d) => d.format("%Y-%m-%d").to_string(),
            RawDate::Text(s) => s.clone(),
        }
    }
}

impl From<NaiveDate> for RawDate {
    fn from(d: NaiveDate) -> Self {
        RawDate::Calendar(d)
    }
}

/// The linked item behind an access token, from `/item/get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemInfo {
    pub item_id: String,
    #[serde(default)]
    pub institution_id: Option<String>,
    #[serde(default)]
    pub available_products: Vec<String>,
    #[serde(default)]
    pub billed_products: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> AccessToken {
        AccessToken(access_token.into())
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(*****)")
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicToken(String);

impl PublicToken {
    pub fn new(public_token: impl Into<String>) -> PublicToken {
        PublicToken(public_token.into())
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Debug for PublicToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicToken(*****)")
    }
}
