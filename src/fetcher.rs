// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Local, NaiveDate};

use crate::errors::{ApiError, FetchError};
use crate::models::{AccessToken, RawTransaction, Transaction};

pub const DEFAULT_DAYS: u32 = 30;

/// Anything that can hand back raw transactions for an inclusive date range.
pub trait TransactionSource {
    fn fetch_transactions(
        &self,
        access_token: &AccessToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawTransaction>, ApiError>;
}

pub struct TransactionFetcher<'a, S: TransactionSource> {
    source: &'a S,
}

impl<'a, S: TransactionSource> TransactionFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Transactions from the last `days` days up to today (local clock), newest first.
    pub fn recent_transactions(
        &self,
        access_token: &AccessToken,
        days: u32,
    ) -> Result<Vec<Transaction>, FetchError> {
        self.recent_transactions_as_of(access_token, days, Local::now().date_naive())
    }

    pub fn recent_transactions_as_of(
        &self,
        access_token: &AccessToken,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>, FetchError> {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or(FetchError::DaysOutOfRange { days, today })?;
        self.transactions_in_range(access_token, start, today)
    }

    pub fn transactions_in_range(
        &self,
        access_token: &AccessToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, FetchError> {
        if start > end {
            return Err(FetchError::InvalidRange { start, end });
        }
        let raw = self.source.fetch_transactions(access_token, start, end)?;
        let mut transactions: Vec<Transaction> = raw.into_iter().map(normalize).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }
}

pub fn normalize(raw: RawTransaction) -> Transaction {
    Transaction {
        transaction_id: raw.transaction_id,
        date: raw.date.to_iso_string(),
        amount: raw.amount,
        description: raw.name,
        merchant_name: raw.merchant_name,
        category: raw.category.unwrap_or_default(),
        pending: raw.pending,
    }
}

// ISO dates are fixed width, so string order is chronological. `sort_by` is
// stable: same-date transactions keep their upstream order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
