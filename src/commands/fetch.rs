// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::fetcher::{DEFAULT_DAYS, TransactionFetcher, TransactionSource};
use crate::formatters::{self, OutputFormat};
use crate::models::{AccessToken, Transaction};
use crate::plaid::PlaidSession;
use crate::settings::Settings;
use crate::utils::parse_date;

/// Which dates to ask Plaid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Recent { days: u32 },
    Range { start: NaiveDate, end: NaiveDate },
}

impl Window {
    pub fn describe(&self) -> String {
        match self {
            Window::Recent { days } => format!("the last {} days", days),
            Window::Range { start, end } => format!("{} to {}", start, end),
        }
    }
}

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let window = window_from_matches(m)?;
    let format = format_from_matches(m)?;
    let quiet = m.get_flag("quiet");

    let access_token = settings.require_access_token()?;
    if !quiet {
        eprintln!("Fetching transactions for {}...", window.describe());
    }

    let session = PlaidSession::new(settings).context("Failed to build HTTP client")?;
    let transactions = fetch(&session, access_token, window)?;
    let colors = console::colors_enabled();
    print!("{}", formatters::render(format, &transactions, colors)?);

    if transactions.is_empty() && !quiet {
        eprintln!();
        eprintln!("No transactions found in the specified date range.");
    }
    Ok(())
}

pub fn window_from_matches(m: &clap::ArgMatches) -> Result<Window> {
    match (
        m.get_one::<String>("start-date"),
        m.get_one::<String>("end-date"),
    ) {
        (Some(start), Some(end)) => Ok(Window::Range {
            start: parse_date(start.trim())?,
            end: parse_date(end.trim())?,
        }),
        _ => Ok(Window::Recent {
            days: *m.get_one::<u32>("days").unwrap_or(&DEFAULT_DAYS),
        }),
    }
}

pub fn format_from_matches(m: &clap::ArgMatches) -> Result<OutputFormat> {
    m.get_one::<String>("format")
        .map(|s| s.parse::<OutputFormat>())
        .transpose()
        .map(Option::unwrap_or_default)
}

pub fn fetch<S: TransactionSource>(
    source: &S,
    access_token: &AccessToken,
    window: Window,
) -> Result<Vec<Transaction>> {
    let fetcher = TransactionFetcher::new(source);
    let transactions = match window {
        Window::Recent { days } => fetcher.recent_transactions(access_token, days)?,
        Window::Range { start, end } => fetcher.transactions_in_range(access_token, start, end)?,
    };
    Ok(transactions)
}
