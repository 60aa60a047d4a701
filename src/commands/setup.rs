// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::{AccessToken, PublicToken};
use crate::plaid::{DEFAULT_INSTITUTION_ID, PlaidSession};
use crate::settings::{ACCESS_TOKEN_VAR, Settings};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let institution_id = m
        .get_one::<String>("institution-id")
        .map(|s| s.trim())
        .unwrap_or(DEFAULT_INSTITUTION_ID);

    eprintln!("Setting up Plaid {} connection...", settings.environment.as_str());
    let session = PlaidSession::new(settings).context("Failed to build HTTP client")?;

    eprintln!("Creating access token for institution: {}", institution_id);
    let access_token = session.create_sandbox_access_token(institution_id)?;

    println!();
    println!("Successfully created sandbox access token!");
    print_persist_instructions(&access_token);
    Ok(())
}

pub fn handle_exchange(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let public_token = m
        .get_one::<String>("public-token")
        .map(|s| PublicToken::new(s.trim()))
        .context("public token missing")?;

    let session = PlaidSession::new(settings).context("Failed to build HTTP client")?;
    let access_token = session.exchange_public_token(&public_token)?;

    println!("Exchanged public token for an access token.");
    print_persist_instructions(&access_token);
    Ok(())
}

pub fn persist_line(access_token: &AccessToken) -> String {
    format!("{}={}", ACCESS_TOKEN_VAR, access_token.get())
}

fn print_persist_instructions(access_token: &AccessToken) {
    println!();
    println!("Add this line to your .env file:");
    println!("{}", persist_line(access_token));
    println!();
    println!("Then run: bank-connector fetch-transactions");
}
