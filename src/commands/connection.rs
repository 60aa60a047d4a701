// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::ItemInfo;
use crate::plaid::PlaidSession;
use crate::settings::Settings;

pub fn handle(settings: &Settings) -> Result<()> {
    eprintln!("Testing Plaid API connection...");
    let access_token = settings.require_access_token()?;
    let session = PlaidSession::new(settings).context("Failed to build HTTP client")?;
    let item = session.get_item_info(access_token)?;

    println!("Connection successful!");
    println!();
    print!("{}", describe_item(&item));
    Ok(())
}

pub fn describe_item(item: &ItemInfo) -> String {
    format!(
        "Institution ID: {}\nItem ID: {}\nAvailable products: {}\n",
        item.institution_id.as_deref().unwrap_or("unknown"),
        item.item_id,
        item.available_products.join(", ")
    )
}
