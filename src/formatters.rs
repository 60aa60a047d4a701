// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rendering of transactions for the terminal.
//!
//! All functions here are pure: they build a `String` and leave printing to
//! the caller. Whether ANSI colors are emitted is decided by the `colors`
//! argument, never by the terminal the process happens to run in.

use std::fmt::Display;
use std::str::FromStr;

use comfy_table::{Cell, CellAlignment, Color};
use console::{StyledObject, style};
use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::utils::pretty_table;

pub const NO_TRANSACTIONS: &str = "No transactions found.";
const TABLE_TITLE: &str = "Bank Transactions";
const NO_MERCHANT: &str = "N/A";
const UNCATEGORIZED: &str = "Uncategorized";
const TABLE_CATEGORY_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    List,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["table", "list", "json"];
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "list" => Ok(OutputFormat::List),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow::anyhow!(
                "Unknown format: {} (use table|list|json)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub net_change: Decimal,
    pub count: usize,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    for txn in transactions {
        if txn.is_debit() {
            total_debits += txn.amount;
        } else {
            total_credits += txn.amount.abs();
        }
    }
    Summary {
        total_debits,
        total_credits,
        net_change: total_credits - total_debits,
        count: transactions.len(),
    }
}

/// `-$42.50` for debits, `+$10.00` for credits, without color.
pub fn format_amount(amount: Decimal) -> String {
    if amount > Decimal::ZERO {
        format!("-${:.2}", amount)
    } else {
        format!("+${:.2}", amount.abs())
    }
}

fn paint<D: Display>(text: D, colors: bool) -> StyledObject<D> {
    style(text).force_styling(colors)
}

fn styled_amount(amount: Decimal, colors: bool) -> String {
    let text = paint(format_amount(amount), colors);
    if amount > Decimal::ZERO {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

fn format_net(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

fn merchant_label(txn: &Transaction) -> &str {
    txn.merchant_name.as_deref().unwrap_or(NO_MERCHANT)
}

fn category_label(txn: &Transaction) -> String {
    if txn.category.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        txn.category
            .iter()
            .take(TABLE_CATEGORY_DEPTH)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn empty_notice(colors: bool) -> String {
    format!("{}\n", paint(NO_TRANSACTIONS, colors).yellow())
}

pub fn render_table(transactions: &[Transaction], colors: bool) -> String {
    if transactions.is_empty() {
        return empty_notice(colors);
    }

    let rows: Vec<Vec<Cell>> = transactions
        .iter()
        .map(|txn| {
            let amount = Cell::new(format_amount(txn.amount))
                .set_alignment(CellAlignment::Right)
                .fg(if txn.is_debit() { Color::Red } else { Color::Green });
            let status = if txn.pending {
                Cell::new("Pending").fg(Color::Yellow)
            } else {
                Cell::new("Posted").fg(Color::Green)
            };
            vec![
                Cell::new(&txn.date).fg(Color::Cyan),
                amount,
                Cell::new(&txn.description),
                Cell::new(merchant_label(txn)).fg(Color::Blue),
                Cell::new(category_label(txn)).fg(Color::Green),
                status,
            ]
        })
        .collect();
    let mut table = pretty_table(
        &["Date", "Amount", "Description", "Merchant", "Category", "Status"],
        rows,
    );
    if colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    let summary = summarize(transactions);
    let lines = [
        paint(TABLE_TITLE, colors).bold().magenta().to_string(),
        table.to_string(),
        String::new(),
        paint("Summary:", colors).bold().to_string(),
        format!(
            "  Total Debits:  {}",
            paint(format!("-${:.2}", summary.total_debits), colors).red()
        ),
        format!(
            "  Total Credits: {}",
            paint(format!("+${:.2}", summary.total_credits), colors).green()
        ),
        format!("  Net Change:    {}", format_net(summary.net_change)),
        format!("  Transactions:  {}", summary.count),
    ];
    lines.join("\n") + "\n"
}

pub fn render_list(transactions: &[Transaction], colors: bool) -> String {
    if transactions.is_empty() {
        return empty_notice(colors);
    }

    let mut out = String::new();
    for (i, txn) in transactions.iter().enumerate() {
        let pending = if txn.pending {
            format!(" {}", paint("(Pending)", colors).yellow())
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{}. {} | {} | {}{}\n",
            i + 1,
            txn.date,
            styled_amount(txn.amount, colors),
            txn.description,
            pending
        ));
        if let Some(merchant) = &txn.merchant_name {
            out.push_str(&format!("   Merchant: {}\n", merchant));
        }
        if !txn.category.is_empty() {
            out.push_str(&format!("   Category: {}\n", txn.category.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON array; `[]` when there is nothing to show.
pub fn render_json(transactions: &[Transaction]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(transactions)
}

pub fn render(
    format: OutputFormat,
    transactions: &[Transaction],
    colors: bool,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Table => render_table(transactions, colors),
        OutputFormat::List => render_list(transactions, colors),
        OutputFormat::Json => render_json(transactions)? + "\n",
    })
}
