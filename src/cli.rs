// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::fetcher::DEFAULT_DAYS;
use crate::formatters::OutputFormat;
use crate::plaid::DEFAULT_INSTITUTION_ID;

pub fn build_cli() -> Command {
    Command::new("bank-connector")
        .about("Fetch and display bank transactions from Plaid's sandbox")
        .version(clap::crate_version!())
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .global(true)
                .value_name("PATH")
                .help("Read settings from this file instead of ./.env"),
        )
        .subcommand(
            Command::new("setup")
                .about("Create a sandbox access token for a test institution")
                .arg(
                    Arg::new("institution-id")
                        .long("institution-id")
                        .default_value(DEFAULT_INSTITUTION_ID)
                        .help("Plaid institution ID (default: First Platypus Bank)"),
                ),
        )
        .subcommand(
            Command::new("exchange-token")
                .about("Exchange a public token obtained elsewhere for an access token")
                .arg(
                    Arg::new("public-token")
                        .long("public-token")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("test-connection")
                .about("Check that the configured access token is still valid"),
        )
        .subcommand(
            Command::new("fetch-transactions")
                .about("Fetch and display bank transactions")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u32))
                        .conflicts_with_all(["start-date", "end-date"])
                        .help(format!("Number of days to fetch (default: {DEFAULT_DAYS})")),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(OutputFormat::NAMES)
                        .ignore_case(true)
                        .default_value("table")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("start-date")
                        .long("start-date")
                        .value_name("YYYY-MM-DD")
                        .requires("end-date"),
                )
                .arg(
                    Arg::new("end-date")
                        .long("end-date")
                        .value_name("YYYY-MM-DD")
                        .requires("start-date"),
                )
                .arg(
                    Arg::new("quiet")
                        .long("quiet")
                        .short('q')
                        .action(ArgAction::SetTrue)
                        .help("Do not print progress messages"),
                ),
        )
}
