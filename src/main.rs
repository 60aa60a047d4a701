// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use bank_connector::errors::{self, ErrorKind};
use bank_connector::settings::Settings;
use bank_connector::{cli, commands};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli::build_cli().get_matches();
    let command = matches.subcommand_name().unwrap_or_default().to_string();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&command, &err);
            ExitCode::from(ErrorKind::classify(&err).exit_code())
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let load_settings = || match matches.get_one::<String>("env-file") {
        Some(path) => Settings::load_from(Path::new(path)),
        None => Settings::load(),
    };

    match matches.subcommand() {
        Some(("setup", sub)) => commands::setup::handle(&load_settings()?, sub)?,
        Some(("exchange-token", sub)) => {
            commands::setup::handle_exchange(&load_settings()?, sub)?
        }
        Some(("test-connection", _)) => commands::connection::handle(&load_settings()?)?,
        Some(("fetch-transactions", sub)) => commands::fetch::handle(&load_settings()?, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn report(command: &str, err: &anyhow::Error) {
    let kind = ErrorKind::classify(err);
    eprintln!("{}: {}", kind.prefix(), err);
    if let Some(hint) = errors::hint(command, err) {
        eprintln!("Hint: {}", hint);
    }
    if kind == ErrorKind::Unexpected {
        log::debug!("{:?}", err);
    }
}
