// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Missing or invalid local settings, detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0}. Get credentials from https://dashboard.plaid.com/")]
    MissingField(&'static str),

    #[error("Invalid PLAID_ENV: {0}. Must be 'sandbox', 'development', or 'production'")]
    InvalidEnvironment(String),

    #[error("No access token found. Run 'setup' first to create one")]
    MissingAccessToken,

    #[error("Failed to read settings file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Any failure signaled by (or while talking to) the Plaid API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} rejected the request ({status}): {message}")]
    Rejected {
        endpoint: &'static str,
        status: u16,
        error_type: Option<String>,
        error_code: Option<String>,
        message: String,
    },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Plaid's `error_code` (e.g. `INVALID_ACCESS_TOKEN`), when the upstream supplied one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// The access token itself was refused, so a fresh `setup` is the remedy.
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self.error_code(),
            Some("INVALID_ACCESS_TOKEN" | "ITEM_LOGIN_REQUIRED" | "ITEM_NOT_FOUND")
        )
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("cannot look back {days} days from {today}")]
    DaysOutOfRange { days: u32, today: chrono::NaiveDate },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// How a failed command is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Api,
    Unexpected,
}

impl ErrorKind {
    pub fn classify(err: &anyhow::Error) -> ErrorKind {
        for cause in err.chain() {
            if cause.is::<ConfigError>() {
                return ErrorKind::Configuration;
            }
            if cause.is::<ApiError>() {
                return ErrorKind::Api;
            }
            if let Some(fetch) = cause.downcast_ref::<FetchError>() {
                return match fetch {
                    FetchError::Api(_) => ErrorKind::Api,
                    FetchError::InvalidRange { .. } | FetchError::DaysOutOfRange { .. } => {
                        ErrorKind::Configuration
                    }
                };
            }
        }
        ErrorKind::Unexpected
    }

    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::Api => 3,
            ErrorKind::Unexpected => 1,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "Configuration error",
            ErrorKind::Api => "Plaid API error",
            ErrorKind::Unexpected => "Unexpected error",
        }
    }
}

/// One-line advice printed under a failed command's error message.
pub fn hint(command: &str, err: &anyhow::Error) -> Option<&'static str> {
    for cause in err.chain() {
        if let Some(config) = cause.downcast_ref::<ConfigError>() {
            return match config {
                ConfigError::MissingAccessToken => None,
                _ => Some("make sure your .env file sets PLAID_CLIENT_ID and PLAID_SECRET"),
            };
        }
        let api = match cause.downcast_ref::<FetchError>() {
            Some(FetchError::Api(api)) => Some(api),
            Some(_) => return None,
            None => cause.downcast_ref::<ApiError>(),
        };
        if let Some(api) = api {
            if command == "setup" || command == "exchange-token" {
                return Some("check your credentials at https://dashboard.plaid.com/");
            }
            return api
                .is_token_failure()
                .then_some("your access token may be invalid. Try running 'setup' again.");
        }
    }
    None
}
