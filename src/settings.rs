// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::ConfigError;
use crate::models::AccessToken;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "BankConnector", "bank-connector"));

pub const CLIENT_ID_VAR: &str = "PLAID_CLIENT_ID";
pub const SECRET_VAR: &str = "PLAID_SECRET";
pub const ENV_VAR: &str = "PLAID_ENV";
pub const ACCESS_TOKEN_VAR: &str = "PLAID_ACCESS_TOKEN";

const LOCAL_ENV_FILE: &str = ".env";
const CONFIG_ENV_FILE: &str = "bank-connector.env";

const PLAID_SANDBOX_BASE: &str = "https://sandbox.plaid.com";
const PLAID_DEVELOPMENT_BASE: &str = "https://development.plaid.com";
const PLAID_PRODUCTION_BASE: &str = "https://production.plaid.com";

/// Where settings variables come from. Lets tests validate settings without
/// touching the process environment.
pub trait SettingsSource {
    fn var(&self, key: &str) -> Option<String>;
}

impl SettingsSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => PLAID_SANDBOX_BASE,
            Environment::Development => PLAID_DEVELOPMENT_BASE,
            Environment::Production => PLAID_PRODUCTION_BASE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Environment::Sandbox),
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct Settings {
    pub client_id: String,
    secret: String,
    pub environment: Environment,
    pub access_token: Option<AccessToken>,
}

impl Settings {
    /// Process environment layered over the first override file found:
    /// `./.env`, then `bank-connector.env` in the platform config dir.
    pub fn load() -> Result<Self, ConfigError> {
        let vars = match default_env_file() {
            Some(path) => read_env_file(&path)?,
            None => HashMap::new(),
        };
        Self::from_source(&with_process_env(vars))
    }

    /// Like [`Settings::load`], but with an explicit override file which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let vars = read_env_file(path)?;
        Self::from_source(&with_process_env(vars))
    }

    pub fn from_source(source: &impl SettingsSource) -> Result<Self, ConfigError> {
        let client_id = required(source, CLIENT_ID_VAR)?;
        let secret = required(source, SECRET_VAR)?;
        let environment = match source.var(ENV_VAR) {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };
        let access_token = source
            .var(ACCESS_TOKEN_VAR)
            .filter(|t| !t.is_empty())
            .map(AccessToken::new);

        Ok(Settings {
            client_id,
            secret,
            environment,
            access_token,
        })
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn environment_endpoint(&self) -> &'static str {
        self.environment.base_url()
    }

    pub fn require_access_token(&self) -> Result<&AccessToken, ConfigError> {
        self.access_token
            .as_ref()
            .ok_or(ConfigError::MissingAccessToken)
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("client_id", &self.client_id)
            .field("secret", &"*****")
            .field("environment", &self.environment)
            .field("access_token", &self.access_token)
            .finish()
    }
}

fn required(source: &impl SettingsSource, key: &'static str) -> Result<String, ConfigError> {
    source
        .var(key)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField(key))
}

pub fn default_env_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_ENV_FILE);
    if local.is_file() {
        return Some(local);
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)?;
    let in_config = proj.config_dir().join(CONFIG_ENV_FILE);
    in_config.is_file().then_some(in_config)
}

pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_file_error = |source| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };
    log::debug!("Reading settings from {}", path.display());
    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
        let (key, value) = item.map_err(env_file_error)?;
        vars.insert(key, value);
    }
    Ok(vars)
}

// Process variables win over values from the override file.
fn with_process_env(mut vars: HashMap<String, String>) -> HashMap<String, String> {
    vars.extend(
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
    );
    vars
}
