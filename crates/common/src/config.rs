//! Client configuration loaded from environment variables.
//!
//! Environment variables:
//! - `EMPCHAIN_LEDGER_URL`: base URL of the ledger RPC service (required)
//! - `EMPCHAIN_GATEWAY_URL`: base URL of the file-store gateway (required)
//! - `EMPCHAIN_ACCOUNT`: caller account address (required)
//! - `EMPCHAIN_TIMEOUT_MS`: per-request timeout in milliseconds
//!   (optional, default 10000)

use thiserror::Error;

use crate::record::AccountId;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Error loading or validating [`ClientConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Connection settings for the ledger and file-store clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the ledger RPC service.
    pub ledger_url: String,
    /// Base URL of the content-addressed file-store gateway.
    pub gateway_url: String,
    /// The caller's account identity.
    pub account: AccountId,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Reads configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ledger_url = require("EMPCHAIN_LEDGER_URL")?;
        let gateway_url = require("EMPCHAIN_GATEWAY_URL")?;
        let account_raw = require("EMPCHAIN_ACCOUNT")?;

        let timeout_ms = match std::env::var("EMPCHAIN_TIMEOUT_MS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "EMPCHAIN_TIMEOUT_MS",
                reason: format!("not a number: {raw}"),
            })?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        let config = ClientConfig {
            ledger_url,
            gateway_url,
            account: AccountId::new(account_raw),
            timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the loaded values before any client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("EMPCHAIN_LEDGER_URL", &self.ledger_url),
            ("EMPCHAIN_GATEWAY_URL", &self.gateway_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    name,
                    reason: format!("must start with http:// or https://, got {url}"),
                });
            }
        }
        if self.account.is_unset() {
            return Err(ConfigError::Invalid {
                name: "EMPCHAIN_ACCOUNT",
                reason: "caller account must not be the unset sentinel".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "EMPCHAIN_TIMEOUT_MS",
                reason: "timeout must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}
