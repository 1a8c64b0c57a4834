//! Vault server connection settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VaultConfig {
    /// Server address (e.g., `https://vault.example.com:8200`).
    #[serde(default)]
    pub address: String,

    /// Token sent as `X-Vault-Token`.
    #[serde(default)]
    pub token: String,

    /// Enterprise namespace sent as `X-Vault-Namespace`. Empty means none.
    #[serde(default)]
    pub namespace: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            token: String::new(),
            namespace: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl VaultConfig {
    /// Check if the config has what a client needs to talk to the server.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.address.is_empty() && !self.token.is_empty()
    }

    /// Fail with [`ConfigError::NotConfigured`] unless [`Self::is_configured`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when address or token is empty.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "vault".into(),
            })
        }
    }

    /// Address without a trailing slash.
    #[must_use]
    pub fn base_address(&self) -> &str {
        self.address.trim_end_matches('/')
    }

    /// Namespace, if one is set.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        let ns = self.namespace.trim_matches('/');
        (!ns.is_empty()).then_some(ns)
    }

    /// Fill the token from a token file (as written by `vault login`).
    /// Missing or empty files leave the token untouched.
    pub fn apply_token_file(&mut self, path: &Path) {
        if let Ok(contents) = std::fs::read_to_string(path) {
            let token = contents.trim();
            if !token.is_empty() {
                self.token = token.to_string();
            }
        }
    }
}
