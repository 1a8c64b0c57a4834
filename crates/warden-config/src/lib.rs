//! # warden-config
//!
//! Layered configuration loading for Warden using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WARDEN_*` prefix, `__` as separator)
//! 2. The standard `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_NAMESPACE` variables
//! 3. Project-level `.warden/config.toml`
//! 4. User-level `~/.config/warden/config.toml`
//! 5. Built-in defaults
//!
//! When no token is configured anywhere, `~/.vault-token` is used.
//!
//! # Usage
//!
//! ```no_run
//! use warden_config::WardenConfig;
//!
//! let config = WardenConfig::load_with_dotenv().expect("config");
//! if config.vault.is_configured() {
//!     println!("Vault address: {}", config.vault.address);
//! }
//! ```

mod error;
mod general;
mod vault;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use vault::VaultConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard Vault environment variables and the config keys they fill.
const VAULT_ENV: [(&str, &str); 3] = [
    ("VAULT_ADDR", "vault.address"),
    ("VAULT_TOKEN", "vault.token"),
    ("VAULT_NAMESPACE", "vault.namespace"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl WardenConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit project config file in place of
    /// `.warden/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the file does not exist, or
    /// any error from [`Self::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: "config".into(),
                reason: format!("{} does not exist", path.display()),
            });
        }
        Self::extract(&Self::figment_with(path))
    }

    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract()?;
        if config.vault.token.is_empty() {
            if let Some(path) = Self::token_file_path() {
                config.vault.apply_token_file(&path);
            }
        }
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(Path::new(".warden/config.toml"))
    }

    fn figment_with(local_path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Standard VAULT_* variables
        figment = figment.merge(
            Env::raw()
                .only(&VAULT_ENV.map(|(var, _)| var))
                .map(|key| {
                    VAULT_ENV
                        .iter()
                        .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                        .map_or("vault.unknown", |(_, target)| *target)
                        .into()
                }),
        );

        // Layer 4: Warden environment variables (highest priority)
        figment.merge(Env::prefixed("WARDEN_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("warden").join("config.toml"))
    }

    /// Path to the token written by `vault login`.
    fn token_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".vault-token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = WardenConfig::default();
        assert!(!config.vault.is_configured());
        assert_eq!(config.general.default_mount, "approle");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: WardenConfig = WardenConfig::figment().extract()?;
            assert_eq!(config.vault.timeout_secs, 10);
            assert_eq!(config.general.state_path, ".warden/state.json");
            Ok(())
        });
    }
}
