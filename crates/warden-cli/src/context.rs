use std::path::PathBuf;

use anyhow::Context;
use warden_client::VaultClient;
use warden_config::WardenConfig;

use crate::cli::GlobalFlags;

/// Everything a command needs: resolved config, the Vault client and where
/// state lives.
pub struct AppContext {
    pub config: WardenConfig,
    pub client: VaultClient,
    pub state_path: PathBuf,
}

impl AppContext {
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let config = load_config(flags)?;
        config
            .vault
            .require()
            .context("set VAULT_ADDR and VAULT_TOKEN, or [vault] in .warden/config.toml")?;
        let client = VaultClient::new(&config.vault).context("failed to build vault client")?;
        let state_path = flags
            .state
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.state_path));

        tracing::debug!(
            address = %config.vault.base_address(),
            state = %state_path.display(),
            "initialized context"
        );
        Ok(Self {
            config,
            client,
            state_path,
        })
    }
}

fn load_config(flags: &GlobalFlags) -> anyhow::Result<WardenConfig> {
    match &flags.config {
        Some(path) => {
            let _ = dotenvy::dotenv();
            WardenConfig::load_from(path).map_err(anyhow::Error::from)
        }
        None => WardenConfig::load_with_dotenv().map_err(anyhow::Error::from),
    }
}
