//! General application configuration.

use serde::{Deserialize, Serialize};
use warden_core::role::DEFAULT_MOUNT;

fn default_mount() -> String {
    DEFAULT_MOUNT.to_string()
}

fn default_state_path() -> String {
    ".warden/state.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Mount used for paths given without one on the command line.
    #[serde(default = "default_mount")]
    pub default_mount: String,

    /// Where the CLI keeps the local record of managed roles.
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_mount: default_mount(),
            state_path: default_state_path(),
        }
    }
}
