//! # warden-client
//!
//! Clients for the Vault logical API, the key/value surface every auth
//! backend exposes under `/v1/<path>`.
//!
//! Callers depend on the [`Logical`] trait only:
//! - [`VaultClient`] talks to a real server over HTTP
//! - [`MemoryStore`] keeps everything in process and records each call

mod error;
mod http;
pub mod memory;
mod vault;

pub use error::ClientError;
pub use memory::MemoryStore;
pub use vault::VaultClient;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Types ──────────────────────────────────────────────────────────

/// Response envelope returned by the logical API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub lease_id: String,
    /// Lease length in seconds.
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub renewable: bool,
    /// Payload. The server sends `null` for endpoints without data.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
}

impl Secret {
    /// Wrap a data map in an otherwise empty envelope.
    #[must_use]
    pub fn from_data(data: Map<String, Value>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Capability ─────────────────────────────────────────────────────

/// Read, write and delete access to logical paths.
#[async_trait]
pub trait Logical: Send + Sync {
    /// Write `data` to `path`. Fields missing from `data` keep their remote
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    async fn write(
        &self,
        path: &str,
        data: Map<String, Value>,
    ) -> Result<Option<Secret>, ClientError>;

    /// Read `path`. `Ok(None)` means nothing exists there.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    async fn read(&self, path: &str) -> Result<Option<Secret>, ClientError>;

    /// Delete `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure. A missing path
    /// yields an error for which [`ClientError::is_not_found`] is true.
    async fn delete(&self, path: &str) -> Result<(), ClientError>;
}
