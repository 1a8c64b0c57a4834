//! Role payload.

use serde::Serialize;
use serde_json::{Map, Value};
use warden_core::Role;

use super::token::TokenWrite;
use super::{WriteMode, changed, changed_set, non_empty, nonzero};

/// Fields sent to the role path. The RoleID is not part of it; it lives at
/// its own sub-path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind_secret_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id_bound_cidrs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id_num_uses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id_ttl: Option<u64>,
    #[serde(flatten)]
    pub token: TokenWrite,
}

impl RoleWrite {
    #[must_use]
    pub fn build(desired: &Role, mode: WriteMode<'_>) -> Self {
        match mode {
            WriteMode::Create => Self::for_create(desired),
            WriteMode::Update { prior } => Self::for_update(desired, prior),
        }
    }

    /// Every field that has a value. `bind_secret_id` defaults to true, so it
    /// is always sent.
    #[must_use]
    pub fn for_create(desired: &Role) -> Self {
        Self {
            bind_secret_id: Some(desired.bind_secret_id),
            secret_id_bound_cidrs: non_empty(&desired.secret_id_bound_cidrs),
            secret_id_num_uses: nonzero(desired.secret_id_num_uses),
            secret_id_ttl: nonzero(desired.secret_id_ttl),
            token: TokenWrite::for_create(&desired.token),
        }
    }

    /// Fields that differ from `prior`.
    #[must_use]
    pub fn for_update(desired: &Role, prior: &Role) -> Self {
        Self {
            bind_secret_id: changed(&desired.bind_secret_id, &prior.bind_secret_id),
            secret_id_bound_cidrs: changed_set(
                &desired.secret_id_bound_cidrs,
                &prior.secret_id_bound_cidrs,
            ),
            secret_id_num_uses: changed(&desired.secret_id_num_uses, &prior.secret_id_num_uses),
            secret_id_ttl: changed(&desired.secret_id_ttl, &prior.secret_id_ttl),
            token: TokenWrite::for_update(&desired.token, &prior.token),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Flatten into the key/value map sent to the server.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload does not encode to a JSON
    /// object.
    pub fn into_data(self) -> Result<Map<String, Value>, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}
