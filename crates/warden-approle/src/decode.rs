//! Mapping of role read responses onto [`Role`].
//!
//! Missing and `null` values decode to the field's zero value, matching what
//! the server means by an unset field.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use warden_core::{Role, TokenFields, TokenType};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoleData {
    #[serde(deserialize_with = "null_as_default")]
    bind_secret_id: bool,
    #[serde(deserialize_with = "null_as_default")]
    secret_id_bound_cidrs: BTreeSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    secret_id_num_uses: u64,
    #[serde(deserialize_with = "null_as_default")]
    secret_id_ttl: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenData {
    #[serde(deserialize_with = "null_as_default")]
    token_ttl: u64,
    #[serde(deserialize_with = "null_as_default")]
    token_max_ttl: u64,
    #[serde(deserialize_with = "null_as_default")]
    token_explicit_max_ttl: u64,
    #[serde(deserialize_with = "null_as_default")]
    token_period: u64,
    #[serde(deserialize_with = "null_as_default")]
    token_num_uses: u64,
    #[serde(deserialize_with = "null_as_default")]
    token_policies: BTreeSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    token_bound_cidrs: BTreeSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    token_no_default_policy: bool,
    #[serde(deserialize_with = "null_as_default")]
    token_type: TokenType,
}

impl From<TokenData> for TokenFields {
    fn from(data: TokenData) -> Self {
        Self {
            token_ttl: data.token_ttl,
            token_max_ttl: data.token_max_ttl,
            token_explicit_max_ttl: data.token_explicit_max_ttl,
            token_period: data.token_period,
            token_num_uses: data.token_num_uses,
            token_policies: data.token_policies,
            token_bound_cidrs: data.token_bound_cidrs,
            token_no_default_policy: data.token_no_default_policy,
            token_type: data.token_type,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RoleIdData {
    #[serde(default)]
    role_id: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Overwrite the server-managed fields of `role` with the response data.
/// `mount`, `name` and `role_id` are left alone.
pub fn apply_role_data(role: &mut Role, data: &Map<String, Value>) -> Result<(), serde_json::Error> {
    let object = Value::Object(data.clone());
    let fields = RoleData::deserialize(&object)?;
    let token = TokenData::deserialize(&object)?;

    role.bind_secret_id = fields.bind_secret_id;
    role.secret_id_bound_cidrs = fields.secret_id_bound_cidrs;
    role.secret_id_num_uses = fields.secret_id_num_uses;
    role.secret_id_ttl = fields.secret_id_ttl;
    role.token = token.into();
    Ok(())
}

/// RoleID from a `role-id` read response.
pub fn role_id(data: &Map<String, Value>) -> Result<Option<String>, serde_json::Error> {
    let parsed = RoleIdData::deserialize(&Value::Object(data.clone()))?;
    Ok(parsed.role_id.filter(|id| !id.is_empty()))
}
