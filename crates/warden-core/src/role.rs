//! AppRole role entity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::path;
use crate::token::TokenFields;

/// Default auth mount for AppRole.
pub const DEFAULT_MOUNT: &str = "approle";

fn default_mount() -> String {
    DEFAULT_MOUNT.to_string()
}

const fn default_bind_secret_id() -> bool {
    true
}

/// A role under an AppRole auth mount.
///
/// Used both as the declared desired state and as the last-known state read
/// back from the server. `mount` and `name` determine the role's path and
/// never change for a given identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Auth mount name, without surrounding slashes.
    #[serde(rename = "backend", default = "default_mount")]
    pub mount: String,

    #[serde(rename = "role_name")]
    pub name: String,

    /// RoleID stored at the `role-id` sub-path. Generated server-side when
    /// not declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,

    /// Whether a SecretID is required at login.
    #[serde(default = "default_bind_secret_id")]
    pub bind_secret_id: bool,

    #[serde(default)]
    pub secret_id_bound_cidrs: BTreeSet<String>,

    /// Uses per SecretID. 0 is unlimited.
    #[serde(default)]
    pub secret_id_num_uses: u64,

    /// SecretID lifetime in seconds.
    #[serde(default)]
    pub secret_id_ttl: u64,

    #[serde(flatten)]
    pub token: TokenFields,
}

impl Role {
    /// A role with default settings under `mount`.
    #[must_use]
    pub fn new(mount: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mount: mount.into(),
            name: name.into(),
            role_id: None,
            bind_secret_id: default_bind_secret_id(),
            secret_id_bound_cidrs: BTreeSet::new(),
            secret_id_num_uses: 0,
            secret_id_ttl: 0,
            token: TokenFields::default(),
        }
        .normalized()
    }

    /// Canonical remote path, which doubles as the role's identity.
    #[must_use]
    pub fn path(&self) -> String {
        path::compose(&self.mount, &self.name)
    }

    /// Trim slashes from the mount, as the server would.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.mount = self.mount.trim_matches('/').to_string();
        self
    }

    /// Check the fields that make up the role's identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the mount or the name is empty
    /// after trimming slashes.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.mount.trim_matches('/').is_empty() {
            return Err(CoreError::Validation("backend must not be empty".into()));
        }
        if self.name.trim_matches('/').is_empty() {
            return Err(CoreError::Validation(
                "role_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::token::TokenType;

    #[test]
    fn new_role_has_defaults() {
        let role = Role::new("/approle/", "web");
        assert_eq!(role.mount, "approle");
        assert!(role.bind_secret_id);
        assert_eq!(role.secret_id_num_uses, 0);
        assert!(role.role_id.is_none());
        assert_eq!(role.path(), "auth/approle/role/web");
    }

    #[test]
    fn deserializes_declared_surface_with_defaults() {
        let role: Role = toml::from_str(
            r#"
role_name = "web"
secret_id_num_uses = 5
secret_id_bound_cidrs = ["10.0.0.0/8"]
token_policies = ["default", "web"]
token_type = "batch"
"#,
        )
        .unwrap();

        assert_eq!(role.mount, DEFAULT_MOUNT);
        assert_eq!(role.name, "web");
        assert!(role.bind_secret_id);
        assert_eq!(role.secret_id_num_uses, 5);
        assert!(role.secret_id_bound_cidrs.contains("10.0.0.0/8"));
        assert_eq!(role.token.token_policies.len(), 2);
        assert_eq!(role.token.token_type, TokenType::Batch);
    }

    #[test]
    fn normalized_trims_mount() {
        let mut role = Role::new("approle", "web");
        role.mount = "/team/approle/".into();
        assert_eq!(role.normalized().mount, "team/approle");
    }

    #[test]
    fn validate_rejects_empty_identity() {
        assert!(Role::new("approle", "web").validate().is_ok());
        assert!(matches!(
            Role::new("/", "web").validate(),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            Role::new("approle", "").validate(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn serialization_roundtrip_keeps_token_fields() {
        let mut role = Role::new("approle", "web");
        role.token.token_ttl = 300;
        role.role_id = Some("abc".into());

        let json = serde_json::to_string(&role).unwrap();
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, role);
    }
}
