use serde::{Deserialize, Serialize};
use warden_core::Role;

/// Local view of one managed role: its identity (the role path, once the
/// role exists remotely) and the last state read from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: Option<String>,
    pub role: Role,
}

impl RoleRecord {
    /// A record for a role that has not been created yet.
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self { id: None, role }
    }

    /// A record that only knows its identity, as for an import. A read fills
    /// in the rest.
    #[must_use]
    pub fn with_id(path: impl Into<String>) -> Self {
        Self {
            id: Some(path.into()),
            role: Role::new("", ""),
        }
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.id.is_some()
    }
}
