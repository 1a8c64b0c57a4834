//! Lifecycle error types.

use std::fmt;

use thiserror::Error;
use warden_client::ClientError;
use warden_core::CoreError;

/// Lifecycle entry point an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from role lifecycle operations. Every variant names the role path
/// it concerns, except when the record had none.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The local identity is not an `auth/<mount>/role/<name>` path.
    #[error("invalid path {path:?} for AppRole auth backend role: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: CoreError,
    },

    /// The record has no local identity to operate on.
    #[error("{op}: AppRole auth backend role has no local identity")]
    MissingIdentity { op: Operation },

    /// The declared role failed validation.
    #[error("invalid AppRole auth backend role: {0}")]
    InvalidRole(#[source] CoreError),

    #[error("{op}: error writing AppRole auth backend role {path:?}: {source}")]
    RemoteWrite {
        op: Operation,
        path: String,
        #[source]
        source: ClientError,
    },

    #[error("error reading AppRole auth backend role {path:?}: {source}")]
    RemoteRead {
        path: String,
        #[source]
        source: ClientError,
    },

    #[error("error deleting AppRole auth backend role {path:?}: {source}")]
    RemoteDelete {
        path: String,
        #[source]
        source: ClientError,
    },

    /// The role exists remotely and locally, but its RoleID was not written.
    /// Repair with an update, not a recreate.
    #[error("AppRole auth backend role {path:?} was created but writing its RoleID failed: {source}")]
    PartialCreate {
        path: String,
        #[source]
        source: ClientError,
    },

    /// The primary update succeeded; the RoleID write did not.
    #[error("error updating AppRole auth backend role {path:?}'s RoleID: {source}")]
    IdentifierWrite {
        path: String,
        #[source]
        source: ClientError,
    },

    #[error("error reading AppRole auth backend role {path:?} RoleID: {source}")]
    IdentifierRead {
        path: String,
        #[source]
        source: ClientError,
    },

    /// The server returned data that does not fit the role model.
    #[error("unexpected data for AppRole auth backend role {path:?}: {reason}")]
    Decode { path: String, reason: String },

    #[error("{op}: could not encode payload for {path:?}: {reason}")]
    Encode {
        op: Operation,
        path: String,
        reason: String,
    },
}

impl LifecycleError {
    /// Entry point that failed.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::MissingIdentity { op } | Self::RemoteWrite { op, .. } | Self::Encode { op, .. } => {
                *op
            }
            Self::InvalidRole(_) | Self::PartialCreate { .. } => Operation::Create,
            Self::InvalidPath { .. }
            | Self::RemoteRead { .. }
            | Self::IdentifierRead { .. }
            | Self::Decode { .. } => Operation::Read,
            Self::IdentifierWrite { .. } => Operation::Update,
            Self::RemoteDelete { .. } => Operation::Delete,
        }
    }

    /// Role path the error concerns.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingIdentity { .. } | Self::InvalidRole(_) => None,
            Self::InvalidPath { path, .. }
            | Self::RemoteWrite { path, .. }
            | Self::RemoteRead { path, .. }
            | Self::RemoteDelete { path, .. }
            | Self::PartialCreate { path, .. }
            | Self::IdentifierWrite { path, .. }
            | Self::IdentifierRead { path, .. }
            | Self::Decode { path, .. }
            | Self::Encode { path, .. } => Some(path),
        }
    }
}
