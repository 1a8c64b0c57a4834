//! Create, read, update and delete of AppRole roles.
//!
//! Every operation is a strict sequence of remote calls: the role path first,
//! then its `role-id` sub-path. Nothing is retried or rolled back; a failure
//! ends the operation and leaves the record as described on each method.
//! Create and update finish with a read so the record mirrors the server, not
//! the request that was sent.

use serde_json::{Map, Value};
use warden_client::{ClientError, Logical};
use warden_core::{Diagnostic, Role, path};

use crate::cidr;
use crate::decode;
use crate::error::{LifecycleError, Operation};
use crate::payload::{self, RoleWrite, WriteMode};
use crate::record::RoleRecord;

/// Lifecycle driver for roles reached through `client`.
pub struct RoleLifecycle<'c, C: Logical + ?Sized> {
    client: &'c C,
}

impl<'c, C: Logical + ?Sized> RoleLifecycle<'c, C> {
    #[must_use]
    pub const fn new(client: &'c C) -> Self {
        Self { client }
    }

    /// Create `desired` remotely and adopt it into `record`.
    ///
    /// On success `record.id` is the role path and `record.role` holds the
    /// state read back from the server.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::InvalidRole`] before any remote call
    /// - [`LifecycleError::RemoteWrite`] if the role write fails; `record`
    ///   is untouched
    /// - [`LifecycleError::PartialCreate`] if the RoleID write fails; the
    ///   role exists and `record.id` is already set
    /// - any error from [`Self::read`]
    pub async fn create(
        &self,
        record: &mut RoleRecord,
        desired: &Role,
    ) -> Result<Vec<Diagnostic>, LifecycleError> {
        desired.validate().map_err(LifecycleError::InvalidRole)?;
        let path = desired.path();
        let data = encode(Operation::Create, &path, RoleWrite::build(desired, WriteMode::Create))?;

        tracing::debug!(%path, fields = data.len(), "writing approle role");
        if let Err(source) = self.client.write(&path, data).await {
            tracing::warn!(%path, %source, "approle role create failed");
            return Err(LifecycleError::RemoteWrite {
                op: Operation::Create,
                path,
                source,
            });
        }
        record.id = Some(path.clone());
        record.role = desired.clone().normalized();
        // Not written yet; a later update must still see it as a change.
        record.role.role_id = None;
        tracing::debug!(%path, "wrote approle role");

        if let Some(role_id) = payload::declared_identifier(desired) {
            if let Err(source) = self.write_identifier(&path, role_id).await {
                tracing::warn!(%path, %source, "approle role created without its RoleID");
                return Err(LifecycleError::PartialCreate { path, source });
            }
        }

        self.read(record).await
    }

    /// Refresh `record` from the server.
    ///
    /// If the role no longer exists, `record.id` is cleared and no error is
    /// returned. Otherwise all fields are overwritten from the server; the
    /// RoleID is only replaced when its sub-path has a value. Returned
    /// diagnostics never discard the refreshed state.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::MissingIdentity`] / [`LifecycleError::InvalidPath`]
    ///   before any remote call
    /// - [`LifecycleError::RemoteRead`] / [`LifecycleError::IdentifierRead`]
    ///   on transport or API failure
    /// - [`LifecycleError::Decode`] if the response does not fit a role
    pub async fn read(&self, record: &mut RoleRecord) -> Result<Vec<Diagnostic>, LifecycleError> {
        let path = record
            .id
            .clone()
            .ok_or(LifecycleError::MissingIdentity { op: Operation::Read })?;
        let (mount, name) = match (path::decompose_mount(&path), path::decompose_name(&path)) {
            (Ok(mount), Ok(name)) => (mount, name),
            (Err(source), _) | (_, Err(source)) => {
                return Err(LifecycleError::InvalidPath { path, source });
            }
        };

        tracing::debug!(%path, "reading approle role");
        let secret = match self.client.read(&path).await {
            Ok(secret) => secret,
            Err(source) => return Err(LifecycleError::RemoteRead { path, source }),
        };
        let Some(secret) = secret else {
            tracing::warn!(%path, "approle role not found, removing from state");
            record.id = None;
            return Ok(Vec::new());
        };

        let mut role = record.role.clone();
        role.mount = mount;
        role.name = name;
        if let Err(e) = decode::apply_role_data(&mut role, &secret.data) {
            return Err(LifecycleError::Decode {
                path,
                reason: e.to_string(),
            });
        }
        record.role = role;
        tracing::debug!(%path, "read approle role");

        let id_path = path::identifier_path(&path);
        let id_secret = match self.client.read(&id_path).await {
            Ok(secret) => secret,
            Err(source) => return Err(LifecycleError::IdentifierRead { path, source }),
        };
        if let Some(id_secret) = id_secret {
            match decode::role_id(&id_secret.data) {
                Ok(Some(role_id)) => record.role.role_id = Some(role_id),
                Ok(None) => {}
                Err(e) => {
                    return Err(LifecycleError::Decode {
                        path: id_path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut diagnostics: Vec<Diagnostic> = secret
            .warnings
            .iter()
            .map(|warning| Diagnostic::warning("response", warning.clone()))
            .collect();
        diagnostics.extend(cidr::check_cidrs(&record.role));
        for diagnostic in &diagnostics {
            tracing::warn!(%path, %diagnostic, "approle role check");
        }
        Ok(diagnostics)
    }

    /// Push the fields of `desired` that differ from `record.role`.
    ///
    /// `desired` must describe the same role as `record.id`; a changed mount
    /// or name is a different role and needs a create.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::MissingIdentity`] before any remote call
    /// - [`LifecycleError::RemoteWrite`] if the role write fails; `record`
    ///   keeps its identity and previous state
    /// - [`LifecycleError::IdentifierWrite`] if the role was updated but the
    ///   RoleID write failed
    /// - any error from [`Self::read`]
    pub async fn update(
        &self,
        record: &mut RoleRecord,
        desired: &Role,
    ) -> Result<Vec<Diagnostic>, LifecycleError> {
        let path = record
            .id
            .clone()
            .ok_or(LifecycleError::MissingIdentity {
                op: Operation::Update,
            })?;
        let write = RoleWrite::build(desired, WriteMode::Update { prior: &record.role });
        let data = encode(Operation::Update, &path, write)?;

        tracing::debug!(%path, fields = data.len(), "updating approle role");
        if let Err(source) = self.client.write(&path, data).await {
            tracing::warn!(%path, %source, "approle role update failed");
            return Err(LifecycleError::RemoteWrite {
                op: Operation::Update,
                path,
                source,
            });
        }
        tracing::debug!(%path, "updated approle role");

        if let Some(role_id) = payload::identifier_change(desired, &record.role) {
            if let Err(source) = self.write_identifier(&path, role_id).await {
                tracing::warn!(%path, %source, "approle role RoleID update failed");
                return Err(LifecycleError::IdentifierWrite { path, source });
            }
        }

        self.read(record).await
    }

    /// Delete the role. A role that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::MissingIdentity`] before any remote call
    /// - [`LifecycleError::RemoteDelete`] for any failure other than not
    ///   found; `record.id` is kept so the delete can be retried
    pub async fn delete(&self, record: &mut RoleRecord) -> Result<(), LifecycleError> {
        let path = record
            .id
            .clone()
            .ok_or(LifecycleError::MissingIdentity {
                op: Operation::Delete,
            })?;

        tracing::debug!(%path, "deleting approle role");
        match self.client.delete(&path).await {
            Ok(()) => {
                tracing::debug!(%path, "deleted approle role");
                record.id = None;
                Ok(())
            }
            Err(source) if source.is_not_found() => {
                tracing::debug!(%path, "approle role not found, removing from state");
                record.id = None;
                Ok(())
            }
            Err(source) => {
                tracing::warn!(%path, %source, "approle role delete failed");
                Err(LifecycleError::RemoteDelete { path, source })
            }
        }
    }

    /// Adopt an existing role by path.
    ///
    /// The returned record has no identity if nothing exists at `path`.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::read`].
    pub async fn import(
        &self,
        path: &str,
    ) -> Result<(RoleRecord, Vec<Diagnostic>), LifecycleError> {
        let mut record = RoleRecord::with_id(path);
        let diagnostics = self.read(&mut record).await?;
        Ok((record, diagnostics))
    }

    async fn write_identifier(&self, path: &str, role_id: &str) -> Result<(), ClientError> {
        let id_path = path::identifier_path(path);
        tracing::debug!(path = %id_path, "writing approle role RoleID");
        let mut data = Map::new();
        data.insert("role_id".to_string(), Value::String(role_id.to_string()));
        self.client.write(&id_path, data).await?;
        tracing::debug!(path = %id_path, "wrote approle role RoleID");
        Ok(())
    }
}

fn encode(
    op: Operation,
    path: &str,
    write: RoleWrite,
) -> Result<Map<String, Value>, LifecycleError> {
    write.into_data().map_err(|e| LifecycleError::Encode {
        op,
        path: path.to_string(),
        reason: e.to_string(),
    })
}
