//! Local state file: the last known record of every managed role.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_approle::RoleRecord;
use warden_core::Role;

pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: Option<String>,
    pub role: Role,
    pub updated_at: DateTime<Utc>,
}

/// Managed roles keyed by their declared path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<String, StateEntry>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resources: BTreeMap::new(),
        }
    }
}

impl State {
    /// Load the state at `path`. A missing file is an empty state.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read state file {}", path.display()))?;
        let state: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse state file {}", path.display()))?;
        if state.version != STATE_VERSION {
            anyhow::bail!(
                "unsupported state file version {} in {} (expected {STATE_VERSION})",
                state.version,
                path.display()
            );
        }
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let rendered = serde_json::to_string_pretty(self)?;
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write state file {}", path.display()))?;
        tracing::debug!(path = %path.display(), roles = self.resources.len(), "saved state");
        Ok(())
    }

    /// Record for `key`, or a fresh one for `desired` if the role is not
    /// tracked.
    #[must_use]
    pub fn record(&self, key: &str, desired: &Role) -> RoleRecord {
        self.resources.get(key).map_or_else(
            || RoleRecord::new(desired.clone()),
            |entry| RoleRecord {
                id: entry.id.clone(),
                role: entry.role.clone(),
            },
        )
    }

    /// Store `record` under `key`, or drop the entry once it has no identity.
    pub fn put(&mut self, key: &str, record: &RoleRecord) {
        if record.id.is_none() {
            self.resources.remove(key);
            return;
        }
        self.resources.insert(
            key.to_string(),
            StateEntry {
                id: record.id.clone(),
                role: record.role.clone(),
                updated_at: Utc::now(),
            },
        );
    }

    /// Tracked paths that `declared` no longer contains, as after a rename
    /// of the mount or name.
    #[must_use]
    pub fn orphans(&self, declared: &[Role]) -> Vec<String> {
        let wanted: BTreeSet<String> = declared.iter().map(Role::path).collect();
        self.resources
            .keys()
            .filter(|key| !wanted.contains(*key))
            .cloned()
            .collect()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.resources.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn present(path: &str) -> RoleRecord {
        let mut record = RoleRecord::new(Role::new("approle", "web"));
        record.id = Some(path.to_string());
        record
    }

    #[test]
    fn missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = State::load(&dir.path().join("state.json")).unwrap();
        assert_eq!(state, State::default());
    }

    #[test]
    fn save_then_load_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");

        let mut state = State::default();
        state.put("auth/approle/role/web", &present("auth/approle/role/web"));
        state.save(&path).unwrap();

        let loaded = State::load(&path).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.resources.len(), 1);
    }

    #[test]
    fn put_without_identity_drops_entry() {
        let mut state = State::default();
        let key = "auth/approle/role/web";
        state.put(key, &present(key));

        let mut gone = present(key);
        gone.id = None;
        state.put(key, &gone);
        assert!(state.resources.is_empty());
    }

    #[test]
    fn record_falls_back_to_desired_role() {
        let state = State::default();
        let desired = Role::new("approle", "web");
        let record = state.record("auth/approle/role/web", &desired);
        assert_eq!(record, RoleRecord::new(desired));
    }

    #[test]
    fn orphans_are_tracked_but_undeclared() {
        let mut state = State::default();
        state.put("auth/approle/role/web", &present("auth/approle/role/web"));
        state.put("auth/approle/role/api", &present("auth/approle/role/api"));

        let declared = [Role::new("approle", "api"), Role::new("approle", "web2")];
        assert_eq!(state.orphans(&declared), vec!["auth/approle/role/web".to_string()]);
        assert_eq!(state.orphans(&[]).len(), 2);
    }

    #[test]
    fn rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"version": 7, "resources": {}}"#).unwrap();

        let err = State::load(&path).unwrap_err();
        assert!(err.to_string().contains("version 7"), "{err}");
    }

    #[test]
    fn rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(State::load(&path).is_err());
    }
}
