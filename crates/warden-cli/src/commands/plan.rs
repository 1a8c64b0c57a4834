use serde::Serialize;
use serde_json::{Map, Value};
use warden_approle::payload::{self, RoleWrite};
use warden_approle::{RoleLifecycle, RoleRecord};
use warden_client::Logical;
use warden_core::{Diagnostic, Role};

use crate::cli::{FileArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output;
use crate::roles;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Noop,
    Delete,
}

#[derive(Debug, Serialize)]
pub struct PlannedChange {
    pub path: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

pub async fn handle(args: &FileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let declared = roles::load(&args.file)?;
    let state = State::load(&ctx.state_path)?;
    let changes = plan_roles(&ctx.client, &declared, &state).await?;
    output(&changes, flags.format)
}

/// Refresh each tracked role and work out what apply would send. Tracked
/// roles missing from `declared` are planned for deletion. Nothing is
/// written, remotely or to state.
pub async fn plan_roles<C: Logical + ?Sized>(
    client: &C,
    declared: &[Role],
    state: &State,
) -> anyhow::Result<Vec<PlannedChange>> {
    let lifecycle = RoleLifecycle::new(client);
    let mut changes = Vec::with_capacity(declared.len());
    for desired in declared {
        let path = desired.path();
        let mut record = state.record(&path, desired);
        let diagnostics = if record.is_present() {
            lifecycle.read(&mut record).await?
        } else {
            Vec::new()
        };
        changes.push(plan_one(path, desired, &record, diagnostics)?);
    }
    changes.extend(state.orphans(declared).into_iter().map(|path| PlannedChange {
        path,
        action: Action::Delete,
        payload: Map::new(),
        role_id: None,
        diagnostics: Vec::new(),
    }));
    Ok(changes)
}

fn plan_one(
    path: String,
    desired: &Role,
    record: &RoleRecord,
    diagnostics: Vec<Diagnostic>,
) -> anyhow::Result<PlannedChange> {
    let (action, write, role_id) = if record.is_present() {
        let write = RoleWrite::for_update(desired, &record.role);
        let role_id = payload::identifier_change(desired, &record.role);
        let action = if write.is_empty() && role_id.is_none() {
            Action::Noop
        } else {
            Action::Update
        };
        (action, write, role_id)
    } else {
        (
            Action::Create,
            RoleWrite::for_create(desired),
            payload::declared_identifier(desired),
        )
    };

    Ok(PlannedChange {
        path,
        action,
        payload: write.into_data()?,
        role_id: role_id.map(String::from),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use warden_client::MemoryStore;

    use super::*;

    fn web() -> Role {
        Role::new("approle", "web")
    }

    #[tokio::test]
    async fn untracked_role_plans_create() {
        let store = MemoryStore::new();
        let mut role = web();
        role.role_id = Some("abc".into());

        let changes = plan_roles(&store, &[role], &State::default()).await.unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].action, Action::Create);
        assert_eq!(changes[0].role_id.as_deref(), Some("abc"));
        assert_eq!(
            Value::Object(changes[0].payload.clone()),
            json!({"bind_secret_id": true, "token_type": "default"})
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn unchanged_role_plans_noop() {
        let store = MemoryStore::new();
        let path = "auth/approle/role/web";
        store.insert(path, json!({"bind_secret_id": true}).as_object().unwrap().clone());
        let mut state = State::default();
        let mut record = RoleRecord::new(web());
        record.id = Some(path.into());
        state.put(path, &record);

        let changes = plan_roles(&store, &[web()], &state).await.unwrap();

        assert_eq!(changes[0].action, Action::Noop);
        assert!(changes[0].payload.is_empty());
        assert_eq!(
            Value::Object(store.get(path).unwrap()),
            json!({"bind_secret_id": true})
        );
    }

    #[tokio::test]
    async fn changed_field_plans_minimal_update() {
        let store = MemoryStore::new();
        let path = "auth/approle/role/web";
        store.insert(path, json!({"bind_secret_id": true, "secret_id_ttl": 100}).as_object().unwrap().clone());
        let mut state = State::default();
        let mut record = RoleRecord::new(web());
        record.id = Some(path.into());
        state.put(path, &record);

        let mut desired = web();
        desired.secret_id_ttl = 100;
        desired.secret_id_num_uses = 3;
        let changes = plan_roles(&store, &[desired], &state).await.unwrap();

        assert_eq!(changes[0].action, Action::Update);
        assert_eq!(
            Value::Object(changes[0].payload.clone()),
            json!({"secret_id_num_uses": 3})
        );
    }

    #[tokio::test]
    async fn drifted_role_plans_create() {
        let store = MemoryStore::new();
        let path = "auth/approle/role/web";
        let mut state = State::default();
        let mut record = RoleRecord::new(web());
        record.id = Some(path.into());
        state.put(path, &record);

        let changes = plan_roles(&store, &[web()], &state).await.unwrap();

        assert_eq!(changes[0].action, Action::Create);
        assert!(state.resources.contains_key(path));
    }

    #[tokio::test]
    async fn renamed_role_plans_create_and_delete() {
        let store = MemoryStore::new();
        let old = "auth/approle/role/web";
        store.insert(old, json!({"bind_secret_id": true}).as_object().unwrap().clone());
        let mut state = State::default();
        let mut record = RoleRecord::new(web());
        record.id = Some(old.into());
        state.put(old, &record);

        let renamed = Role::new("approle", "web2");
        let changes = plan_roles(&store, &[renamed], &state).await.unwrap();

        let actions: Vec<(&str, Action)> =
            changes.iter().map(|c| (c.path.as_str(), c.action)).collect();
        assert_eq!(
            actions,
            vec![
                ("auth/approle/role/web2", Action::Create),
                (old, Action::Delete),
            ]
        );
        assert!(store.get(old).is_some());
        assert!(store.calls().is_empty());
    }
}
