use serde::Serialize;
use warden_approle::RoleLifecycle;
use warden_client::Logical;
use warden_core::{Diagnostic, Role};

use crate::cli::{GlobalFlags, ReadArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::roles;
use crate::state::State;

#[derive(Debug, Serialize)]
pub struct ReadResponse {
    pub path: String,
    pub role: Role,
    pub saved: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

pub async fn handle(args: &ReadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = roles::resolve_path(&args.path, &ctx.config.general.default_mount);
    let mut state = args
        .save
        .then(|| State::load(&ctx.state_path))
        .transpose()?;
    let response = import(&ctx.client, &path, state.as_mut()).await?;
    if let Some(state) = &state {
        state.save(&ctx.state_path)?;
    }
    output(&response, flags.format)
}

/// Read the role at `path`, tracking it in `state` when given.
pub async fn import<C: Logical + ?Sized>(
    client: &C,
    path: &str,
    state: Option<&mut State>,
) -> anyhow::Result<ReadResponse> {
    let (record, diagnostics) = RoleLifecycle::new(client).import(path).await?;
    if !record.is_present() {
        anyhow::bail!("no approle role found at {path:?}");
    }

    let saved = state.is_some();
    if let Some(state) = state {
        state.put(path, &record);
    }
    Ok(ReadResponse {
        path: path.to_string(),
        role: record.role,
        saved,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use warden_client::MemoryStore;

    use super::*;

    const PATH: &str = "auth/approle/role/web";

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert(
            PATH,
            json!({"secret_id_ttl": 60, "token_policies": ["web"]})
                .as_object()
                .unwrap()
                .clone(),
        );
        store
    }

    #[tokio::test]
    async fn import_returns_server_state() {
        let store = seeded();
        let response = import(&store, PATH, None).await.unwrap();

        assert_eq!(response.role.name, "web");
        assert_eq!(response.role.secret_id_ttl, 60);
        assert!(!response.saved);
    }

    #[tokio::test]
    async fn import_with_state_tracks_role() {
        let store = seeded();
        let mut state = State::default();

        import(&store, PATH, Some(&mut state)).await.unwrap();

        let entry = &state.resources[PATH];
        assert_eq!(entry.id.as_deref(), Some(PATH));
        assert!(entry.role.token.token_policies.contains("web"));
    }

    #[tokio::test]
    async fn import_of_missing_role_fails() {
        let store = MemoryStore::new();
        let mut state = State::default();

        let err = import(&store, PATH, Some(&mut state)).await.unwrap_err();

        assert!(err.to_string().contains("no approle role"), "{err}");
        assert!(state.resources.is_empty());
    }
}
