use serde::Serialize;
use warden_approle::{RoleLifecycle, RoleRecord};
use warden_client::Logical;

use crate::cli::{GlobalFlags, PathArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::roles;
use crate::state::State;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub path: String,
    pub deleted: bool,
    /// Whether the role was in the state file.
    pub tracked: bool,
}

pub async fn handle(args: &PathArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = roles::resolve_path(&args.path, &ctx.config.general.default_mount);
    let mut state = State::load(&ctx.state_path)?;
    let response = delete_role(&ctx.client, &path, &mut state).await?;
    if response.tracked {
        state.save(&ctx.state_path)?;
    }
    output(&response, flags.format)
}

/// Delete the role at `path` and stop tracking it. The state entry is kept
/// if the delete fails.
pub async fn delete_role<C: Logical + ?Sized>(
    client: &C,
    path: &str,
    state: &mut State,
) -> anyhow::Result<DeleteResponse> {
    let mut record = RoleRecord::with_id(path);
    RoleLifecycle::new(client).delete(&mut record).await?;
    let tracked = state.remove(path);
    Ok(DeleteResponse {
        path: path.to_string(),
        deleted: true,
        tracked,
    })
}
