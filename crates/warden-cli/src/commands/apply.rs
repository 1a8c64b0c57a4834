use std::path::Path;

use serde::Serialize;
use warden_approle::{RoleLifecycle, RoleRecord};
use warden_client::Logical;
use warden_core::{Diagnostic, Role};

use super::plan::Action;
use crate::cli::{FileArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output;
use crate::roles;
use crate::state::State;

#[derive(Debug, Serialize)]
pub struct ApplyOutcome {
    pub path: String,
    pub action: Action,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ApplyOutcome {
    fn failed(&self) -> bool {
        !self.ok || self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub async fn handle(args: &FileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let declared = roles::load(&args.file)?;
    let mut state = State::load(&ctx.state_path)?;
    let outcomes = apply_roles(&ctx.client, &declared, &mut state, &ctx.state_path).await?;
    output(&outcomes, flags.format)?;

    let failed = outcomes.iter().filter(|o| o.failed()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} roles failed to apply", outcomes.len());
    }
    Ok(())
}

/// Converge every declared role, one at a time, saving state after each.
/// Tracked roles that are no longer declared are then deleted, so a changed
/// mount or name replaces the old role.
///
/// A failing role does not stop the others. Errors writing the state file
/// do.
pub async fn apply_roles<C: Logical + ?Sized>(
    client: &C,
    declared: &[Role],
    state: &mut State,
    state_path: &Path,
) -> anyhow::Result<Vec<ApplyOutcome>> {
    let lifecycle = RoleLifecycle::new(client);
    let mut outcomes = Vec::with_capacity(declared.len());

    for desired in declared {
        let path = desired.path();
        let mut record = state.record(&path, desired);
        let (action, result) = converge(&lifecycle, &mut record, desired).await;

        state.put(&path, &record);
        state.save(state_path)?;

        let outcome = match result {
            Ok(diagnostics) => {
                tracing::info!(%path, ?action, "applied approle role");
                ApplyOutcome {
                    path,
                    action,
                    ok: true,
                    error: None,
                    diagnostics,
                }
            }
            Err(error) => {
                tracing::error!(%path, ?action, %error, "failed to apply approle role");
                ApplyOutcome {
                    path,
                    action,
                    ok: false,
                    error: Some(error.to_string()),
                    diagnostics: Vec::new(),
                }
            }
        };
        outcomes.push(outcome);
    }

    for path in state.orphans(declared) {
        let mut record = RoleRecord::with_id(path.as_str());
        let outcome = match lifecycle.delete(&mut record).await {
            Ok(()) => {
                state.remove(&path);
                tracing::info!(%path, "deleted undeclared approle role");
                ApplyOutcome {
                    path,
                    action: Action::Delete,
                    ok: true,
                    error: None,
                    diagnostics: Vec::new(),
                }
            }
            Err(error) => {
                tracing::error!(%path, %error, "failed to delete undeclared approle role");
                ApplyOutcome {
                    path,
                    action: Action::Delete,
                    ok: false,
                    error: Some(error.to_string()),
                    diagnostics: Vec::new(),
                }
            }
        };
        state.save(state_path)?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

async fn converge<C: Logical + ?Sized>(
    lifecycle: &RoleLifecycle<'_, C>,
    record: &mut RoleRecord,
    desired: &Role,
) -> (Action, Result<Vec<Diagnostic>, warden_approle::LifecycleError>) {
    if record.is_present() {
        if let Err(error) = lifecycle.read(record).await {
            return (Action::Update, Err(error));
        }
    }
    if record.is_present() {
        (Action::Update, lifecycle.update(record, desired).await)
    } else {
        (Action::Create, lifecycle.create(record, desired).await)
    }
}
