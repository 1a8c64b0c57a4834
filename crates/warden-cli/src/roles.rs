//! Declared roles, read from a TOML file of `[[role]]` tables.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use warden_core::{Role, path};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RolesFile {
    #[serde(default)]
    role: Vec<Role>,
}

/// Load and validate the roles declared in `file`.
pub fn load(file: &Path) -> anyhow::Result<Vec<Role>> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read roles file {}", file.display()))?;
    parse(&raw).with_context(|| format!("invalid roles file {}", file.display()))
}

fn parse(raw: &str) -> anyhow::Result<Vec<Role>> {
    let parsed: RolesFile = toml::from_str(raw)?;
    let mut seen = BTreeSet::new();
    let mut roles = Vec::with_capacity(parsed.role.len());
    for role in parsed.role {
        let role = role.normalized();
        role.validate()?;
        let path = role.path();
        if !seen.insert(path.clone()) {
            anyhow::bail!("role {path:?} is declared more than once");
        }
        roles.push(role);
    }
    Ok(roles)
}

/// Resolve a command line argument to a role path. A bare name is placed
/// under `default_mount`.
pub fn resolve_path(arg: &str, default_mount: &str) -> String {
    if arg.starts_with("auth/") {
        arg.to_string()
    } else {
        path::compose(default_mount, arg)
    }
}
