//! Canonical remote paths for AppRole roles.
//!
//! A role lives at `auth/<mount>/role/<name>` and its identifier at
//! `auth/<mount>/role/<name>/role-id`. The path is also the local identity
//! of a role, so decomposition must accept anything [`compose`] produces.

use crate::errors::CoreError;

const PREFIX: &str = "auth/";
const ROLE_SEGMENT: &str = "/role/";
const IDENTIFIER_SUFFIX: &str = "/role-id";

/// Build the canonical role path. Leading and trailing slashes are trimmed
/// from both components.
#[must_use]
pub fn compose(mount: &str, name: &str) -> String {
    format!(
        "{PREFIX}{}{ROLE_SEGMENT}{}",
        mount.trim_matches('/'),
        name.trim_matches('/')
    )
}

/// Path of the identifier sub-resource for a role path.
#[must_use]
pub fn identifier_path(path: &str) -> String {
    format!("{path}{IDENTIFIER_SUFFIX}")
}

/// Extract the mount from a role path.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the path is not shaped like
/// `auth/<mount>/role/<name>`.
pub fn decompose_mount(path: &str) -> Result<String, CoreError> {
    split(path)
        .map(|(mount, _)| mount.to_string())
        .ok_or_else(|| CoreError::NotFound {
            component: "backend",
            path: path.to_string(),
        })
}

/// Extract the role name from a role path.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the path is not shaped like
/// `auth/<mount>/role/<name>`.
pub fn decompose_name(path: &str) -> Result<String, CoreError> {
    split(path)
        .map(|(_, name)| name.to_string())
        .ok_or_else(|| CoreError::NotFound {
            component: "role",
            path: path.to_string(),
        })
}

/// Split at the last `/role/` with non-empty text on both sides, which is
/// where a greedy `^auth/(.+)/role/(.+)$` match would land.
fn split(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix(PREFIX)?;
    let bytes = rest.as_bytes();
    // Every offset, not just non-overlapping matches: in `a/role/role/` the
    // segment at 2 overlaps the one at 7.
    (0..rest.len())
        .rev()
        .filter(|&idx| bytes[idx..].starts_with(ROLE_SEGMENT.as_bytes()))
        .map(|idx| (&rest[..idx], &rest[idx + ROLE_SEGMENT.len()..]))
        .find(|(mount, name)| !mount.is_empty() && !name.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("approle", "web")]
    #[case("team/approle", "deployer")]
    #[case("a", "b")]
    #[case("ci-role", "role")]
    fn compose_then_decompose_roundtrips(#[case] mount: &str, #[case] name: &str) {
        let path = compose(mount, name);
        assert_eq!(decompose_mount(&path).unwrap(), mount);
        assert_eq!(decompose_name(&path).unwrap(), name);
    }

    #[test]
    fn compose_trims_slashes() {
        assert_eq!(compose("/m/", "/n/"), compose("m", "n"));
        assert_eq!(compose("//approle/", "web"), "auth/approle/role/web");
    }

    #[test]
    fn identifier_path_appends_role_id() {
        assert_eq!(
            identifier_path("auth/approle/role/web"),
            "auth/approle/role/web/role-id"
        );
    }

    #[test]
    fn split_prefers_last_role_segment() {
        let path = "auth/a/role/b/role/c";
        assert_eq!(decompose_mount(path).unwrap(), "a/role/b");
        assert_eq!(decompose_name(path).unwrap(), "c");
    }

    #[rstest]
    #[case("auth/a/role/role/", "a", "role/")]
    #[case("auth/a/role/role/role/x", "a/role/role", "x")]
    #[case("auth/x/role/role/role/", "x/role", "role/")]
    fn split_considers_overlapping_role_segments(
        #[case] path: &str,
        #[case] mount: &str,
        #[case] name: &str,
    ) {
        assert_eq!(decompose_mount(path).unwrap(), mount);
        assert_eq!(decompose_name(path).unwrap(), name);
    }

    #[test]
    fn split_backtracks_past_trailing_role_segment() {
        let path = "auth/a/role/b/role/";
        assert_eq!(decompose_mount(path).unwrap(), "a");
        assert_eq!(decompose_name(path).unwrap(), "b/role/");
    }

    #[rstest]
    #[case("not/a/valid/path")]
    #[case("")]
    #[case("auth/approle/role/")]
    #[case("auth//role/web")]
    #[case("sys/approle/role/web")]
    #[case("auth/approle/roles/web")]
    fn rejects_malformed_paths(#[case] path: &str) {
        assert!(matches!(
            decompose_mount(path),
            Err(CoreError::NotFound { component: "backend", .. })
        ));
        assert!(matches!(
            decompose_name(path),
            Err(CoreError::NotFound { component: "role", .. })
        ));
    }
}
