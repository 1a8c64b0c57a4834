//! Write payloads for role mutations.
//!
//! Each payload struct has `Option` fields. Only `Some` fields are
//! serialized, and the server merges what it receives into the stored role,
//! so leaving a field out keeps its remote value.
//!
//! On create every field with a value is sent. On update only the fields that
//! differ from the last state read from the server are sent; a field cleared
//! in the declaration goes out as its zero value so the server resets it.

mod role;
mod token;

pub use role::RoleWrite;
pub use token::TokenWrite;

use std::collections::BTreeSet;

use warden_core::Role;

/// Which lifecycle call the payload is for.
#[derive(Debug, Clone, Copy)]
pub enum WriteMode<'a> {
    Create,
    /// Diff against the last-known persisted state.
    Update { prior: &'a Role },
}

/// RoleID to write on update: set in the declaration and different from what
/// the server holds. A RoleID left out of the declaration is server-managed
/// and never cleared.
#[must_use]
pub fn identifier_change<'a>(desired: &'a Role, prior: &Role) -> Option<&'a str> {
    desired
        .role_id
        .as_deref()
        .filter(|id| !id.is_empty() && prior.role_id.as_deref() != Some(*id))
}

/// RoleID to write on create.
#[must_use]
pub fn declared_identifier(desired: &Role) -> Option<&str> {
    desired.role_id.as_deref().filter(|id| !id.is_empty())
}

fn nonzero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

fn non_empty(set: &BTreeSet<String>) -> Option<Vec<String>> {
    (!set.is_empty()).then(|| list(set))
}

fn list(set: &BTreeSet<String>) -> Vec<String> {
    set.iter().cloned().collect()
}

fn changed<T: PartialEq + Clone>(desired: &T, prior: &T) -> Option<T> {
    (desired != prior).then(|| desired.clone())
}

fn changed_set(desired: &BTreeSet<String>, prior: &BTreeSet<String>) -> Option<Vec<String>> {
    (desired != prior).then(|| list(desired))
}
