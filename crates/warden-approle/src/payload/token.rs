//! Token field payload.

use serde::Serialize;
use warden_core::{TokenFields, TokenType};

use super::{changed, changed_set, non_empty, nonzero};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_max_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_explicit_max_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_period: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_num_uses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_policies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_bound_cidrs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_no_default_policy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
}

impl TokenWrite {
    /// Every token field that has a value. `token_type` always has one.
    #[must_use]
    pub fn for_create(desired: &TokenFields) -> Self {
        Self {
            token_ttl: nonzero(desired.token_ttl),
            token_max_ttl: nonzero(desired.token_max_ttl),
            token_explicit_max_ttl: nonzero(desired.token_explicit_max_ttl),
            token_period: nonzero(desired.token_period),
            token_num_uses: nonzero(desired.token_num_uses),
            token_policies: non_empty(&desired.token_policies),
            token_bound_cidrs: non_empty(&desired.token_bound_cidrs),
            token_no_default_policy: desired.token_no_default_policy.then_some(true),
            token_type: Some(desired.token_type),
        }
    }

    /// Token fields that differ from `prior`.
    #[must_use]
    pub fn for_update(desired: &TokenFields, prior: &TokenFields) -> Self {
        Self {
            token_ttl: changed(&desired.token_ttl, &prior.token_ttl),
            token_max_ttl: changed(&desired.token_max_ttl, &prior.token_max_ttl),
            token_explicit_max_ttl: changed(
                &desired.token_explicit_max_ttl,
                &prior.token_explicit_max_ttl,
            ),
            token_period: changed(&desired.token_period, &prior.token_period),
            token_num_uses: changed(&desired.token_num_uses, &prior.token_num_uses),
            token_policies: changed_set(&desired.token_policies, &prior.token_policies),
            token_bound_cidrs: changed_set(&desired.token_bound_cidrs, &prior.token_bound_cidrs),
            token_no_default_policy: changed(
                &desired.token_no_default_policy,
                &prior.token_no_default_policy,
            ),
            token_type: changed(&desired.token_type, &prior.token_type),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
