//! Shared token tuning fields.
//!
//! Every auth backend role carries the same bundle of `token_*` settings.
//! They are declared alongside the role and merged into the same payload.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of token issued on login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    #[default]
    Default,
    Service,
    Batch,
    DefaultService,
    DefaultBatch,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Service => "service",
            Self::Batch => "batch",
            Self::DefaultService => "default-service",
            Self::DefaultBatch => "default-batch",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token settings attached to a role. Zero, `false` and empty sets mean
/// "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenFields {
    /// Incremental lifetime of issued tokens, in seconds.
    pub token_ttl: u64,
    /// Maximum lifetime of issued tokens, in seconds.
    pub token_max_ttl: u64,
    /// Hard cap on token lifetime regardless of renewals, in seconds.
    pub token_explicit_max_ttl: u64,
    /// Period for periodic tokens, in seconds.
    pub token_period: u64,
    /// Maximum number of uses per token. 0 is unlimited.
    pub token_num_uses: u64,
    pub token_policies: BTreeSet<String>,
    /// CIDR blocks allowed to use issued tokens.
    pub token_bound_cidrs: BTreeSet<String>,
    pub token_no_default_policy: bool,
    pub token_type: TokenType,
}
