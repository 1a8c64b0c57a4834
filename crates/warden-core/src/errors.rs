//! Cross-cutting error types for Warden.
//!
//! Remote and lifecycle errors live in `warden-client` and `warden-approle`.
//! The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Warden crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A path did not match the expected `auth/<mount>/role/<name>` shape.
    #[error("no {component} found in path {path:?}")]
    NotFound {
        component: &'static str,
        path: String,
    },

    /// Declared data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
