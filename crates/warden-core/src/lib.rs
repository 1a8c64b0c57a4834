//! # warden-core
//!
//! Core types shared by every Warden crate:
//! - [`Role`] and the [`TokenFields`] bundle it carries
//! - canonical path composition and decomposition ([`path`])
//! - [`Diagnostic`] findings attached to successful operations
//! - cross-cutting [`CoreError`]

pub mod diagnostics;
pub mod errors;
pub mod path;
pub mod role;
pub mod token;

pub use diagnostics::{Diagnostic, Severity};
pub use errors::CoreError;
pub use role::Role;
pub use token::{TokenFields, TokenType};
