//! # warden-approle
//!
//! Keeps a declared AppRole role in sync with the role stored on the server.
//!
//! - [`payload`] decides which fields a create or update sends
//! - [`RoleLifecycle`] drives create, read, update and delete against any
//!   [`warden_client::Logical`] implementation
//! - reads detect drift: a role deleted out of band drops its local identity
//!   instead of failing

pub mod cidr;
mod decode;
mod error;
mod lifecycle;
pub mod payload;
mod record;

pub use error::{LifecycleError, Operation};
pub use lifecycle::RoleLifecycle;
pub use record::RoleRecord;
