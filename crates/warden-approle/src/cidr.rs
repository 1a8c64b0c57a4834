//! Checks on bound CIDR fields after a read.
//!
//! The server keeps CIDR blocks exactly as written. A block with host bits
//! set (`10.0.0.1/24`) is accepted but matches the whole network, which is
//! rarely what was meant, so it is reported as a warning. Entries that are
//! neither an address nor a network are errors.

use std::collections::BTreeSet;
use std::net::IpAddr;

use ipnetwork::IpNetwork;
use warden_core::{Diagnostic, Role};

/// Check every bound CIDR field of `role`.
#[must_use]
pub fn check_cidrs(role: &Role) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_field(
        "secret_id_bound_cidrs",
        &role.secret_id_bound_cidrs,
        &mut diagnostics,
    );
    check_field(
        "token_bound_cidrs",
        &role.token.token_bound_cidrs,
        &mut diagnostics,
    );
    diagnostics
}

fn check_field(field: &str, cidrs: &BTreeSet<String>, out: &mut Vec<Diagnostic>) {
    out.extend(cidrs.iter().filter_map(|cidr| check_one(field, cidr)));
}

fn check_one(field: &str, cidr: &str) -> Option<Diagnostic> {
    if !cidr.contains('/') {
        return match cidr.parse::<IpAddr>() {
            Ok(_) => None,
            Err(_) => Some(invalid(field, cidr)),
        };
    }
    match cidr.parse::<IpNetwork>() {
        Ok(network) if network.ip() != network.network() => Some(Diagnostic::warning(
            field,
            format!(
                "{cidr:?} has host bits set and matches the whole network {}/{}",
                network.network(),
                network.prefix()
            ),
        )),
        Ok(_) => None,
        Err(_) => Some(invalid(field, cidr)),
    }
}

fn invalid(field: &str, cidr: &str) -> Diagnostic {
    Diagnostic::error(field, format!("{cidr:?} is not a valid IP address or CIDR block"))
}
