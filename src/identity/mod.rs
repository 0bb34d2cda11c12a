//! Identity management and role-based authorisation.
//!
//! This module owns user records with mixed local/OAuth credentials, local
//! password verification, atomic OAuth resolve-or-create, and the
//! administrator-gated account management operations. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
