//! Adapter implementations of the identity ports.

mod argon2;
pub mod memory;
pub mod postgres;

pub use argon2::Argon2PasswordHasher;
