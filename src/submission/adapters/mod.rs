//! Adapter implementations of the submission ports.

pub mod memory;
pub mod postgres;
