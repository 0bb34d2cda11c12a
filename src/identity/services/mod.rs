//! Application services for identity management.

mod accounts;

pub use accounts::{
    IdentityService, IdentityServiceError, IdentityServiceResult, RegisterLocalRequest,
};
