//! Assignment registry services.

mod registry;

pub use registry::{
    AssignmentService, AssignmentServiceError, AssignmentServiceResult, CreateTaskRequest,
};
