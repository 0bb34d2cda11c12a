//! Opaque attachment metadata shared by tasks and answers.

use serde::{Deserialize, Serialize};

/// Reference to an uploaded file held in external object storage.
///
/// The domain never interprets the contents; `location` is whatever key or
/// URL the storage collaborator assigned on upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name as supplied by the uploader.
    pub name: String,
    /// Storage location assigned on upload.
    pub location: String,
}

impl Attachment {
    /// Creates an attachment record.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}
