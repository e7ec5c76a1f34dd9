//! Envelope types exposed by the catalog API endpoints.

use serde::{Deserialize, Serialize};

/// Body of every error response and of the delete confirmation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
