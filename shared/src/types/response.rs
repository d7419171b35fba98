//! API response shapes shared between the HTTP layer and its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error payload returned by every failing endpoint.
///
/// `code` is a stable machine-readable identifier (e.g. `DATE_RANGE_CONFLICT`);
/// `message` is human-readable and may change between releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// The inner error description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                timestamp: Utc::now(),
            },
        }
    }
}
