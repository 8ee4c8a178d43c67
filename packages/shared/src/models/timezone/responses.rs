use serde::{Deserialize, Serialize};

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed!";
pub const USER_NOT_FOUND: &str = "user-not-found";
pub const TIMEZONE_SAVED: &str = "Timezone saved successfully!";
pub const TIMEZONE_NOT_SAVED: &str = "Error saving timezone!";
pub const INVALID_TIMEZONE: &str = "Invalid timezone!";
pub const SERVICE_UNAVAILABLE: &str = "Service unavailable!";
pub const REQUEST_TIMED_OUT: &str = "Request timed out!";

/// Fixed-shape body shared by every status reply of the timezone endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}
