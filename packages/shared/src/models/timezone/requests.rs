use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FetchUserRequest {
    pub uid: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SaveTimezoneRequest {
    pub uid: String,
    pub timezone: String,
}
