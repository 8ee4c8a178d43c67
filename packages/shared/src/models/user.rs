use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user document as held in the users collection.
///
/// Records are created during onboarding; this service only reads them and
/// writes `timezone`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub timezone: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl UserRecord {
    pub fn new(username: String, profile_picture_url: Option<String>) -> Self {
        UserRecord {
            id: Uuid::new_v4().to_string(),
            username,
            created_at: Utc::now(),
            timezone: None,
            profile_picture_url,
        }
    }
}
