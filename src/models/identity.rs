use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered or logged-in user record, as mirrored into the session slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// The single account the placeholder login accepts.
    pub fn demo() -> Self {
        let now = Utc::now();
        Identity {
            id: String::from("1"),
            email: String::from("demo@example.com"),
            username: String::from("demo_user"),
            first_name: Some(String::from("Demo")),
            last_name: Some(String::from("User")),
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
