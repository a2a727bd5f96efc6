use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Unknown or missing roles get the least privilege.
    pub fn from_claim(role: Option<&str>) -> Self {
        match role {
            Some("admin") => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

/// The signed-in back-office user, as carried by the request.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserSession {
    pub fn new(user_id: String, email: String, role: UserRole, exp: usize) -> Self {
        UserSession {
            user_id,
            email,
            role,
            expires_at: Utc.timestamp_opt(exp as i64, 0).single(),
        }
    }
}
