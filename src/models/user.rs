use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One document per user in the `users` collection, keyed by the identity
/// provider's uid. Created on first sign-in; `last_login` is refreshed on
/// every subsequent sign-in and `is_admin` is mutated only via the admin
/// panel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub uid: String,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    // Only present for email/password accounts; never sent to clients
    #[serde(rename = "passwordHash", skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(rename = "failedSignins")]
    pub failed_signins: Option<i32>,
    // We always want these fields, but have them optional so we can set them in the code
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastLogin")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Client-facing view of a user, stripped of credentials.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSession {
    pub uid: String,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastLogin")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<UserDocument> for UserSession {
    fn from(user: UserDocument) -> Self {
        UserSession {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            is_admin: user.is_admin,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}
