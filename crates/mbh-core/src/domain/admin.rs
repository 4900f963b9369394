// ============================================================================
// MBH Core - Admin Entity
// File: crates/mbh-core/src/domain/admin.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use mbh_security::SessionUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Admin {
    /// Identity carried by the session after login.
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}
