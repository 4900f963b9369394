// ============================================================================
// MBH Core - Activity Log Entity
// File: crates/mbh-core/src/domain/activity_log.rs
// Description: Append-only audit trail of admin actions
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mbh_shared::ClientInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Admin,
    Landlord,
    Tenant,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Landlord => "landlord",
            UserType::Tenant => "tenant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserType::Admin),
            "landlord" => Some(UserType::Landlord),
            "tenant" => Some(UserType::Tenant),
            _ => None,
        }
    }
}

/// Action names written to the activity log
pub mod activity_actions {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const VERIFY_LANDLORD: &str = "verify_landlord";
    pub const REJECT_LANDLORD: &str = "reject_landlord";
    pub const SUSPEND_LANDLORD: &str = "suspend_landlord";
    pub const ACTIVATE_LANDLORD: &str = "activate_landlord";
    pub const UPDATE_PAYMENT: &str = "update_payment";
    pub const VERIFY_HOUSE: &str = "verify_house";
    pub const UNVERIFY_HOUSE: &str = "unverify_house";
}

/// Stored activity row; `user_name` is resolved from the matching user table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    pub user_type: UserType,
    pub user_id: i64,
    pub action: String,
    pub description: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_type: UserType,
    pub user_id: i64,
    pub action: String,
    pub description: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewActivity {
    pub fn new(user_type: UserType, user_id: i64, action: impl Into<String>) -> Self {
        Self {
            user_type,
            user_id,
            action: action.into(),
            description: None,
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_client(mut self, client: &ClientInfo) -> Self {
        self.ip_address = client.ip_address.clone();
        self.user_agent = client.user_agent.clone();
        self
    }
}

/// The admin performing an action, with the request's client details.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub admin_id: i64,
    pub client: ClientInfo,
}

impl Actor {
    pub fn new(admin_id: i64, client: ClientInfo) -> Self {
        Self { admin_id, client }
    }

    pub fn activity(&self, action: &str, description: impl Into<String>) -> NewActivity {
        NewActivity::new(UserType::Admin, self.admin_id, action)
            .with_description(description)
            .with_client(&self.client)
    }
}
