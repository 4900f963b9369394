//! Common types

use serde::{Deserialize, Serialize};

/// Primary key type shared by every table.
pub type EntityId = i64;

/// Request origin recorded alongside audit entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self { ip_address, user_agent }
    }
}
