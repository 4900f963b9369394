//! Admin repository trait (port)

use async_trait::async_trait;
use mbh_shared::EntityId;

use crate::domain::{Admin, DashboardStats, ProfileUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Active admin whose username or email equals `login`.
    async fn find_active_by_login(&self, login: &str) -> Result<Option<Admin>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Admin>, DomainError>;
    async fn update_profile(&self, id: EntityId, profile: &ProfileUpdate) -> Result<bool, DomainError>;
    async fn update_password_hash(&self, id: EntityId, password_hash: &str) -> Result<bool, DomainError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError>;
}
