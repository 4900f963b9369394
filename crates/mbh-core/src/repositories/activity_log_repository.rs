//! Activity log repository trait (port)

use async_trait::async_trait;

use crate::domain::{ActivityLog, NewActivity};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn record(&self, entry: &NewActivity) -> Result<(), DomainError>;
    /// Newest first, with `user_name` resolved.
    async fn recent(&self, limit: i64) -> Result<Vec<ActivityLog>, DomainError>;
}
