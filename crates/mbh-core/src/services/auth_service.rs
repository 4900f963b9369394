// ============================================================================
// MBH Core - Authentication Service
// File: crates/mbh-core/src/services/auth_service.rs
// ============================================================================
//! Admin login, logout and account maintenance

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use mbh_security::PasswordService;
use mbh_shared::utils::mask_email;
use mbh_shared::{ClientInfo, EntityId};

use super::record_activity;
use crate::domain::{activity_actions, Actor, Admin, ProfileUpdate};
use crate::error::DomainError;
use crate::repositories::{ActivityLogRepository, AdminRepository};

const MIN_PASSWORD_LENGTH: usize = 8;

pub struct AuthService {
    admins: Arc<dyn AdminRepository>,
    activity: Arc<dyn ActivityLogRepository>,
}

impl AuthService {
    pub fn new(admins: Arc<dyn AdminRepository>, activity: Arc<dyn ActivityLogRepository>) -> Self {
        Self { admins, activity }
    }

    /// Login with username or email
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client: &ClientInfo,
    ) -> Result<Admin, DomainError> {
        info!("Login attempt for: {}", username);

        // 1. Find an active admin by username or email
        let admin = self
            .admins
            .find_active_by_login(username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown or inactive admin: {}", username);
                DomainError::InvalidCredentials
            })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &admin.password_hash).map_err(|e| {
            warn!("Login failed: unreadable password hash for admin {}: {}", admin.id, e);
            DomainError::InvalidCredentials
        })?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Audit
        let actor = Actor::new(admin.id, client.clone());
        record_activity(
            self.activity.as_ref(),
            actor.activity(activity_actions::LOGIN, "Admin logged in"),
        )
        .await;

        info!("Login successful for: {}", mask_email(&admin.email));
        Ok(admin)
    }

    pub async fn logout(&self, actor: &Actor) {
        record_activity(
            self.activity.as_ref(),
            actor.activity(activity_actions::LOGOUT, "Admin logged out"),
        )
        .await;
        info!(admin_id = actor.admin_id, "Admin logged out");
    }

    pub async fn change_password(
        &self,
        admin_id: EntityId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or(DomainError::AdminNotFound)?;

        let current_valid = PasswordService::verify(current_password, &admin.password_hash)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        if !current_valid {
            warn!(admin_id, "Password change rejected: wrong current password");
            return Err(DomainError::IncorrectPassword);
        }

        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = PasswordService::hash(new_password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        if !self.admins.update_password_hash(admin_id, &hash).await? {
            return Err(DomainError::ActionFailed("Failed to change password"));
        }

        info!(admin_id, "Password changed");
        Ok(())
    }

    pub async fn update_profile(
        &self,
        admin_id: EntityId,
        profile: &ProfileUpdate,
    ) -> Result<(), DomainError> {
        profile.validate()?;

        if !self.admins.update_profile(admin_id, profile).await? {
            return Err(DomainError::ActionFailed("Failed to update profile"));
        }

        info!(admin_id, "Profile updated for: {}", mask_email(&profile.email));
        Ok(())
    }
}
