//! Request-scoped authentication context
//!
//! The session middleware resolves the session cookie once per request and
//! stores a [`RequestContext`] in the request extensions. Handlers receive it
//! explicitly instead of reaching into shared session state.

use axum::{extract::FromRequestParts, http::request::Parts};

use mbh_core::domain::Actor;
use mbh_security::SessionUser;
use mbh_shared::ClientInfo;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub session_id: String,
    pub csrf_token: String,
    pub admin: Option<SessionUser>,
    pub client: ClientInfo,
}

impl RequestContext {
    pub fn actor(&self) -> Option<Actor> {
        self.admin
            .as_ref()
            .map(|admin| Actor::new(admin.id, self.client.clone()))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| ApiError::InternalError("session middleware not installed".into()))
    }
}

/// A logged-in admin; anyone else is redirected to the login page.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    pub admin: SessionUser,
    pub context: RequestContext,
}

impl RequireAdmin {
    pub fn actor(&self) -> Actor {
        Actor::new(self.admin.id, self.context.client.clone())
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = RequestContext::from_request_parts(parts, state).await?;
        let admin = context.admin.clone().ok_or(ApiError::LoginRequired)?;
        Ok(Self { admin, context })
    }
}
