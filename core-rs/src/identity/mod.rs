//! Request identity
//!
//! The require checks never read sessions themselves. They ask an
//! [`IdentityResolver`] for the acting user and stop with
//! [`AuthzError::Unauthenticated`] when there is none.

use crate::errors::{AuthzError, Result};
use crate::rbac::UserId;
use async_trait::async_trait;

/// Per-request data handed to the require checks
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// User bound to the authenticated session, if any
    pub session_user: Option<UserId>,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: impl Into<UserId>) -> Self {
        RequestContext {
            session_user: Some(user_id.into()),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Resolves the acting user of a request
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the user id, or `Unauthenticated` if the request has no session
    async fn require_user_id(&self, request: &RequestContext) -> Result<UserId>;
}

/// Resolves identity from the session user already on the context
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdentityResolver;

#[async_trait]
impl IdentityResolver for SessionIdentityResolver {
    async fn require_user_id(&self, request: &RequestContext) -> Result<UserId> {
        request.session_user.clone().ok_or(AuthzError::Unauthenticated)
    }
}
