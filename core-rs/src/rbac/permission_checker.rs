//! Permission Checker for role-based authorization
//!
//! Two families of checks:
//! - in-memory: `user_has_permission` / `user_has_role` over any [`HasRoles`]
//!   value, pure and infallible
//! - store-backed: [`PermissionChecker::require_user_with_permission`] and
//!   [`PermissionChecker::require_user_with_role`], which resolve the acting
//!   user and fail with a 403-class [`AuthorizationDenied`]
//!
//! A malformed descriptor is never an error here. It parses to tokens that
//! no grant carries, so the check denies.

use super::denial::AuthorizationDenied;
use super::descriptor::PermissionDescriptor;
use super::subject::{HasRoles, User, UserId};
use crate::errors::{AuthzError, Result};
use crate::identity::{IdentityResolver, RequestContext, SessionIdentityResolver};
use crate::store::{RoleStore, UserFilter};
use std::sync::Arc;

/// Parse a permission descriptor string (lax, never fails)
pub fn parse_permission_string(descriptor: &str) -> PermissionDescriptor {
    PermissionDescriptor::parse(descriptor)
}

/// Check if a user holds a permission matching `descriptor`
///
/// # Arguments
/// * `user` - Subject to check, `None` when there is no user
/// * `descriptor` - Permission required (e.g., "delete:user:any,own")
///
/// # Returns
/// true if any role grants a permission with the same action and entity,
/// and an access scope in the descriptor's list (or any scope when the list
/// is empty)
pub fn user_has_permission<U: HasRoles + ?Sized>(user: Option<&U>, descriptor: &str) -> bool {
    let Some(user) = user else {
        return false;
    };

    let required = PermissionDescriptor::parse(descriptor);
    user.roles()
        .iter()
        .any(|role| role.permissions.iter().any(|p| required.matches(p)))
}

/// Check if a user has a role with exactly this name
pub fn user_has_role<U: HasRoles + ?Sized>(user: Option<&U>, role_name: &str) -> bool {
    user.map_or(false, |u| u.roles().iter().any(|role| role.name == role_name))
}

/// true if the user has at least one of the roles
pub fn user_has_any_role<U: HasRoles + ?Sized>(user: Option<&U>, role_names: &[&str]) -> bool {
    role_names.iter().any(|name| user_has_role(user, name))
}

/// true if the user has every one of the roles
pub fn user_has_all_roles<U: HasRoles + ?Sized>(user: Option<&U>, role_names: &[&str]) -> bool {
    user.is_some() && role_names.iter().all(|name| user_has_role(user, name))
}

/// Store-backed authorization for request handlers
#[derive(Clone)]
pub struct PermissionChecker {
    store: Arc<dyn RoleStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl PermissionChecker {
    pub fn new(store: Arc<dyn RoleStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        PermissionChecker { store, identity }
    }

    /// Checker that takes the acting user from the request's session
    pub fn with_session_identity(store: Arc<dyn RoleStore>) -> Self {
        Self::new(store, Arc::new(SessionIdentityResolver))
    }

    pub fn store(&self) -> &Arc<dyn RoleStore> {
        &self.store
    }

    /// Require that the acting user holds a permission
    ///
    /// # Returns
    /// The acting user's id
    ///
    /// # Errors
    /// - `Unauthenticated` from the identity resolver, before any lookup
    /// - `Unauthorized` carrying the parsed descriptor when no role matches
    /// - store errors, unchanged
    ///
    /// # Example
    /// ```no_run
    /// # use roleguard_core::{InMemoryRoleStore, PermissionChecker, RequestContext};
    /// # use std::sync::Arc;
    /// # async fn example() -> roleguard_core::errors::Result<()> {
    /// let checker = PermissionChecker::with_session_identity(Arc::new(InMemoryRoleStore::new()));
    /// let ctx = RequestContext::authenticated("u-1");
    /// let user_id = checker.require_user_with_permission(&ctx, "delete:note:own").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn require_user_with_permission(
        &self,
        request: &RequestContext,
        descriptor: &str,
    ) -> Result<UserId> {
        let user_id = self.identity.require_user_id(request).await?;
        let required = PermissionDescriptor::parse(descriptor);
        let filter = UserFilter::with_permission(user_id.clone(), &required);

        match self.store.find_user(&filter).await? {
            Some(id) => {
                tracing::debug!(user = %id, permission = descriptor, "permission granted");
                Ok(id)
            }
            None => {
                tracing::debug!(user = %user_id, permission = descriptor, "permission denied");
                Err(AuthzError::Unauthorized(AuthorizationDenied::for_permission(descriptor)))
            }
        }
    }

    /// Require that the acting user has a role with exactly this name
    pub async fn require_user_with_role(&self, request: &RequestContext, role_name: &str) -> Result<UserId> {
        let user_id = self.identity.require_user_id(request).await?;
        let filter = UserFilter::with_role_named(user_id.clone(), role_name);

        match self.store.find_user(&filter).await? {
            Some(id) => {
                tracing::debug!(user = %id, role = role_name, "role granted");
                Ok(id)
            }
            None => {
                tracing::debug!(user = %user_id, role = role_name, "role denied");
                Err(AuthzError::Unauthorized(AuthorizationDenied::for_role(role_name)))
            }
        }
    }

    /// Load the acting user's record for in-memory checks
    pub async fn current_user(&self, request: &RequestContext) -> Result<Option<User>> {
        let user_id = self.identity.require_user_id(request).await?;
        self.store.get_user(&user_id).await
    }
}
