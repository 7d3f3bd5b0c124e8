//! Role store trait and query predicates
//!
//! A store answers one question: is there a user with this id whose roles
//! satisfy a predicate. The predicate is data ([`UserFilter`]) so a backend
//! can translate it into its own query language instead of loading records.

use crate::errors::Result;
use crate::rbac::descriptor::grant_matches;
use crate::rbac::{Permission, PermissionDescriptor, Role, User, UserId};
use async_trait::async_trait;

/// Predicate over a single permission grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionFilter {
    pub action: String,
    pub entity: String,
    /// `None` leaves the access scope unconstrained
    pub access_in: Option<Vec<String>>,
}

impl PermissionFilter {
    pub fn matches(&self, permission: &Permission) -> bool {
        grant_matches(&self.action, &self.entity, self.access_in.as_deref(), permission)
    }
}

impl From<&PermissionDescriptor> for PermissionFilter {
    fn from(descriptor: &PermissionDescriptor) -> Self {
        PermissionFilter {
            action: descriptor.action.clone(),
            entity: descriptor.entity.clone(),
            access_in: if descriptor.access.is_empty() {
                None
            } else {
                Some(descriptor.access.clone())
            },
        }
    }
}

/// Predicate over a single role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleFilter {
    /// Role name equals (case-sensitive)
    Named(String),
    /// Role holds at least one matching grant
    Granting(PermissionFilter),
}

impl RoleFilter {
    pub fn matches(&self, role: &Role) -> bool {
        match self {
            RoleFilter::Named(name) => role.name == *name,
            RoleFilter::Granting(filter) => role.permissions.iter().any(|p| filter.matches(p)),
        }
    }
}

/// `id == .. AND roles: some(role filter)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    pub id: UserId,
    pub role: Option<RoleFilter>,
}

impl UserFilter {
    pub fn by_id(id: UserId) -> Self {
        UserFilter { id, role: None }
    }

    pub fn with_role_named(id: UserId, name: &str) -> Self {
        UserFilter {
            id,
            role: Some(RoleFilter::Named(name.to_string())),
        }
    }

    pub fn with_permission(id: UserId, descriptor: &PermissionDescriptor) -> Self {
        UserFilter {
            id,
            role: Some(RoleFilter::Granting(descriptor.into())),
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        user.id == self.id
            && self
                .role
                .as_ref()
                .map_or(true, |filter| user.roles.iter().any(|r| filter.matches(r)))
    }
}

/// Read-only access to user/role/permission records
///
/// # Semantics
///
/// - Each call is a single read; no lock is held across calls
/// - Backend failures are returned as-is (`AuthzError::Store`)
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Id of the user matching `filter`, if any
    async fn find_user(&self, filter: &UserFilter) -> Result<Option<UserId>>;

    /// Full user record with its roles and grants
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;
}
