//! # roleguard - permission-string authorization
//!
//! Role-based authorization for a notes/users application. A permission is
//! written as a compact descriptor string and checked against the roles a
//! user holds.
//!
//! ## Descriptor grammar
//!
//! ```text
//! action ":" entity [ ":" access ("," access)* ]
//!
//! read:note            any access scope
//! update:note:own      only notes the user owns
//! delete:user:any,own  either scope
//! ```
//!
//! ## Checks
//!
//! - `user_has_permission` / `user_has_role`: pure checks over a user value
//! - `PermissionChecker::require_user_with_permission` /
//!   `require_user_with_role`: resolve the acting user from a request and
//!   query an injected [`RoleStore`], failing with a 403 denial
//!
//! ```text
//! RequestContext ──► IdentityResolver ──► UserId
//!                                          │
//!               descriptor ──► UserFilter ─┴─► RoleStore ──► UserId | AuthorizationDenied
//! ```

pub mod catalog;
pub mod errors;
pub mod identity;
pub mod rbac;
pub mod store;

pub use catalog::{CatalogUser, RoleCatalog};
pub use errors::AuthzError;
pub use identity::{IdentityResolver, RequestContext, SessionIdentityResolver};
pub use rbac::{
    parse_permission_string, user_has_all_roles, user_has_any_role, user_has_permission, user_has_role, Access,
    Action, AuthorizationDenied, Entity, HasRoles, Permission, PermissionChecker, PermissionDescriptor, Role, User,
    UserId,
};
pub use store::{InMemoryRoleStore, PermissionFilter, RoleFilter, RoleStore, UserFilter};

/// Environment variable naming the catalog file used when `--catalog` is not given
pub const CATALOG_ENV: &str = "ROLEGUARD_CATALOG";
