//! RBAC (Role-Based Access Control) module
//!
//! Provides the permission descriptor grammar, user/role records,
//! in-memory permission and role checks, and the store-backed
//! require checks with their denial payload.

pub mod denial;
pub mod descriptor;
pub mod permission_checker;
pub mod subject;

pub use denial::AuthorizationDenied;
pub use descriptor::{Access, Action, Entity, Permission, PermissionDescriptor};
pub use permission_checker::{
    parse_permission_string, user_has_all_roles, user_has_any_role, user_has_permission, user_has_role,
    PermissionChecker,
};
pub use subject::{HasRoles, Role, User, UserId};
