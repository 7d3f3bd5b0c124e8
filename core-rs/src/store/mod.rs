//! Role/permission data stores
//!
//! Defines the store collaborator consumed by the require checks.
//! Implementations include:
//! - InMemoryRoleStore (catalog-backed, for tests and local development)

pub mod memory;
pub mod traits;

pub use memory::InMemoryRoleStore;
pub use traits::{PermissionFilter, RoleFilter, RoleStore, UserFilter};
