//! Stock roles of the notes application

use super::config::RoleCatalog;
use crate::rbac::{Access, Action, Entity, Permission, Role};

fn grants(actions: &[Action], entity: Entity, access: Access) -> Vec<Permission> {
    actions
        .iter()
        .map(|action| Permission::new(*action, entity.clone(), access))
        .collect()
}

/// Every action on `user` and `note`, under both scopes
pub fn admin_role() -> Role {
    let mut role = Role::new("admin").with_description("Admin role with full permissions");
    for entity in [Entity::user(), Entity::note()] {
        for access in Access::ALL {
            role = role.with_permissions(grants(&Action::ALL, entity.clone(), access));
        }
    }
    role
}

pub fn editor_role() -> Role {
    Role::new("editor")
        .with_description("Editor role with limited permissions")
        .with_permissions(grants(&[Action::Read, Action::Update], Entity::note(), Access::Any))
        .with_permissions(grants(&Action::ALL, Entity::note(), Access::Own))
        .with_permission(Permission::new(Action::Read, Entity::user(), Access::Any))
}

pub fn user_role() -> Role {
    Role::new("user")
        .with_description("Regular user with minimal permissions")
        .with_permissions(grants(&Action::ALL, Entity::note(), Access::Own))
        .with_permission(Permission::new(Action::Read, Entity::note(), Access::Any))
        .with_permissions(grants(&[Action::Read, Action::Update], Entity::user(), Access::Own))
}

impl RoleCatalog {
    /// Catalog with the stock `admin`, `editor` and `user` roles and no users
    pub fn standard() -> Self {
        let mut catalog = RoleCatalog::new();
        catalog.add_role(admin_role());
        catalog.add_role(editor_role());
        catalog.add_role(user_role());
        catalog
    }
}
