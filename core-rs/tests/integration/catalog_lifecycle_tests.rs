//! Integration tests for role catalog files
//!
//! Tests the catalog lifecycle:
//! - Save and reload
//! - Loading into a memory store
//! - Rejection of invalid catalogs

use roleguard_core::{
    user_has_permission, user_has_role, AuthzError, CatalogUser, InMemoryRoleStore, RoleCatalog, RoleStore, UserId,
};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_complete_catalog_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roles.yaml");

    // 1. Build from the stock roles and add users
    let mut catalog = RoleCatalog::standard();
    catalog.add_user(CatalogUser::new("kody", &["admin"]).with_id("u-1"));
    catalog.add_user(CatalogUser::new("ana", &["user", "editor"]).with_id("u-2"));
    catalog.save(&path).unwrap();

    // 2. Reload and compare
    let loaded = RoleCatalog::load(&path).unwrap();
    assert_eq!(loaded, catalog);

    // 3. Load into a store
    let store = InMemoryRoleStore::from_catalog(&loaded).unwrap();
    assert_eq!(store.len().await, 2);

    // 4. Check users
    let ana = store.get_user(&UserId::new("u-2")).await.unwrap();
    assert!(user_has_role(ana.as_ref(), "editor"));
    assert!(user_has_permission(ana.as_ref(), "update:note:any"));
    assert!(!user_has_permission(ana.as_ref(), "delete:user:any"));
}

#[tokio::test]
async fn test_handwritten_catalog_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roles.yaml");
    fs::write(
        &path,
        r#"apiVersion: roleguard/v1
kind: RoleCatalog
spec:
  roles:
    - name: critic
      description: Critic role with full critic power
      permissions:
        - read:note:any
        - create:review:own
  users:
    - username: rita
      roles: [critic]
"#,
    )
    .unwrap();

    let catalog = RoleCatalog::load(&path).unwrap();
    let users = catalog.resolve_users().unwrap();
    assert_eq!(users.len(), 1);

    let store = InMemoryRoleStore::from_catalog(&catalog).unwrap();
    assert_eq!(store.len().await, 1);
    assert!(user_has_permission(Some(&users[0]), "create:review"));
}

#[test]
fn test_invalid_entity_in_grant_is_rejected() {
    let yaml = r#"apiVersion: roleguard/v1
kind: RoleCatalog
spec:
  roles:
    - name: broken
      permissions:
        - read:Note:any
"#;
    assert!(matches!(RoleCatalog::from_yaml_str(yaml), Err(AuthzError::Config(_))));
}

#[test]
fn test_wrong_api_version_is_rejected() {
    let yaml = r#"apiVersion: roleguard/v2
kind: RoleCatalog
spec: {}
"#;
    let err = RoleCatalog::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("Invalid apiVersion"));
}

#[test]
fn test_empty_spec_is_valid() {
    let yaml = r#"apiVersion: roleguard/v1
kind: RoleCatalog
spec: {}
"#;
    let catalog = RoleCatalog::from_yaml_str(yaml).unwrap();
    assert!(catalog.spec.roles.is_empty());
    assert!(catalog.resolve_users().unwrap().is_empty());
}
