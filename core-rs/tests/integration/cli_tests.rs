//! Integration tests for the roleguard CLI
//!
//! Runs the built binary against a catalog in a temp directory and checks
//! stdout and exit status for each subcommand.

use roleguard_core::{RoleCatalog, CATALOG_ENV};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = r#"apiVersion: roleguard/v1
kind: RoleCatalog
spec:
  roles:
    - name: admin
      permissions:
        - delete:user:any
    - name: user
      permissions:
        - update:note:own
  users:
    - username: kody
      roles: [admin]
    - id: u-ana
      username: ana
      roles: [user]
"#;

fn setup_catalog() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roles.yaml");
    fs::write(&path, CATALOG).unwrap();
    (temp_dir, path)
}

fn roleguard() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roleguard"));
    cmd.env_remove(CATALOG_ENV).env_remove("RUST_LOG");
    cmd
}

fn run(catalog: &Path, args: &[&str]) -> Output {
    roleguard()
        .args(args)
        .arg("--catalog")
        .arg(catalog)
        .output()
        .expect("Failed to run roleguard")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_check_prints_allow_and_deny() {
    let (_temp, catalog) = setup_catalog();

    let allowed = run(&catalog, &["check", "--user", "u-ana", "--permission", "update:note:own"]);
    assert!(allowed.status.success());
    assert_eq!(stdout(&allowed), "allow");

    let denied = run(&catalog, &["check", "--user", "u-ana", "--permission", "update:note:any"]);
    assert!(denied.status.success());
    assert_eq!(stdout(&denied), "deny");
}

#[test]
fn test_user_without_id_is_reachable_by_username() {
    let (_temp, catalog) = setup_catalog();

    let check = run(&catalog, &["check", "--user", "kody", "--permission", "delete:user:any"]);
    assert_eq!(stdout(&check), "allow");

    let require = run(&catalog, &["require", "--user", "kody", "--role", "admin"]);
    assert!(require.status.success());
    assert_eq!(stdout(&require), "kody");
}

#[test]
fn test_has_role() {
    let (_temp, catalog) = setup_catalog();

    assert_eq!(stdout(&run(&catalog, &["has-role", "--user", "u-ana", "--role", "user"])), "allow");
    assert_eq!(stdout(&run(&catalog, &["has-role", "--user", "u-ana", "--role", "admin"])), "deny");
    assert_eq!(stdout(&run(&catalog, &["has-role", "--user", "nobody", "--role", "user"])), "deny");
}

#[test]
fn test_require_permission_grant_prints_user_id() {
    let (_temp, catalog) = setup_catalog();

    let output = run(&catalog, &["require", "--user", "u-ana", "--permission", "update:note:own"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "u-ana");
}

#[test]
fn test_require_permission_denial_exits_3_with_body() {
    let (_temp, catalog) = setup_catalog();

    let output = run(&catalog, &["require", "--user", "u-ana", "--permission", "delete:user:any"]);
    assert_eq!(output.status.code(), Some(3));

    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["requiredPermission"]["entity"], "user");
    assert_eq!(body["message"], "Unauthorized: required permissions: delete:user:any");
}

#[test]
fn test_require_role_denial_exits_3_with_body() {
    let (_temp, catalog) = setup_catalog();

    let output = run(&catalog, &["require", "--user", "u-ana", "--role", "admin"]);
    assert_eq!(output.status.code(), Some(3));

    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["requiredRole"], "admin");
    assert!(body.get("requiredPermission").is_none());
}

#[test]
fn test_parse_lax_and_strict() {
    let lax = roleguard().args(["parse", "reed:note:own"]).output().unwrap();
    assert!(lax.status.success());
    let body: serde_json::Value = serde_json::from_str(&stdout(&lax)).unwrap();
    assert_eq!(body["action"], "reed");
    assert_eq!(body["access"][0], "own");

    let strict = roleguard().args(["parse", "--strict", "reed:note:own"]).output().unwrap();
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("unknown action 'reed'"));

    let ok = roleguard().args(["parse", "--strict", "update:note:own,any"]).output().unwrap();
    assert!(ok.status.success());
}

#[test]
fn test_catalog_from_environment() {
    let (_temp, catalog) = setup_catalog();

    let output = roleguard()
        .env(CATALOG_ENV, &catalog)
        .args(["check", "--user", "u-ana", "--permission", "update:note"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "allow");
}

#[test]
fn test_missing_catalog_is_usage_error() {
    let output = roleguard()
        .args(["check", "--user", "u-ana", "--permission", "update:note"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_standard_catalog_output_is_loadable() {
    let output = roleguard().args(["catalog", "--standard"]).output().unwrap();
    assert!(output.status.success());

    let catalog = RoleCatalog::from_yaml_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(catalog, RoleCatalog::standard());
}
