/**
 * config.rs
 * Parser for role catalog files (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: roleguard/v1
 * kind: RoleCatalog
 * spec:
 *   roles:
 *     - name: admin
 *       description: Admin role with full permissions
 *       permissions:
 *         - delete:user:any
 *   users:
 *     - id: u-1
 *       username: kody
 *       roles: [admin]
 * ```
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::{AuthzError, Result};
use crate::rbac::{Role, User, UserId};

pub const API_VERSION: &str = "roleguard/v1";
pub const KIND: &str = "RoleCatalog";

/// Role catalog file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleCatalog {
    pub api_version: String,
    pub kind: String,
    pub spec: CatalogSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogSpec {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub users: Vec<CatalogUser>,
}

/// User entry: role assignments by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogUser {
    /// Defaults to the username when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl RoleCatalog {
    /// Empty catalog with header fields set
    pub fn new() -> Self {
        RoleCatalog {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            spec: CatalogSpec::default(),
        }
    }

    /// Load a catalog file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| {
            AuthzError::Config(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "role catalog loaded");
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let catalog: RoleCatalog = serde_yaml::from_str(content)
            .map_err(|e| AuthzError::Config(format!("Invalid catalog YAML: {}", e)))?;

        catalog.validate()?;

        Ok(catalog)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_yaml()?)?;
        Ok(())
    }

    /// Validate catalog structure
    ///
    /// Ensures:
    /// - apiVersion is "roleguard/v1" and kind is "RoleCatalog"
    /// - role names are non-empty and unique
    /// - usernames and effective user ids are unique
    /// - users only reference declared roles
    pub fn validate(&self) -> Result<()> {
        if self.api_version != API_VERSION {
            return Err(AuthzError::Config(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(AuthzError::Config(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        let mut role_names = HashSet::new();
        for role in &self.spec.roles {
            if role.name.is_empty() {
                return Err(AuthzError::Config("role name cannot be empty".to_string()));
            }
            if !role_names.insert(role.name.as_str()) {
                return Err(AuthzError::Config(format!("duplicate role '{}'", role.name)));
            }
        }

        let mut usernames = HashSet::new();
        let mut ids = HashSet::new();
        for user in &self.spec.users {
            if !usernames.insert(user.username.as_str()) {
                return Err(AuthzError::Config(format!("duplicate username '{}'", user.username)));
            }
            let id = user.effective_id();
            if !ids.insert(id.clone()) {
                return Err(AuthzError::Config(format!("duplicate user id '{}'", id)));
            }
            if let Some(missing) = user.roles.iter().find(|r| !role_names.contains(r.as_str())) {
                return Err(AuthzError::Config(format!(
                    "user '{}' references unknown role '{}'",
                    user.username, missing
                )));
            }
        }

        Ok(())
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.spec.roles.iter().find(|r| r.name == name)
    }

    pub fn add_role(&mut self, role: Role) {
        self.spec.roles.push(role);
    }

    pub fn add_user(&mut self, user: CatalogUser) {
        self.spec.users.push(user);
    }

    /// Expand users into full records with their roles attached
    pub fn resolve_users(&self) -> Result<Vec<User>> {
        self.validate()?;

        let mut users = Vec::with_capacity(self.spec.users.len());
        for entry in &self.spec.users {
            let mut user = User::new(entry.effective_id(), entry.username.clone());
            for name in &entry.roles {
                if let Some(role) = self.role(name) {
                    user.roles.push(role.clone());
                }
            }
            users.push(user);
        }

        Ok(users)
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogUser {
    pub fn new(username: impl Into<String>, roles: &[&str]) -> Self {
        CatalogUser {
            id: None,
            username: username.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<UserId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The explicit id, or the username when none is set
    pub fn effective_id(&self) -> UserId {
        self.id.clone().unwrap_or_else(|| UserId::new(self.username.clone()))
    }
}
