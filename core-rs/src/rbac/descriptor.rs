//! Permission descriptors and typed permission grants
//!
//! Grammar: `action ":" entity [ ":" access ("," access)* ]`
//!
//! Examples:
//! - `read:note` - read any note regardless of access scope
//! - `delete:user:any` - delete any user
//! - `update:note:own,any` - update a note under either scope
//!
//! Descriptors keep their tokens verbatim. Stored grants ([`Permission`]) are
//! fully typed, so an unknown token in a descriptor can never match a grant.

use crate::errors::{AuthzError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static ENTITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("entity pattern is a valid regex"));

/// Operation a permission allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(AuthzError::InvalidDescriptor(format!("unknown action '{}'", other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access scope: records the user owns, or any record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Own,
    Any,
}

impl Access {
    pub const ALL: [Access; 2] = [Access::Own, Access::Any];

    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Own => "own",
            Access::Any => "any",
        }
    }
}

impl FromStr for Access {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "own" => Ok(Access::Own),
            "any" => Ok(Access::Any),
            other => Err(AuthzError::InvalidDescriptor(format!("unknown access '{}'", other))),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity type token (e.g. `user`, `note`)
///
/// Open set: any lowercase token starting with a letter, followed by
/// letters, digits, `_` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Entity(String);

impl Entity {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !ENTITY_PATTERN.is_match(&name) {
            return Err(AuthzError::InvalidEntity(name));
        }
        Ok(Entity(name))
    }

    pub fn user() -> Self {
        Entity("user".to_string())
    }

    pub fn note() -> Self {
        Entity("note".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Entity {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self> {
        Entity::new(value)
    }
}

impl From<Entity> for String {
    fn from(entity: Entity) -> Self {
        entity.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored permission grant: exactly one action, entity and access value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    pub action: Action,
    pub entity: Entity,
    pub access: Access,
}

impl Permission {
    pub fn new(action: Action, entity: Entity, access: Access) -> Self {
        Permission { action, entity, access }
    }

    /// Parse a grant in `action:entity:access` form
    ///
    /// Unlike descriptors, a grant must name a single known access value.
    pub fn parse(grant: &str) -> Result<Self> {
        let fields: Vec<&str> = grant.split(':').collect();
        if fields.len() != 3 {
            return Err(AuthzError::InvalidDescriptor(format!(
                "grant '{}' must have the form action:entity:access",
                grant
            )));
        }

        Ok(Permission {
            action: fields[0].parse()?,
            entity: Entity::new(fields[1])?,
            access: fields[2].parse()?,
        })
    }
}

impl TryFrom<String> for Permission {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self> {
        Permission::parse(&value)
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.to_string()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.action, self.entity, self.access)
    }
}

/// Parsed permission requirement
///
/// Tokens are kept exactly as written. An empty `access` list is
/// unconstrained and matches a grant of any access scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    pub action: String,
    pub entity: String,
    pub access: Vec<String>,
}

impl PermissionDescriptor {
    /// Lax parse used by every check: never fails
    ///
    /// Missing fields become empty strings, an absent or empty third field
    /// yields no access constraint, and fields past the third are ignored.
    pub fn parse(descriptor: &str) -> Self {
        let mut fields = descriptor.split(':');
        let action = fields.next().unwrap_or_default().to_string();
        let entity = fields.next().unwrap_or_default().to_string();
        let access = match fields.next() {
            Some(scopes) if !scopes.is_empty() => scopes.split(',').map(str::to_string).collect(),
            _ => Vec::new(),
        };

        PermissionDescriptor { action, entity, access }
    }

    /// Strict parse for callers that want typos reported instead of denied
    pub fn parse_strict(descriptor: &str) -> Result<Self> {
        let fields: Vec<&str> = descriptor.split(':').collect();
        if fields.len() < 2 || fields.len() > 3 {
            return Err(AuthzError::InvalidDescriptor(format!(
                "'{}' must have the form action:entity[:access,...]",
                descriptor
            )));
        }

        fields[0].parse::<Action>()?;
        Entity::new(fields[1]).map_err(|e| AuthzError::InvalidDescriptor(e.to_string()))?;
        if let Some(scopes) = fields.get(2) {
            for scope in scopes.split(',') {
                if scope.is_empty() {
                    return Err(AuthzError::InvalidDescriptor(format!(
                        "empty access scope in '{}'",
                        descriptor
                    )));
                }
                scope.parse::<Access>()?;
            }
        }

        Ok(Self::parse(descriptor))
    }

    pub fn action_kind(&self) -> Option<Action> {
        self.action.parse().ok()
    }

    /// Access scopes that name a known value, in descriptor order
    pub fn access_kinds(&self) -> Vec<Access> {
        self.access.iter().filter_map(|a| a.parse().ok()).collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.access.is_empty()
    }

    /// Whether a single grant satisfies this requirement
    pub fn matches(&self, permission: &Permission) -> bool {
        let access_in = (!self.access.is_empty()).then_some(self.access.as_slice());
        grant_matches(&self.action, &self.entity, access_in, permission)
    }
}

/// Match rule shared by descriptors and store filters
///
/// `access_in: None` accepts any access scope.
pub fn grant_matches(action: &str, entity: &str, access_in: Option<&[String]>, permission: &Permission) -> bool {
    permission.action.as_str() == action
        && permission.entity.as_str() == entity
        && access_in.map_or(true, |scopes| scopes.iter().any(|s| s == permission.access.as_str()))
}

impl FromStr for PermissionDescriptor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(PermissionDescriptor::parse(s))
    }
}

impl fmt::Display for PermissionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.entity)?;
        if !self.access.is_empty() {
            write!(f, ":{}", self.access.join(","))?;
        }
        Ok(())
    }
}
