//! Authorization denial payload
//!
//! Serializes to the body the request boundary returns with status 403:
//!
//! ```json
//! { "error": "Unauthorized", "requiredPermission": { ... }, "message": "..." }
//! ```

use super::descriptor::PermissionDescriptor;
use serde::{Deserialize, Serialize};

pub const UNAUTHORIZED: &str = "Unauthorized";
pub const FORBIDDEN_STATUS: u16 = 403;

/// Unmet requirement of a failed permission or role check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDenied {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<PermissionDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_role: Option<String>,
    pub message: String,
}

impl AuthorizationDenied {
    /// Denial for a permission check; `descriptor` is the caller's input string
    pub fn for_permission(descriptor: &str) -> Self {
        AuthorizationDenied {
            error: UNAUTHORIZED.to_string(),
            required_permission: Some(PermissionDescriptor::parse(descriptor)),
            required_role: None,
            message: format!("Unauthorized: required permissions: {}", descriptor),
        }
    }

    pub fn for_role(role: &str) -> Self {
        AuthorizationDenied {
            error: UNAUTHORIZED.to_string(),
            required_permission: None,
            required_role: Some(role.to_string()),
            message: format!("Unauthorized: required role: {}", role),
        }
    }

    pub fn status(&self) -> u16 {
        FORBIDDEN_STATUS
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}
