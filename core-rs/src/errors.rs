//! Error types for roleguard

use thiserror::Error;

use crate::rbac::AuthorizationDenied;

#[derive(Error, Debug)]
pub enum AuthzError {
    #[error("{}", .0.message)]
    Unauthorized(AuthorizationDenied),

    #[error("Unauthenticated: no active session")]
    Unauthenticated,

    #[error("Invalid permission descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Catalog error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthzError {
    /// HTTP-equivalent status for the request boundary
    pub fn status(&self) -> u16 {
        match self {
            AuthzError::Unauthorized(denial) => denial.status(),
            AuthzError::Unauthenticated => 401,
            AuthzError::InvalidDescriptor(_) | AuthzError::InvalidEntity(_) => 400,
            _ => 500,
        }
    }

    /// The denial payload, if this error is an authorization denial
    pub fn denial(&self) -> Option<&AuthorizationDenied> {
        match self {
            AuthzError::Unauthorized(denial) => Some(denial),
            _ => None,
        }
    }
}

impl From<AuthorizationDenied> for AuthzError {
    fn from(denial: AuthorizationDenied) -> Self {
        AuthzError::Unauthorized(denial)
    }
}

pub type Result<T> = std::result::Result<T, AuthzError>;
