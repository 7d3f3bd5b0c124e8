//! In-memory role store
//!
//! Users are held behind a tokio `RwLock`; queries take the read lock only
//! while scanning. Populated from a [`RoleCatalog`] or by `insert_user`.

use super::traits::{RoleStore, UserFilter};
use crate::catalog::RoleCatalog;
use crate::errors::Result;
use crate::rbac::{User, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding every user of a validated catalog
    pub fn from_catalog(catalog: &RoleCatalog) -> Result<Self> {
        let users = catalog.resolve_users()?;
        tracing::info!(
            roles = catalog.spec.roles.len(),
            users = users.len(),
            "loaded role catalog into memory store"
        );

        Ok(InMemoryRoleStore {
            users: RwLock::new(users.into_iter().map(|u| (u.id.clone(), u)).collect()),
        })
    }

    /// Insert or replace a user, returning the previous record
    pub async fn insert_user(&self, user: User) -> Option<User> {
        self.users.write().await.insert(user.id.clone(), user)
    }

    pub async fn remove_user(&self, id: &UserId) -> Option<User> {
        self.users.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_user(&self, filter: &UserFilter) -> Result<Option<UserId>> {
        let users = self.users.read().await;
        Ok(users
            .get(&filter.id)
            .filter(|user| filter.matches(user))
            .map(|user| user.id.clone()))
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }
}
