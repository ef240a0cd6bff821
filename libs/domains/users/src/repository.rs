use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Group, Membership, User, UserResponse};

/// Persistence for users and their memberships.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores the user and one membership per id in `group_ids`, in that order.
    /// Either everything is written or nothing is.
    async fn create_user(&self, user: User, group_ids: Vec<Uuid>) -> UserResult<UserResponse>;

    /// All users, oldest first, each with its memberships.
    async fn list_users(&self) -> UserResult<Vec<UserResponse>>;

    /// Case-insensitive.
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}

/// Persistence for groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create_group(&self, group: Group) -> UserResult<Group>;

    /// All groups ordered by name.
    async fn list_groups(&self) -> UserResult<Vec<Group>>;

    /// The subset of `ids` that exist, in no particular order.
    async fn find_groups(&self, ids: &[Uuid]) -> UserResult<Vec<Group>>;

    async fn group_name_exists(&self, name: &str) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    groups: HashMap<Uuid, Group>,
    memberships: HashMap<Uuid, Vec<Uuid>>,
}

impl Store {
    fn response_for(&self, user: &User) -> UserResponse {
        let groups = self
            .memberships
            .get(&user.id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.groups.get(id))
                    .map(|group| Membership::new(user.id, group.clone()))
                    .collect()
            })
            .unwrap_or_default();
        UserResponse::new(user.clone(), groups)
    }
}

/// In-memory users and groups, for development and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates groups, as the seed migration does for Postgres.
    pub fn with_groups(groups: impl IntoIterator<Item = Group>) -> Self {
        let store = Store {
            groups: groups.into_iter().map(|g| (g.id, g)).collect(),
            ..Store::default()
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: User, group_ids: Vec<Uuid>) -> UserResult<UserResponse> {
        let mut store = self.store.write().await;

        let email = user.email.to_lowercase();
        if store.users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let missing: Vec<Uuid> = group_ids
            .iter()
            .filter(|id| !store.groups.contains_key(id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(UserError::UnknownGroups(missing));
        }

        store.memberships.insert(user.id, group_ids);
        store.users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(store.response_for(&user))
    }

    async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let store = self.store.read().await;
        let mut users: Vec<&User> = store.users.iter().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users.into_iter().map(|u| store.response_for(u)).collect())
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let store = self.store.read().await;
        let email = email.to_lowercase();
        Ok(store.users.iter().any(|u| u.email.to_lowercase() == email))
    }
}

#[async_trait]
impl GroupRepository for InMemoryUserRepository {
    async fn create_group(&self, group: Group) -> UserResult<Group> {
        let mut store = self.store.write().await;

        if store.groups.values().any(|g| g.name == group.name) {
            return Err(UserError::DuplicateGroupName(group.name));
        }

        store.groups.insert(group.id, group.clone());
        tracing::info!(group_id = %group.id, "Created group");
        Ok(group)
    }

    async fn list_groups(&self) -> UserResult<Vec<Group>> {
        let store = self.store.read().await;
        let mut groups: Vec<Group> = store.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn find_groups(&self, ids: &[Uuid]) -> UserResult<Vec<Group>> {
        let store = self.store.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.groups.get(id))
            .cloned()
            .collect())
    }

    async fn group_name_exists(&self, name: &str) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.groups.values().any(|g| g.name == name))
    }
}
