use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateGroup, CreateUser, Group, User, UserResponse};
use crate::repository::{GroupRepository, UserRepository};

/// Business logic for users and groups.
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository + GroupRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validates, rejects duplicate emails and unknown groups, hashes the
    /// password, then stores the user with its memberships.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input.validate()?;

        let email = input.email.trim().to_string();
        if self.repository.email_exists(&email).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        let group_ids = dedup_preserving_order(input.group_ids);
        ensure_groups_exist(self.repository.as_ref(), &group_ids).await?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.name.trim().to_string(), email, password_hash);

        self.repository.create_user(user, group_ids).await
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        self.repository.list_users().await
    }

    pub async fn create_group(&self, input: CreateGroup) -> UserResult<Group> {
        input.validate()?;

        let name = input.name.trim().to_string();
        if self.repository.group_name_exists(&name).await? {
            return Err(UserError::DuplicateGroupName(name));
        }

        self.repository.create_group(Group::new(name)).await
    }

    pub async fn list_groups(&self) -> UserResult<Vec<Group>> {
        self.repository.list_groups().await
    }
}

/// Fails with the ids that do not name an existing group, in request order.
pub(crate) async fn ensure_groups_exist<G>(repository: &G, ids: &[Uuid]) -> UserResult<()>
where
    G: GroupRepository + ?Sized,
{
    if ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<Uuid> = repository
        .find_groups(ids)
        .await?
        .into_iter()
        .map(|g| g.id)
        .collect();

    let missing: Vec<Uuid> = ids.iter().filter(|id| !found.contains(id)).copied().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        tracing::info!(missing = ?missing, "Rejected unknown group ids");
        Err(UserError::UnknownGroups(missing))
    }
}

fn dedup_preserving_order(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockGroupRepository};
    use argon2::{PasswordHash, PasswordVerifier};

    fn input(email: &str, group_ids: Vec<Uuid>) -> CreateUser {
        CreateUser {
            name: "  Ada Lovelace ".into(),
            email: email.into(),
            password: "analytical-engine".into(),
            group_ids,
        }
    }

    #[tokio::test]
    async fn create_user_hashes_password_and_trims_name() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());

        let created = service
            .create_user(input("ada@example.com", vec![]))
            .await
            .unwrap();
        assert_eq!(created.name, "Ada Lovelace");

        let listed = service.list_users().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn create_user_collapses_duplicate_group_ids() {
        let admins = Group::new("Admins");
        let service = UserService::new(InMemoryUserRepository::with_groups([admins.clone()]));

        let created = service
            .create_user(input("ada@example.com", vec![admins.id, admins.id]))
            .await
            .unwrap();
        assert_eq!(created.groups.len(), 1);
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let service = UserService::new(InMemoryUserRepository::new());
        service
            .create_user(input("ada@example.com", vec![]))
            .await
            .unwrap();

        let err = service
            .create_user(input("ADA@example.com", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn create_user_rejects_invalid_input() {
        let service = UserService::new(InMemoryUserRepository::new());
        let err = service
            .create_user(input("not-an-email", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg.contains("email")));
    }

    #[tokio::test]
    async fn create_group_rejects_duplicate_name() {
        let service = UserService::new(InMemoryUserRepository::new());
        let group = service
            .create_group(CreateGroup {
                name: " Engineers ".into(),
            })
            .await
            .unwrap();
        assert_eq!(group.name, "Engineers");

        let err = service
            .create_group(CreateGroup {
                name: "Engineers".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateGroupName(_)));
    }

    #[tokio::test]
    async fn ensure_groups_exist_reports_missing_in_request_order() {
        let known = Group::new("Admins");
        let missing_a = Uuid::now_v7();
        let missing_b = Uuid::now_v7();

        let mut repo = MockGroupRepository::new();
        let returned = known.clone();
        repo.expect_find_groups()
            .times(1)
            .returning(move |_| Ok(vec![returned.clone()]));

        let err = ensure_groups_exist(&repo, &[missing_b, known.id, missing_a])
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::UnknownGroups(ids) if ids == vec![missing_b, missing_a]));
    }

    #[tokio::test]
    async fn ensure_groups_exist_skips_lookup_for_empty_list() {
        let mut repo = MockGroupRepository::new();
        repo.expect_find_groups().never();

        assert!(ensure_groups_exist(&repo, &[]).await.is_ok());
    }

    #[test]
    fn hash_password_produces_verifiable_argon2_hash() {
        let hash = hash_password("analytical-engine").unwrap();
        assert!(hash.starts_with("$argon2"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"analytical-engine", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert_eq!(dedup_preserving_order(vec![b, a, b, a]), vec![b, a]);
    }
}
