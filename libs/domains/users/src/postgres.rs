use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entity::{group, membership, user},
    error::{UserError, UserResult},
    models::{Group, Membership, User, UserResponse},
    repository::{GroupRepository, UserRepository},
};

/// SeaORM-backed users and groups.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Groups keyed by id for the given ids.
    async fn groups_by_id(&self, ids: &[Uuid]) -> UserResult<HashMap<Uuid, Group>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let groups = group::Entity::find()
            .filter(group::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(groups
            .into_iter()
            .map(|model| (model.id, Group::from(model)))
            .collect())
    }
}

fn db_error(e: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: User, group_ids: Vec<Uuid>) -> UserResult<UserResponse> {
        let user_id = user.id;
        let email = user.email.clone();
        let now = Utc::now();

        let txn = self.db.begin().await.map_err(db_error)?;

        let inserted = user::ActiveModel::from(user)
            .insert(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(email),
                _ => db_error(e),
            })?;

        if !group_ids.is_empty() {
            let rows = group_ids
                .iter()
                .enumerate()
                .map(|(position, group_id)| membership::ActiveModel {
                    user_id: Set(user_id),
                    group_id: Set(*group_id),
                    position: Set(position as i32),
                    created_at: Set(now.into()),
                });

            membership::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| match e.sql_err() {
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                        UserError::UnknownGroups(group_ids.clone())
                    }
                    _ => db_error(e),
                })?;
        }

        txn.commit().await.map_err(db_error)?;

        let groups = self.groups_by_id(&group_ids).await?;
        let memberships = group_ids
            .iter()
            .filter_map(|id| groups.get(id))
            .map(|group| Membership::new(user_id, group.clone()))
            .collect();

        tracing::info!(user_id = %user_id, groups = group_ids.len(), "Created user");
        Ok(UserResponse::new(inserted.into(), memberships))
    }

    async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        if users.is_empty() {
            return Ok(Vec::new());
        }

        let memberships = membership::Entity::find()
            .filter(membership::Column::UserId.is_in(users.iter().map(|u| u.id)))
            .order_by_asc(membership::Column::UserId)
            .order_by_asc(membership::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let mut group_ids: Vec<Uuid> = memberships.iter().map(|m| m.group_id).collect();
        group_ids.sort_unstable();
        group_ids.dedup();
        let groups = self.groups_by_id(&group_ids).await?;

        let mut by_user: HashMap<Uuid, Vec<Membership>> = HashMap::new();
        for row in memberships {
            if let Some(group) = groups.get(&row.group_id) {
                by_user
                    .entry(row.user_id)
                    .or_default()
                    .push(Membership::new(row.user_id, group.clone()));
            }
        }

        Ok(users
            .into_iter()
            .map(|model| {
                let memberships = by_user.remove(&model.id).unwrap_or_default();
                UserResponse::new(model.into(), memberships)
            })
            .collect())
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let found = user::Entity::find()
            .filter(Expr::cust_with_values(
                "LOWER(email) = $1",
                [email.to_lowercase()],
            ))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(found.is_some())
    }
}

#[async_trait]
impl GroupRepository for PgUserRepository {
    async fn create_group(&self, input: Group) -> UserResult<Group> {
        let name = input.name.clone();
        let model = group::ActiveModel::from(input)
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateGroupName(name),
                _ => db_error(e),
            })?;

        tracing::info!(group_id = %model.id, "Created group");
        Ok(model.into())
    }

    async fn list_groups(&self) -> UserResult<Vec<Group>> {
        let groups = group::Entity::find()
            .order_by_asc(group::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(groups.into_iter().map(Group::from).collect())
    }

    async fn find_groups(&self, ids: &[Uuid]) -> UserResult<Vec<Group>> {
        Ok(self.groups_by_id(ids).await?.into_values().collect())
    }

    async fn group_name_exists(&self, name: &str) -> UserResult<bool> {
        let found = group::Entity::find()
            .filter(group::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(found.is_some())
    }
}
