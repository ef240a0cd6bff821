use domain_users::{CreateUser, Group};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// New-user form state. Serialises to the `POST /api/users` body.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub group_ids: Vec<Uuid>,
}

/// A single edit to a [`Draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Name(String),
    Email(String),
    Password(String),
    GroupIds(Vec<Uuid>),
}

impl Draft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..self
        }
    }

    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..self
        }
    }

    pub fn with_group_ids(self, group_ids: Vec<Uuid>) -> Self {
        Self { group_ids, ..self }
    }

    pub fn with_field(self, field: DraftField) -> Self {
        match field {
            DraftField::Name(v) => self.with_name(v),
            DraftField::Email(v) => self.with_email(v),
            DraftField::Password(v) => self.with_password(v),
            DraftField::GroupIds(ids) => self.with_group_ids(ids),
        }
    }

    /// Drop group ids that are not in `groups`, keeping order.
    pub fn retain_known_groups(self, groups: &[Group]) -> Self {
        let group_ids = self
            .group_ids
            .into_iter()
            .filter(|id| groups.iter().any(|g| g.id == *id))
            .collect();
        Self { group_ids, ..self }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn to_create_user(&self) -> CreateUser {
        CreateUser {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            group_ids: self.group_ids.clone(),
        }
    }
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("group_ids", &self.group_ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_field_replaces_one_field() {
        let draft = Draft::empty()
            .with_field(DraftField::Name("Ada".into()))
            .with_field(DraftField::Email("ada@example.com".into()));

        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.email, "ada@example.com");
        assert!(draft.password.is_empty());
        assert!(draft.group_ids.is_empty());
    }

    #[test]
    fn serialises_as_api_body() {
        let id = Uuid::now_v7();
        let draft = Draft::empty()
            .with_name("Ada")
            .with_email("ada@example.com")
            .with_password("pw")
            .with_group_ids(vec![id]);

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "pw",
                "groupIds": [id]
            })
        );
    }

    #[test]
    fn retain_known_groups_keeps_order() {
        let a = Group::new("A");
        let b = Group::new("B");
        let stranger = Uuid::now_v7();

        let draft = Draft::empty()
            .with_group_ids(vec![b.id, stranger, a.id])
            .retain_known_groups(&[a.clone(), b.clone()]);

        assert_eq!(draft.group_ids, vec![b.id, a.id]);
    }

    #[test]
    fn debug_redacts_password() {
        let draft = Draft::empty().with_password("hunter2");
        assert!(!format!("{draft:?}").contains("hunter2"));
    }

    #[test]
    fn empty_draft_is_empty() {
        assert!(Draft::empty().is_empty());
        assert!(!Draft::empty().with_name("x").is_empty());
    }
}
