//! Data access for the admin screen.
//!
//! [`HttpGateway`] calls the JSON API over HTTP. [`ServiceGateway`] calls the
//! user service in-process when the pages and the API share a binary.

use async_trait::async_trait;
use domain_users::{Group, GroupRepository, UserError, UserRepository, UserResponse, UserService};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::draft::Draft;

/// The backend operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadUsers,
    LoadGroups,
    CreateUser,
}

impl Operation {
    /// The message shown to the viewer when this operation fails.
    pub const fn user_message(self) -> &'static str {
        match self {
            Operation::LoadUsers => "Failed to load users",
            Operation::LoadGroups => "Failed to load groups",
            Operation::CreateUser => "Failed to create user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::LoadUsers => "load users",
            Operation::LoadGroups => "load groups",
            Operation::CreateUser => "create user",
        })
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{operation}: server responded with status {status}")]
    Status { operation: Operation, status: u16 },

    #[error("{operation}: request failed: {message}")]
    Transport { operation: Operation, message: String },

    #[error("{operation}: invalid response body: {message}")]
    Decode { operation: Operation, message: String },

    #[error("{operation}: rejected by service: {message}")]
    Rejected { operation: Operation, message: String },
}

impl GatewayError {
    pub fn operation(&self) -> Operation {
        match self {
            GatewayError::Status { operation, .. }
            | GatewayError::Transport { operation, .. }
            | GatewayError::Decode { operation, .. }
            | GatewayError::Rejected { operation, .. } => *operation,
        }
    }

    /// The single human-readable message for this failure. The cause is not
    /// included; log the error itself for that.
    pub fn user_message(&self) -> &'static str {
        self.operation().user_message()
    }

    fn rejected(operation: Operation, err: UserError) -> Self {
        GatewayError::Rejected {
            operation,
            message: err.to_string(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Users with their memberships, oldest first.
    async fn list_users(&self) -> GatewayResult<Vec<UserResponse>>;

    /// Groups ordered by name.
    async fn list_groups(&self) -> GatewayResult<Vec<Group>>;

    /// Submit a draft. Succeeds on any 2xx; the created user is not returned.
    async fn create_user(&self, draft: &Draft) -> GatewayResult<()>;
}

#[async_trait]
impl<G: DataGateway + ?Sized> DataGateway for Arc<G> {
    async fn list_users(&self) -> GatewayResult<Vec<UserResponse>> {
        (**self).list_users().await
    }

    async fn list_groups(&self) -> GatewayResult<Vec<Group>> {
        (**self).list_groups().await
    }

    async fn create_user(&self, draft: &Draft) -> GatewayResult<()> {
        (**self).create_user(draft).await
    }
}

/// Gateway over the JSON API at `{base_url}/api`.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Client with a per-request timeout.
    pub fn from_url(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: Operation, path: &str) -> GatewayResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| GatewayError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

fn transport(operation: Operation, err: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        operation,
        message: err.to_string(),
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn list_users(&self) -> GatewayResult<Vec<UserResponse>> {
        self.get_json(Operation::LoadUsers, "/users").await
    }

    async fn list_groups(&self) -> GatewayResult<Vec<Group>> {
        self.get_json(Operation::LoadGroups, "/groups").await
    }

    async fn create_user(&self, draft: &Draft) -> GatewayResult<()> {
        let operation = Operation::CreateUser;
        let response = self
            .client
            .post(self.url("/users"))
            .json(draft)
            .send()
            .await
            .map_err(|e| transport(operation, e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Status {
                operation,
                status: status.as_u16(),
            })
        }
    }
}

/// Gateway calling [`UserService`] in-process.
pub struct ServiceGateway<R> {
    service: UserService<R>,
}

impl<R> ServiceGateway<R> {
    pub fn new(service: UserService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R> DataGateway for ServiceGateway<R>
where
    R: UserRepository + GroupRepository + 'static,
{
    async fn list_users(&self) -> GatewayResult<Vec<UserResponse>> {
        self.service
            .list_users()
            .await
            .map_err(|e| GatewayError::rejected(Operation::LoadUsers, e))
    }

    async fn list_groups(&self) -> GatewayResult<Vec<Group>> {
        self.service
            .list_groups()
            .await
            .map_err(|e| GatewayError::rejected(Operation::LoadGroups, e))
    }

    async fn create_user(&self, draft: &Draft) -> GatewayResult<()> {
        self.service
            .create_user(draft.to_create_user())
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::rejected(Operation::CreateUser, e))
    }
}
