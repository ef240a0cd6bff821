//! The admin users screen as a state machine.
//!
//! [`ScreenState`] only changes through [`ScreenState::apply`].
//! [`AdminUsersScreen`] runs the gateway calls and feeds their outcomes back
//! as [`ScreenEvent`]s.

use domain_users::{Group, UserResponse};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::str::FromStr;
use thiserror::Error;

use crate::draft::{Draft, DraftField};
use crate::gateway::{DataGateway, GatewayError};

/// When the initial loading indicator clears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingPolicy {
    /// As soon as the groups request settles, whatever the users request does.
    AfterGroups,
    /// Once both requests have settled.
    #[default]
    AfterBoth,
}

#[derive(Debug, Error)]
#[error("unknown loading policy '{0}', expected 'after-groups' or 'after-both'")]
pub struct UnknownLoadingPolicy(String);

impl FromStr for LoadingPolicy {
    type Err = UnknownLoadingPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "after-groups" => Ok(LoadingPolicy::AfterGroups),
            "after-both" => Ok(LoadingPolicy::AfterBoth),
            other => Err(UnknownLoadingPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    UsersLoaded(Vec<UserResponse>),
    UsersFailed(String),
    GroupsLoaded(Vec<Group>),
    GroupsFailed(String),
    DraftEdited(DraftField),
    SubmitSucceeded,
    SubmitFailed(String),
}

impl ScreenEvent {
    fn from_users(result: Result<Vec<UserResponse>, GatewayError>) -> Self {
        match result {
            Ok(users) => ScreenEvent::UsersLoaded(users),
            Err(e) => {
                tracing::warn!(error = %e, "Users request failed");
                ScreenEvent::UsersFailed(e.user_message().to_string())
            }
        }
    }

    fn from_groups(result: Result<Vec<Group>, GatewayError>) -> Self {
        match result {
            Ok(groups) => ScreenEvent::GroupsLoaded(groups),
            Err(e) => {
                tracing::warn!(error = %e, "Groups request failed");
                ScreenEvent::GroupsFailed(e.user_message().to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenState {
    pub users: Vec<UserResponse>,
    pub groups: Vec<Group>,
    pub loading: bool,
    /// Once set, replaces the whole page. Never cleared by later events.
    pub error: Option<String>,
    pub draft: Draft,
    users_settled: bool,
    groups_settled: bool,
    policy: LoadingPolicy,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new(LoadingPolicy::default())
    }
}

impl ScreenState {
    pub fn new(policy: LoadingPolicy) -> Self {
        Self {
            users: Vec::new(),
            groups: Vec::new(),
            loading: true,
            error: None,
            draft: Draft::empty(),
            users_settled: false,
            groups_settled: false,
            policy,
        }
    }

    pub fn policy(&self) -> LoadingPolicy {
        self.policy
    }

    pub fn users_settled(&self) -> bool {
        self.users_settled
    }

    pub fn groups_settled(&self) -> bool {
        self.groups_settled
    }

    pub fn apply(self, event: ScreenEvent) -> Self {
        match event {
            ScreenEvent::UsersLoaded(users) => Self {
                users,
                users_settled: true,
                ..self
            }
            .refresh_loading(),
            ScreenEvent::UsersFailed(message) => Self {
                users_settled: true,
                ..self
            }
            .fail(message)
            .refresh_loading(),
            ScreenEvent::GroupsLoaded(groups) => {
                let draft = self.draft.clone().retain_known_groups(&groups);
                Self {
                    groups,
                    draft,
                    groups_settled: true,
                    ..self
                }
                .refresh_loading()
            }
            ScreenEvent::GroupsFailed(message) => Self {
                groups_settled: true,
                ..self
            }
            .fail(message)
            .refresh_loading(),
            ScreenEvent::DraftEdited(field) => {
                let draft = self.draft.clone().with_field(field).retain_known_groups(&self.groups);
                Self { draft, ..self }
            }
            ScreenEvent::SubmitSucceeded => Self {
                draft: Draft::empty(),
                ..self
            },
            ScreenEvent::SubmitFailed(message) => self.fail(message),
        }
    }

    fn fail(self, message: String) -> Self {
        Self {
            error: Some(message),
            ..self
        }
    }

    fn refresh_loading(self) -> Self {
        let loading = match self.policy {
            LoadingPolicy::AfterGroups => !self.groups_settled,
            LoadingPolicy::AfterBoth => !(self.users_settled && self.groups_settled),
        };
        Self { loading, ..self }
    }
}

/// One page's worth of screen: a gateway plus the state it drives.
pub struct AdminUsersScreen<G> {
    gateway: G,
    state: ScreenState,
}

impl<G: DataGateway> AdminUsersScreen<G> {
    pub fn new(gateway: G, policy: LoadingPolicy) -> Self {
        Self {
            gateway,
            state: ScreenState::new(policy),
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn into_state(self) -> ScreenState {
        self.state
    }

    fn dispatch(state: &mut ScreenState, event: ScreenEvent) {
        *state = std::mem::take(state).apply(event);
    }

    /// Fetch users and groups concurrently, applying each outcome as it
    /// arrives.
    pub async fn mount(&mut self) {
        let gateway = &self.gateway;
        let mut pending: FuturesUnordered<BoxFuture<'_, ScreenEvent>> = FuturesUnordered::new();
        pending.push(Box::pin(async move {
            ScreenEvent::from_users(gateway.list_users().await)
        }));
        pending.push(Box::pin(async move {
            ScreenEvent::from_groups(gateway.list_groups().await)
        }));

        while let Some(event) = pending.next().await {
            Self::dispatch(&mut self.state, event);
        }
    }

    pub fn edit(&mut self, field: DraftField) {
        Self::dispatch(&mut self.state, ScreenEvent::DraftEdited(field));
    }

    /// Post the current draft. On success the draft is cleared and the users
    /// list fetched again.
    pub async fn submit(&mut self) {
        match self.gateway.create_user(&self.state.draft).await {
            Ok(()) => {
                tracing::info!("User created from admin screen");
                Self::dispatch(&mut self.state, ScreenEvent::SubmitSucceeded);
                self.refresh_users().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "User creation failed");
                Self::dispatch(
                    &mut self.state,
                    ScreenEvent::SubmitFailed(e.user_message().to_string()),
                );
            }
        }
    }

    pub async fn refresh_users(&mut self) {
        let event = ScreenEvent::from_users(self.gateway.list_users().await);
        Self::dispatch(&mut self.state, event);
    }
}
