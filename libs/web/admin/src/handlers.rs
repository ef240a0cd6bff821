use axum::{
    Router,
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::Form;
use axum_helpers::{AppError, PermissionSet};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::draft::DraftField;
use crate::gateway::DataGateway;
use crate::permission::{Access, MANAGE_USERS};
use crate::screen::{AdminUsersScreen, LoadingPolicy, ScreenState};
use crate::views::{AdminViews, PageView};

/// Shared by every admin page request.
pub struct AdminState<G: ?Sized> {
    pub gateway: Arc<G>,
    pub views: Arc<AdminViews>,
    pub policy: LoadingPolicy,
}

impl<G: ?Sized> Clone for AdminState<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            views: Arc::clone(&self.views),
            policy: self.policy,
        }
    }
}

/// `/users` page routes. Nest under `/admin` and layer
/// [`axum_helpers::attach_permissions`] on top so the viewer's grant is known.
pub fn router<G>(state: AdminState<G>) -> Router
where
    G: DataGateway + ?Sized + 'static,
{
    Router::new()
        .route("/users", get(users_page::<G>).post(submit_user::<G>))
        .with_state(Arc::new(state))
}

/// Submitted new-user form. `groupIds` may repeat.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub group_ids: Vec<String>,
}

impl DraftForm {
    /// Unparseable ids are dropped; they cannot name a loaded group anyway.
    fn parsed_group_ids(&self) -> Vec<Uuid> {
        self.group_ids
            .iter()
            .filter_map(|raw| Uuid::parse_str(raw.trim()).ok())
            .collect()
    }
}

async fn users_page<G>(
    State(state): State<Arc<AdminState<G>>>,
    OriginalUri(uri): OriginalUri,
    permissions: PermissionSet,
) -> Response
where
    G: DataGateway + ?Sized + 'static,
{
    let access = Access::check(&permissions, &MANAGE_USERS);

    let mut screen = AdminUsersScreen::new(Arc::clone(&state.gateway), state.policy);
    screen.mount().await;

    render(&state.views, screen.state(), access, uri.path())
}

async fn submit_user<G>(
    State(state): State<Arc<AdminState<G>>>,
    OriginalUri(uri): OriginalUri,
    permissions: PermissionSet,
    Form(form): Form<DraftForm>,
) -> Response
where
    G: DataGateway + ?Sized + 'static,
{
    let access = Access::check(&permissions, &MANAGE_USERS);

    let mut screen = AdminUsersScreen::new(Arc::clone(&state.gateway), state.policy);
    screen.mount().await;

    if !access.is_authorized() {
        tracing::warn!(
            permission = %MANAGE_USERS,
            "Dropped user creation from viewer without permission"
        );
    } else if screen.state().error.is_some() {
        tracing::info!("Skipped user creation: screen failed to load");
    } else {
        let group_ids = form.parsed_group_ids();
        screen.edit(DraftField::Name(form.name));
        screen.edit(DraftField::Email(form.email));
        screen.edit(DraftField::Password(form.password));
        screen.edit(DraftField::GroupIds(group_ids));
        screen.submit().await;
    }

    render(&state.views, screen.state(), access, uri.path())
}

fn render(views: &AdminViews, state: &ScreenState, access: Access, action: &str) -> Response {
    let status = match PageView::select(state, access) {
        PageView::Denied => StatusCode::FORBIDDEN,
        _ => StatusCode::OK,
    };

    match views.render_users_page(state, access, action) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::InternalServerError(e.to_string()).into_response(),
    }
}
