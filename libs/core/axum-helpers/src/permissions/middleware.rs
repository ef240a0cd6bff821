use super::{PermissionSet, PermissionSource};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Resolves the viewer's [`PermissionSet`] and inserts it into the request
/// extensions.
///
/// ```ignore
/// let source = Arc::new(PermissionSource::Static(PermissionSet::parse_list("MANAGE_USERS")));
/// let pages = Router::new()
///     .route("/users", get(users_page))
///     .layer(axum::middleware::from_fn_with_state(source, attach_permissions));
/// ```
pub async fn attach_permissions(
    State(source): State<Arc<PermissionSource>>,
    mut request: Request,
    next: Next,
) -> Response {
    let permissions = match source.as_ref() {
        PermissionSource::Static(set) => set.clone(),
        PermissionSource::Header { name, fallback } => request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(PermissionSet::parse_list)
            .unwrap_or_else(|| fallback.clone()),
    };

    tracing::debug!(
        permissions = ?permissions.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        "Attached viewer permissions"
    );

    request.extensions_mut().insert(permissions);
    next.run(request).await
}
