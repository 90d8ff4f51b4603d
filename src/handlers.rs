use crate::{
    AppState,
    guard::NavigationTarget,
    models::{NavigationCheckRequest, NavigationOutcome, RouteDescriptor, ViewResponse},
    session::{MemoryStorage, StoredSessionProvider},
};
use axum::{Json, extract::State, http::StatusCode};
use std::collections::BTreeMap;

// --- View Handler ---

/// render_view
///
/// [View Route] Runs only after the guard let the navigation proceed. Answers with
/// the view the frontend should mount and the path parameters that were matched.
pub fn render_view(
    descriptor: &RouteDescriptor,
    path: &str,
    params: BTreeMap<String, String>,
) -> Json<ViewResponse> {
    Json(ViewResponse {
        route: descriptor.name.clone(),
        view: descriptor.view,
        path: path.to_string(),
        params,
    })
}

// --- API Handlers ---

/// list_routes
///
/// [Public Route] Returns the full route table with its access metadata, in
/// declaration order.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route table", body = [RouteDescriptor]))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteDescriptor>> {
    Json(state.routes.descriptors().to_vec())
}

/// check_navigation
///
/// [Public Route] Evaluates the guard for a navigation to the named route, using the
/// stored session value supplied in the payload instead of the request headers.
///
/// Returns 404 when the route name is not in the table.
#[utoipa::path(
    post,
    path = "/api/navigation/check",
    request_body = NavigationCheckRequest,
    responses(
        (status = 200, description = "Guard decision", body = NavigationOutcome),
        (status = 404, description = "Unknown route name")
    )
)]
pub async fn check_navigation(
    State(state): State<AppState>,
    Json(payload): Json<NavigationCheckRequest>,
) -> Result<Json<NavigationOutcome>, StatusCode> {
    let descriptor = state
        .routes
        .by_name(&payload.route)
        .ok_or(StatusCode::NOT_FOUND)?;

    let key = state.config.session_key.as_str();
    let mut storage = MemoryStorage::new();
    if let Some(raw) = payload.stored_session {
        storage.set_item(key, raw);
    }
    let provider = StoredSessionProvider::new(storage, key);

    let path = payload.path.as_deref().unwrap_or(descriptor.path.as_str());
    let decision = state
        .guard
        .check(&NavigationTarget::new(path, descriptor.meta), &provider);

    Ok(Json(decision.into()))
}
