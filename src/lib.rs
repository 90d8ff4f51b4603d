use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core navigation components.
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod session;

// The route table, split into access tiers (Public, Admin, Organization, General).
pub mod routes;

use guard::{AccessGuard, GuardDecision, NavigationTarget};
use models::RouteMeta;
use session::{HeaderStorage, StoredSessionProvider};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use routes::{RouteTable, RouteTableState};

/// ApiDoc
///
/// Aggregates the JSON API paths and schemas into the OpenAPI document served at
/// `/api-docs/openapi.json`. View routes are not listed; they answer browser navigations.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::check_navigation),
    components(
        schemas(
            models::RouteDescriptor, models::RouteMeta, models::View, models::Session,
            models::NavigationCheckRequest, models::NavigationOutcome, models::Outcome,
            models::ViewResponse,
        )
    ),
    tags(
        (name = "finca-portal", description = "Farm Portal Navigation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared across all requests: configuration,
/// the validated route table, and the navigation guard.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub routes: RouteTableState,
    pub guard: AccessGuard,
}

impl AppState {
    pub fn new(config: AppConfig, routes: RouteTable) -> Self {
        Self {
            config,
            routes: Arc::new(routes),
            guard: AccessGuard::new(),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for RouteTableState {
    fn from_ref(app_state: &AppState) -> RouteTableState {
        app_state.routes.clone()
    }
}

/// GuardContext
///
/// State handed to the guard middleware of a single route: the guard itself,
/// where the session is stored, and the access flags of the route being guarded.
#[derive(Clone, Debug)]
pub struct GuardContext {
    pub guard: AccessGuard,
    pub session_key: String,
    pub meta: RouteMeta,
}

impl GuardContext {
    pub fn new(state: &AppState) -> Self {
        Self {
            guard: state.guard,
            session_key: state.config.session_key.clone(),
            meta: RouteMeta::default(),
        }
    }

    /// The same context, bound to one route's metadata.
    pub fn for_route(&self, meta: RouteMeta) -> Self {
        Self {
            meta,
            ..self.clone()
        }
    }
}

/// navigation_guard
///
/// Route-level middleware run before every view handler. It reads the stored session
/// forwarded with the request and asks the guard for a decision: proceed to the view,
/// or answer with a `303 See Other` to the redirect target.
async fn navigation_guard(
    State(context): State<GuardContext>,
    request: Request,
    next: Next,
) -> Response {
    let decision = {
        let provider = StoredSessionProvider::new(
            HeaderStorage::new(request.headers()),
            context.session_key.as_str(),
        );
        let target = NavigationTarget::new(request.uri().path(), context.meta);
        context.guard.check(&target, &provider)
    };

    match decision {
        GuardDecision::Proceed => next.run(request).await,
        GuardDecision::Redirect(path) => Redirect::to(path).into_response(),
    }
}

/// create_router
///
/// Assembles the portal: guarded view routes, the JSON API, documentation, and the
/// observability and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let guard_context = GuardContext::new(&state);

    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // GET /health
        // Liveness probe; never guarded.
        .route("/health", get(|| async { "ok" }))
        // JSON API: inspection of the table and of guard decisions.
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/navigation/check", post(handlers::check_navigation))
        // View Routes: every declared path, each behind its own guard layer.
        .merge(routes::view_routes(&state.routes, &guard_context))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// cors_layer
///
/// Any origin while developing locally; only the configured portal origin otherwise.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = config
        .portal_origin
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok());

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        Some(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        None => cors.allow_origin(Any),
    }
}

/// trace_span_logger
///
/// Builds the per-request tracing span, correlated by the `x-request-id` header.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
