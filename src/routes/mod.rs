//! Route Table Module Index
//!
//! Declares every view of the portal, grouped into tiers by access requirements.
//! The tiers are only an authoring convenience: the guard reads each route's own
//! `RouteMeta`, so a route's access is decided by its declaration, not by its file.

use axum::{
    Router,
    extract::Path,
    http::Uri,
    middleware,
    routing::{MethodRouter, get},
};
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};
use thiserror::Error;

use crate::{
    AppState, GuardContext, handlers,
    models::RouteDescriptor,
    navigation_guard,
};

/// Anonymous views, including the login page.
pub mod public;

/// Views restricted to the `Admin` role.
pub mod admin;

/// Session-only panels for organization accounts.
pub mod organization;

/// Session-only views for producers and everyone else.
pub mod general;

/// RouteTableError
///
/// Reasons a set of descriptors cannot form a route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route path `{0}` must start with `/`")]
    RelativePath(String),
    #[error("route path `{0}` has an optional segment that is not the last one")]
    OptionalSegmentNotLast(String),
    #[error("route path `{0}` overlaps a path declared earlier")]
    DuplicatePath(String),
    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),
}

/// RouteTable
///
/// The validated, immutable list of route descriptors.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

/// RouteTableState
///
/// Shared handle to the route table held in the application state.
pub type RouteTableState = Arc<RouteTable>;

impl RouteTable {
    /// new
    ///
    /// Validates `routes` and builds the table.
    ///
    /// A route flagged `require_admin` is normalized to also require authentication,
    /// so an administrator-only view can never be declared reachable without a session.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut shapes = HashSet::new();
        let mut validated = Vec::with_capacity(routes.len());

        for mut route in routes {
            if !route.path.starts_with('/') {
                return Err(RouteTableError::RelativePath(route.path));
            }
            if !route.optional_segment_is_last() {
                return Err(RouteTableError::OptionalSegmentNotLast(route.path));
            }
            if !names.insert(route.name.clone()) {
                return Err(RouteTableError::DuplicateName(route.name));
            }
            // Two paths differing only in parameter names match the same requests.
            for shape in route.axum_paths().iter().map(|p| path_shape(p)) {
                if !shapes.insert(shape) {
                    return Err(RouteTableError::DuplicatePath(route.path));
                }
            }

            if route.meta.require_admin && !route.meta.requires_auth {
                tracing::warn!(
                    route = %route.name,
                    path = %route.path,
                    "admin-only route declared without requires_auth; requiring a session"
                );
                route.meta.requires_auth = true;
            }

            validated.push(route);
        }

        Ok(Self { routes: validated })
    }

    /// standard
    ///
    /// The portal's route table, assembled from the public, admin, organization,
    /// and general tiers in that order.
    pub fn standard() -> Result<Self, RouteTableError> {
        let mut routes = public::descriptors();
        routes.extend(admin::descriptors());
        routes.extend(organization::descriptors());
        routes.extend(general::descriptors());
        Self::new(routes)
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Looks up a route by its declared path pattern (e.g. `/fincas/:id/detalle`).
    pub fn by_path(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn descriptors(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteDescriptor {
    /// Whether the path declares any `:param` segment.
    pub fn has_params(&self) -> bool {
        self.path.split('/').any(|segment| segment.starts_with(':'))
    }

    fn optional_segment_is_last(&self) -> bool {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        segments
            .iter()
            .rev()
            .skip(1)
            .all(|segment| !segment.ends_with('?'))
    }

    /// Every path registered with axum for this route: the translated paths and
    /// their trailing-slash forms, which browser navigation also produces.
    pub fn registrations(&self) -> Vec<String> {
        self.axum_paths()
            .into_iter()
            .flat_map(|path| {
                if path == "/" {
                    vec![path]
                } else {
                    let slashed = format!("{path}/");
                    vec![path, slashed]
                }
            })
            .collect()
    }

    /// axum_paths
    ///
    /// Translates the declared path into axum's `{param}` syntax. A trailing optional
    /// segment (`:id?`) yields two registrations, one without and one with the segment.
    pub fn axum_paths(&self) -> Vec<String> {
        let mut required = String::new();
        let mut optional = None;

        for segment in self.path.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(':') {
                Some(param) => match param.strip_suffix('?') {
                    Some(param) => optional = Some(param),
                    None => required.push_str(&format!("/{{{param}}}")),
                },
                None => {
                    required.push('/');
                    required.push_str(segment);
                }
            }
        }

        let base = if required.is_empty() {
            "/".to_string()
        } else {
            required
        };

        match optional {
            None => vec![base],
            Some(param) => {
                let with_param = format!("{}/{{{param}}}", base.trim_end_matches('/'));
                vec![base, with_param]
            }
        }
    }
}

/// Reduces an axum path to its matching shape by erasing parameter names.
fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with('{') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// view_routes
///
/// Registers every descriptor as a `GET` route. Each route gets its own guard layer
/// carrying the route's metadata, so the guard runs before the view handler on
/// every navigation.
pub fn view_routes(table: &RouteTable, context: &GuardContext) -> Router<AppState> {
    table.iter().fold(Router::new(), |router, descriptor| {
        let guarded = descriptor
            .registrations()
            .into_iter()
            .fold(Router::new(), |tier, path| {
                let with_params = path.contains('{');
                tier.route(&path, view_route(descriptor.clone(), with_params))
            })
            .route_layer(middleware::from_fn_with_state(
                context.for_route(descriptor.meta),
                navigation_guard,
            ));

        router.merge(guarded)
    })
}

/// Builds the view handler for one registration, extracting path parameters only
/// where the registered path declares some.
fn view_route(descriptor: RouteDescriptor, with_params: bool) -> MethodRouter<AppState> {
    if with_params {
        get(
            move |Path(params): Path<BTreeMap<String, String>>, uri: Uri| async move {
                handlers::render_view(&descriptor, uri.path(), params)
            },
        )
    } else {
        get(move |uri: Uri| async move {
            handlers::render_view(&descriptor, uri.path(), BTreeMap::new())
        })
    }
}
