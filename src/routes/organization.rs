use crate::models::{RouteDescriptor, RouteMeta, View};

/// Organization Routes
///
/// Panels aimed at organization accounts. They only require a session; the guard
/// does not check the role here.
pub fn descriptors() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(
            "/admin-org",
            "AdminOrganizacion",
            View::AdminOrganizacion,
            RouteMeta::authenticated(),
        ),
        RouteDescriptor::new(
            "/usuarios-org",
            "UsuariosOrganizacion",
            View::UsuariosOrganizacion,
            RouteMeta::authenticated(),
        ),
    ]
}
