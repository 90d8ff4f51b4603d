use crate::models::{RouteDescriptor, RouteMeta, View};

/// Public Routes
///
/// Views reachable without signing in. The login view lives here; the guard
/// still turns signed-in visitors of `/` away to their landing page.
pub fn descriptors() -> Vec<RouteDescriptor> {
    vec![
        // GET /
        // The login view.
        RouteDescriptor::new("/", "login", View::UserLogin, RouteMeta::public()),
        // GET /contacto
        // Marketing landing page with the contact form.
        RouteDescriptor::new("/contacto", "Contacto", View::LandingPage, RouteMeta::public()),
        // GET /estadisticas
        // Aggregated, anonymous production statistics.
        RouteDescriptor::new(
            "/estadisticas",
            "PublicStats",
            View::PublicStats,
            RouteMeta::public(),
        ),
    ]
}
