use crate::models::{RouteDescriptor, RouteMeta, View};

/// General Routes
///
/// Views for producers and any signed-in user.
pub fn descriptors() -> Vec<RouteDescriptor> {
    vec![
        // GET /inicio
        // Producer home; the landing page for every non-privileged role.
        RouteDescriptor::new("/inicio", "inicio", View::UserHome, RouteMeta::authenticated()),
        // GET /fincas/:id/detalle
        // Detail view of a single farm.
        RouteDescriptor::new(
            "/fincas/:id/detalle",
            "user-finca",
            View::UserFinca,
            RouteMeta::authenticated(),
        ),
        // GET /ayuda
        RouteDescriptor::new("/ayuda", "Ayuda", View::CentroAyuda, RouteMeta::authenticated()),
    ]
}
