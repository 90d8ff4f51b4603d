use crate::models::{RouteDescriptor, RouteMeta, View};

/// Admin Routes
///
/// Views restricted to signed-in users holding the `Admin` role. Everyone else
/// is redirected: anonymous visitors to login, other roles to their own landing page.
pub fn descriptors() -> Vec<RouteDescriptor> {
    vec![
        // GET /admin
        // Farm overview; also the administrators' landing page.
        RouteDescriptor::new("/admin", "admin", View::AdminFincas, RouteMeta::admin()),
        // GET /usuarios
        // User management across all organizations.
        RouteDescriptor::new("/usuarios", "usuarios", View::AdminUsuarios, RouteMeta::admin()),
        // GET /admin/plan-operativo/:id?
        // Operating plan editor. Without an id it opens a blank plan.
        RouteDescriptor::new(
            "/admin/plan-operativo/:id?",
            "plan-operativo-admin",
            View::PlanOperativo,
            RouteMeta::admin(),
        ),
        // GET /admin/prospectos
        // Prospects captured from the public contact form.
        RouteDescriptor::new(
            "/admin/prospectos",
            "ProspectosAdmin",
            View::ProspectosAdmin,
            RouteMeta::admin(),
        ),
    ]
}
