use finca_portal::{
    models::{RouteDescriptor, RouteMeta, View},
    routes::{RouteTable, RouteTableError},
};

fn route(path: &str, name: &str, meta: RouteMeta) -> RouteDescriptor {
    RouteDescriptor::new(path, name, View::UserHome, meta)
}

// --- Standard Table ---

#[test]
fn test_standard_table_declares_every_view() {
    let table = RouteTable::standard().unwrap();
    assert_eq!(table.len(), 12);

    let expected = [
        ("/", "login", View::UserLogin, RouteMeta::public()),
        ("/contacto", "Contacto", View::LandingPage, RouteMeta::public()),
        ("/estadisticas", "PublicStats", View::PublicStats, RouteMeta::public()),
        ("/admin", "admin", View::AdminFincas, RouteMeta::admin()),
        ("/usuarios", "usuarios", View::AdminUsuarios, RouteMeta::admin()),
        (
            "/admin/plan-operativo/:id?",
            "plan-operativo-admin",
            View::PlanOperativo,
            RouteMeta::admin(),
        ),
        ("/admin/prospectos", "ProspectosAdmin", View::ProspectosAdmin, RouteMeta::admin()),
        (
            "/admin-org",
            "AdminOrganizacion",
            View::AdminOrganizacion,
            RouteMeta::authenticated(),
        ),
        (
            "/usuarios-org",
            "UsuariosOrganizacion",
            View::UsuariosOrganizacion,
            RouteMeta::authenticated(),
        ),
        ("/inicio", "inicio", View::UserHome, RouteMeta::authenticated()),
        ("/fincas/:id/detalle", "user-finca", View::UserFinca, RouteMeta::authenticated()),
        ("/ayuda", "Ayuda", View::CentroAyuda, RouteMeta::authenticated()),
    ];

    for (declared, (path, name, view, meta)) in table.iter().zip(expected) {
        assert_eq!(declared.path, path);
        assert_eq!(declared.name, name);
        assert_eq!(declared.view, view);
        assert_eq!(declared.meta, meta, "meta of {name}");
    }
}

#[test]
fn test_every_admin_route_requires_auth() {
    let table = RouteTable::standard().unwrap();
    assert!(
        table
            .iter()
            .filter(|r| r.meta.require_admin)
            .all(|r| r.meta.requires_auth)
    );
}

#[test]
fn test_lookup_by_name_and_path() {
    let table = RouteTable::standard().unwrap();

    assert_eq!(table.by_name("user-finca").unwrap().path, "/fincas/:id/detalle");
    assert_eq!(table.by_path("/ayuda").unwrap().name, "Ayuda");
    assert!(table.by_name("missing").is_none());
    // Concrete paths are not patterns.
    assert!(table.by_path("/fincas/3/detalle").is_none());
}

// --- Validation ---

#[test]
fn test_admin_flag_implies_auth() {
    let meta = RouteMeta {
        requires_auth: false,
        require_admin: true,
    };
    let table = RouteTable::new(vec![route("/reportes", "reportes", meta)]).unwrap();

    let declared = table.by_name("reportes").unwrap();
    assert!(declared.meta.requires_auth);
    assert!(declared.meta.require_admin);
}

#[test]
fn test_rejects_relative_paths() {
    let result = RouteTable::new(vec![route("inicio", "inicio", RouteMeta::authenticated())]);
    assert_eq!(result.unwrap_err(), RouteTableError::RelativePath("inicio".to_string()));
}

#[test]
fn test_rejects_duplicate_names() {
    let result = RouteTable::new(vec![
        route("/a", "dup", RouteMeta::public()),
        route("/b", "dup", RouteMeta::public()),
    ]);
    assert_eq!(result.unwrap_err(), RouteTableError::DuplicateName("dup".to_string()));
}

#[test]
fn test_rejects_duplicate_paths() {
    let result = RouteTable::new(vec![
        route("/ayuda", "a", RouteMeta::public()),
        route("/ayuda", "b", RouteMeta::authenticated()),
    ]);
    assert_eq!(result.unwrap_err(), RouteTableError::DuplicatePath("/ayuda".to_string()));
}

#[test]
fn test_rejects_paths_differing_only_in_parameter_names() {
    let result = RouteTable::new(vec![
        route("/fincas/:id", "a", RouteMeta::authenticated()),
        route("/fincas/:codigo", "b", RouteMeta::authenticated()),
    ]);
    assert_eq!(
        result.unwrap_err(),
        RouteTableError::DuplicatePath("/fincas/:codigo".to_string())
    );
}

#[test]
fn test_rejects_overlap_with_optional_segment() {
    // `/plan/:id?` also claims `/plan`.
    let result = RouteTable::new(vec![
        route("/plan/:id?", "a", RouteMeta::admin()),
        route("/plan", "b", RouteMeta::admin()),
    ]);
    assert_eq!(result.unwrap_err(), RouteTableError::DuplicatePath("/plan".to_string()));
}

#[test]
fn test_rejects_optional_segment_before_the_end() {
    let result = RouteTable::new(vec![route("/a/:id?/b", "a", RouteMeta::public())]);
    assert_eq!(
        result.unwrap_err(),
        RouteTableError::OptionalSegmentNotLast("/a/:id?/b".to_string())
    );
}

#[test]
fn test_empty_table_is_valid() {
    let table = RouteTable::new(vec![]).unwrap();
    assert!(table.is_empty());
}

// --- Path Translation ---

#[test]
fn test_axum_paths() {
    let cases = [
        ("/", vec!["/"]),
        ("/ayuda", vec!["/ayuda"]),
        ("/fincas/:id/detalle", vec!["/fincas/{id}/detalle"]),
        (
            "/admin/plan-operativo/:id?",
            vec!["/admin/plan-operativo", "/admin/plan-operativo/{id}"],
        ),
        ("/:id?", vec!["/", "/{id}"]),
    ];

    for (path, expected) in cases {
        let descriptor = route(path, "r", RouteMeta::public());
        assert_eq!(descriptor.axum_paths(), expected, "path {path}");
    }
}

#[test]
fn test_has_params() {
    assert!(route("/fincas/:id/detalle", "r", RouteMeta::public()).has_params());
    assert!(route("/plan/:id?", "r", RouteMeta::public()).has_params());
    assert!(!route("/admin-org", "r", RouteMeta::public()).has_params());
}

#[test]
fn test_registrations_add_trailing_slash_forms() {
    let plan = route("/admin/plan-operativo/:id?", "r", RouteMeta::admin());
    assert_eq!(
        plan.registrations(),
        vec![
            "/admin/plan-operativo",
            "/admin/plan-operativo/",
            "/admin/plan-operativo/{id}",
            "/admin/plan-operativo/{id}/",
        ]
    );

    // The root is never doubled.
    assert_eq!(route("/", "r", RouteMeta::public()).registrations(), vec!["/"]);
}
