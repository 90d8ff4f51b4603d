use finca_portal::{
    guard::GuardDecision,
    models::{
        NavigationCheckRequest, NavigationOutcome, Outcome, Role, RouteDescriptor, RouteMeta,
        Session, View,
    },
};

#[test]
fn test_route_meta_uses_camel_case_flag_names() {
    let json = serde_json::to_string(&RouteMeta::admin()).unwrap();
    assert_eq!(json, r#"{"requiresAuth":true,"requireAdmin":true}"#);
}

#[test]
fn test_route_meta_flags_default_to_false() {
    let meta: RouteMeta = serde_json::from_str("{}").unwrap();
    assert_eq!(meta, RouteMeta::public());

    let meta: RouteMeta = serde_json::from_str(r#"{"requiresAuth":true}"#).unwrap();
    assert_eq!(meta, RouteMeta::authenticated());
}

#[test]
fn test_role_landing_paths() {
    assert_eq!(Role::Admin.landing_path(), "/admin");
    assert_eq!(Role::Organizacion.landing_path(), "/admin-org");
    assert_eq!(Role::Producer.landing_path(), "/inicio");
}

#[test]
fn test_session_serializes_role_as_string() {
    let json = serde_json::to_string(&Session::new(Role::Organizacion)).unwrap();
    assert_eq!(json, r#"{"rol":"Organizacion"}"#);

    let json = serde_json::to_string(&Session::new(Role::Producer)).unwrap();
    assert_eq!(json, r#"{"rol":"Productor"}"#);
}

#[test]
fn test_descriptor_serialization() {
    let descriptor = RouteDescriptor::new(
        "/fincas/:id/detalle",
        "user-finca",
        View::UserFinca,
        RouteMeta::authenticated(),
    );
    let json = serde_json::to_value(&descriptor).unwrap();

    assert_eq!(json["path"], "/fincas/:id/detalle");
    assert_eq!(json["view"], "UserFinca");
    assert_eq!(json["meta"]["requiresAuth"], true);
}

#[test]
fn test_outcome_from_decision() {
    let proceed = NavigationOutcome::from(GuardDecision::Proceed);
    assert_eq!(
        serde_json::to_string(&proceed).unwrap(),
        r#"{"outcome":"proceed"}"#
    );

    let redirect = NavigationOutcome::from(GuardDecision::Redirect("/admin-org"));
    assert_eq!(redirect.outcome, Outcome::Redirect);
    assert_eq!(
        serde_json::to_string(&redirect).unwrap(),
        r#"{"outcome":"redirect","redirectTo":"/admin-org"}"#
    );
}

#[test]
fn test_check_request_optional_fields() {
    let request: NavigationCheckRequest = serde_json::from_str(r#"{"route":"inicio"}"#).unwrap();
    assert_eq!(request.route, "inicio");
    assert!(request.path.is_none());
    assert!(request.stored_session.is_none());

    let json = serde_json::to_string(&request).unwrap();
    assert_eq!(json, r#"{"route":"inicio"}"#);
}
