use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::guard::GuardDecision;

// --- Well-known Navigation Paths ---

/// The login view. Anonymous visitors are sent here by the guard.
pub const LOGIN_PATH: &str = "/";
/// Landing page for administrators.
pub const ADMIN_LANDING_PATH: &str = "/admin";
/// Landing page for organization accounts.
pub const ORGANIZATION_LANDING_PATH: &str = "/admin-org";
/// Landing page for producers and any other role.
pub const GENERAL_LANDING_PATH: &str = "/inicio";

// --- Identity ---

/// Role
///
/// The closed set of roles a signed-in user can hold. The wire form is the string
/// written by the login view: `"Admin"` and `"Organizacion"` map to their variants,
/// every other value, including `null` and non-string values, is a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum Role {
    Admin,
    Organizacion,
    #[default]
    Producer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Organizacion => "Organizacion",
            Role::Producer => "Productor",
        }
    }

    /// The default destination for this role after login or after a denied admin-only access.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_LANDING_PATH,
            Role::Organizacion => ORGANIZATION_LANDING_PATH,
            Role::Producer => GENERAL_LANDING_PATH,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Admin" => Role::Admin,
            "Organizacion" => Role::Organizacion,
            _ => Role::Producer,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(role) => Role::from(role.to_string()),
            None => Role::Producer,
        })
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Session
///
/// The signed-in user's record as serialized into client-side storage at login.
/// Only `rol` is consumed; any other stored field is ignored. A record without a
/// `rol` field belongs to the default (producer) role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Session {
    #[serde(default)]
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Organizacion")]
    pub rol: Role,
}

impl Session {
    pub fn new(rol: Role) -> Self {
        Self { rol }
    }
}

/// SessionStatus
///
/// The result of reading the stored session: either nobody is signed in, or an
/// immutable session value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Absent,
    Active(Session),
}

impl SessionStatus {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionStatus::Absent => None,
            SessionStatus::Active(session) => Some(session),
        }
    }
}

impl From<Option<Session>> for SessionStatus {
    fn from(session: Option<Session>) -> Self {
        session.map_or(SessionStatus::Absent, SessionStatus::Active)
    }
}

// --- Route Table Schemas ---

/// RouteMeta
///
/// Access flags attached to a route. Both default to `false`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, ToSchema,
)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteMeta {
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub require_admin: bool,
}

impl RouteMeta {
    /// Open to everyone, signed in or not.
    pub const fn public() -> Self {
        Self {
            requires_auth: false,
            require_admin: false,
        }
    }

    /// Requires any signed-in user.
    pub const fn authenticated() -> Self {
        Self {
            requires_auth: true,
            require_admin: false,
        }
    }

    /// Requires a signed-in administrator.
    pub const fn admin() -> Self {
        Self {
            requires_auth: true,
            require_admin: true,
        }
    }
}

/// View
///
/// Reference to the frontend view component a route displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum View {
    UserLogin,
    LandingPage,
    PublicStats,
    AdminFincas,
    AdminUsuarios,
    PlanOperativo,
    ProspectosAdmin,
    AdminOrganizacion,
    UsuariosOrganizacion,
    UserHome,
    UserFinca,
    CentroAyuda,
}

/// RouteDescriptor
///
/// One entry of the route table. Paths use the `:param` syntax, with a trailing
/// `?` marking an optional segment (e.g. `/admin/plan-operativo/:id?`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteDescriptor {
    #[schema(example = "/fincas/:id/detalle")]
    pub path: String,
    #[schema(example = "user-finca")]
    pub name: String,
    pub view: View,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(path: &str, name: &str, view: View, meta: RouteMeta) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view,
            meta,
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// NavigationCheckRequest
///
/// Input payload for `POST /api/navigation/check`. Asks the guard what would happen
/// if the holder of `storedSession` navigated to the named route.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationCheckRequest {
    /// Route name as declared in the route table.
    #[schema(example = "admin")]
    pub route: String,
    /// Concrete path being visited. Defaults to the route's declared path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The raw value held in client storage, exactly as written at login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = r#"{"rol":"Organizacion"}"#)]
    pub stored_session: Option<String>,
}

// --- Output Schemas ---

/// Outcome
///
/// The two possible results of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Outcome {
    Proceed,
    Redirect,
}

/// NavigationOutcome
///
/// Output schema of `POST /api/navigation/check`. `redirectTo` is present only
/// when the outcome is a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationOutcome {
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl From<GuardDecision> for NavigationOutcome {
    fn from(decision: GuardDecision) -> Self {
        match decision {
            GuardDecision::Proceed => Self {
                outcome: Outcome::Proceed,
                redirect_to: None,
            },
            GuardDecision::Redirect(path) => Self {
                outcome: Outcome::Redirect,
                redirect_to: Some(path.to_string()),
            },
        }
    }
}

/// ViewResponse
///
/// What a permitted navigation resolves to: the view the frontend should mount,
/// the route it came from, and the path parameters that were matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ViewResponse {
    pub route: String,
    pub view: View,
    pub path: String,
    pub params: BTreeMap<String, String>,
}
