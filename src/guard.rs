use crate::{
    models::{LOGIN_PATH, Role, RouteMeta, SessionStatus},
    session::SessionProvider,
};

/// GuardDecision
///
/// The only two results a navigation check can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation continue to the requested view.
    Proceed,
    /// Abort the navigation and send the user to this path instead.
    Redirect(&'static str),
}

/// NavigationTarget
///
/// The destination of a navigation attempt: the concrete path being visited and
/// the access flags of the route that matched it.
#[derive(Debug, Clone, Copy)]
pub struct NavigationTarget<'a> {
    pub path: &'a str,
    pub meta: RouteMeta,
}

impl<'a> NavigationTarget<'a> {
    pub fn new(path: &'a str, meta: RouteMeta) -> Self {
        Self { path, meta }
    }
}

/// AccessGuard
///
/// The pre-navigation check. Stateless: the session is read through the injected
/// provider on every call, so one guard serves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    pub fn new() -> Self {
        Self
    }

    /// check
    ///
    /// Reads the current session from `provider` and decides the navigation.
    pub fn check<P>(&self, target: &NavigationTarget<'_>, provider: &P) -> GuardDecision
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.current();
        let decision = decide(target, &session);

        tracing::debug!(
            path = %target.path,
            requires_auth = target.meta.requires_auth,
            require_admin = target.meta.require_admin,
            role = session.session().map(|s| s.rol.as_str()).unwrap_or("none"),
            decision = ?decision,
            "navigation guard evaluated"
        );

        decision
    }
}

/// decide
///
/// The guard's decision rules, evaluated in order, first match wins:
///
/// 1. Auth required and nobody signed in: back to login.
/// 2. Admin required and the user is not an administrator: to the user's own
///    landing page. With no session at all this also goes to login, even when
///    the route forgot to declare `requires_auth`.
/// 3. A signed-in user visiting the login page: to the user's landing page.
/// 4. Anything else proceeds.
pub fn decide(target: &NavigationTarget<'_>, session: &SessionStatus) -> GuardDecision {
    let session = session.session();

    if target.meta.requires_auth && session.is_none() {
        return GuardDecision::Redirect(LOGIN_PATH);
    }

    if target.meta.require_admin {
        match session.map(|s| s.rol) {
            None => return GuardDecision::Redirect(LOGIN_PATH),
            Some(Role::Admin) => {}
            Some(role @ (Role::Organizacion | Role::Producer)) => {
                return GuardDecision::Redirect(role.landing_path());
            }
        }
    }

    if target.path == LOGIN_PATH {
        if let Some(session) = session {
            return GuardDecision::Redirect(session.rol.landing_path());
        }
    }

    GuardDecision::Proceed
}
