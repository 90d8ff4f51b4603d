use std::env;

/// AppConfig
///
/// Holds the portal's configuration. Immutable once loaded and shared with the
/// router and the navigation guard through `FromRef`, as part of the Unified State Pattern.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls logging format and CORS policy.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Storage key under which the login view writes the serialized session.
    pub session_key: String,
    // Origin of the deployed frontend. `None` means any origin is allowed (local only).
    pub portal_origin: Option<String>,
}

/// Env
///
/// Defines the runtime context, used to switch between developer conveniences
/// (pretty logs, permissive CORS) and the hardened production setup.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Storage key used by the login view when none is configured.
pub const DEFAULT_SESSION_KEY: &str = "usuario";

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for test state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            portal_origin: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables and fails fast when
    /// production requirements are not met.
    ///
    /// # Panics
    /// Panics in production if `PORTAL_ORIGIN` is missing or is not a valid header value.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // An empty key would map onto a nameless header, so it falls back as well.
        let session_key = env::var("SESSION_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_string());

        let portal_origin = match env {
            Env::Production => {
                let origin =
                    env::var("PORTAL_ORIGIN").expect("FATAL: PORTAL_ORIGIN required in prod");
                axum::http::HeaderValue::from_str(&origin)
                    .expect("FATAL: PORTAL_ORIGIN is not a valid origin");
                Some(origin)
            }
            Env::Local => env::var("PORTAL_ORIGIN").ok(),
        };

        Self {
            env,
            bind_addr,
            session_key,
            portal_origin,
        }
    }
}
