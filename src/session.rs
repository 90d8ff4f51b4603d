use axum::http::HeaderMap;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{Session, SessionStatus};

// 1. Client-side Storage Contract
/// SessionStorage
///
/// A string key/value store on the client, written by the login view and only read here.
/// The guard never talks to the store directly; it goes through a `SessionProvider`.
pub trait SessionStorage: Send + Sync {
    /// Returns the raw stored value for `key`, or `None` when nothing was stored.
    fn get_item(&self, key: &str) -> Option<String>;
}

/// SessionProvider
///
/// Supplies the current session to the guard. Called once per navigation check.
pub trait SessionProvider {
    fn current(&self) -> SessionStatus;
}

/// SessionError
///
/// Why a stored session value could not be turned into a `Session`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("stored session is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored session is not a JSON object")]
    NotAnObject,
}

/// parse_session
///
/// Parses a stored session value. JSON `null` means "logged out" and yields `Ok(None)`.
/// Objects yield a session; anything else is rejected.
pub fn parse_session(raw: &str) -> Result<Option<Session>, SessionError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Null => Ok(None),
        value @ serde_json::Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
        _ => Err(SessionError::NotAnObject),
    }
}

// 2. Storage-backed Provider
/// StoredSessionProvider
///
/// Reads the session stored under `key` and parses it on every call.
///
/// Unreadable data is logged and treated as an absent session, so a corrupted
/// store sends the user to login instead of failing the navigation.
pub struct StoredSessionProvider<S> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> StoredSessionProvider<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

impl<S: SessionStorage> SessionProvider for StoredSessionProvider<S> {
    fn current(&self) -> SessionStatus {
        let Some(raw) = self.storage.get_item(&self.key) else {
            return SessionStatus::Absent;
        };

        match parse_session(&raw) {
            Ok(session) => session.into(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable stored session");
                SessionStatus::Absent
            }
        }
    }
}

/// A fixed session, for callers that already hold the decoded value.
impl SessionProvider for SessionStatus {
    fn current(&self) -> SessionStatus {
        self.clone()
    }
}

// 3. Request Header Storage (HTTP surface)
/// HeaderStorage
///
/// Exposes the stored items a browser forwards with each navigation request.
/// Item `key` travels in the `x-<key>` header (e.g. `x-usuario`).
pub struct HeaderStorage<'a> {
    headers: &'a HeaderMap,
}

impl<'a> HeaderStorage<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    pub fn header_name(key: &str) -> String {
        format!("x-{}", key.to_ascii_lowercase())
    }
}

impl SessionStorage for HeaderStorage<'_> {
    fn get_item(&self, key: &str) -> Option<String> {
        let value = self.headers.get(Self::header_name(key))?;
        // Session values may carry non-ASCII names, so read raw UTF-8 rather than `to_str`.
        std::str::from_utf8(value.as_bytes())
            .ok()
            .map(str::to_string)
    }
}

// 4. In-memory Storage (tests, embedding)
/// MemoryStorage
///
/// A plain in-memory store. Also used to evaluate a session value received in an
/// API payload, exactly as if it had been read from the client.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_item(key, value);
        self
    }

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}
