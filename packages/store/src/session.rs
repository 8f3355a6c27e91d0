//! # Login session persistence
//!
//! The logged-in user is stored as a single JSON document under
//! [`SESSION_KEY`]:
//!
//! ```json
//! { "user": { "token": "...", "isAdmin": true, "_id": "...", "email": "...",
//!             "username": "...", "displayName": "..." } }
//! ```
//!
//! | Store | Backend | Used on |
//! |-------|---------|---------|
//! | [`MemorySessionStore`] | `Arc<RwLock<Option<String>>>` | native builds and tests |
//! | `LocalStorageSessionStore` | `window.localStorage` | web |
//!
//! Absence, malformed JSON, or an empty token all mean "not logged in".

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

pub const SESSION_KEY: &str = "userData";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: SessionUser,
}

impl AuthSession {
    /// `None` for malformed JSON or a missing token.
    pub fn from_json(raw: &str) -> Option<Self> {
        let session: Self = serde_json::from_str(raw).ok()?;
        if session.user.token.trim().is_empty() {
            return None;
        }
        Some(session)
    }

    pub fn to_json(&self) -> String {
        // A struct of strings and bools always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn token(&self) -> &str {
        &self.user.token
    }

    /// Gates admin-only screens. Authorization is enforced server-side.
    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }

    pub fn display_name(&self) -> &str {
        self.user
            .display_name
            .as_deref()
            .or(self.user.username.as_deref())
            .or(self.user.email.as_deref())
            .unwrap_or("")
    }
}

/// Synchronous key-value persistence for the session document.
pub trait SessionStore: Clone + 'static {
    fn load_raw(&self) -> Option<String>;
    fn save_raw(&self, raw: &str);
    fn clear(&self);

    fn load(&self) -> Option<AuthSession> {
        self.load_raw().and_then(|raw| AuthSession::from_json(&raw))
    }

    fn save(&self, session: &AuthSession) {
        self.save_raw(&session.to_json());
    }

    fn token(&self) -> Option<String> {
        self.load().map(|s| s.user.token)
    }
}

/// In-memory session store for tests and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    raw: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an arbitrary stored value, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load_raw(&self) -> Option<String> {
        match self.raw.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save_raw(&self, raw: &str) {
        let mut guard = self.raw.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(raw.to_string());
    }

    fn clear(&self) {
        let mut guard = self.raw.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage {
    use super::{SessionStore, SESSION_KEY};

    /// `window.localStorage`-backed session store. Storage errors (private
    /// browsing, quota) degrade to "not logged in".
    #[derive(Clone, Copy, Debug, Default)]
    pub struct LocalStorageSessionStore;

    impl LocalStorageSessionStore {
        pub fn new() -> Self {
            Self
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()?.local_storage().ok()?
        }
    }

    impl SessionStore for LocalStorageSessionStore {
        fn load_raw(&self) -> Option<String> {
            Self::storage()?.get_item(SESSION_KEY).ok()?
        }

        fn save_raw(&self, raw: &str) {
            if let Some(storage) = Self::storage() {
                let _ = storage.set_item(SESSION_KEY, raw);
            }
        }

        fn clear(&self) {
            if let Some(storage) = Self::storage() {
                let _ = storage.remove_item(SESSION_KEY);
            }
        }
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageSessionStore;

/// The session store for the current build target.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformSessionStore = LocalStorageSessionStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformSessionStore = MemorySessionStore;

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r#"{"user":{"token":"abc","isAdmin":true,"_id":"u1","email":"a@b.c","username":"ann","displayName":"ann lee"}}"#;

    #[test]
    fn test_parse_stored_session() {
        let session = AuthSession::from_json(STORED).unwrap();
        assert_eq!(session.token(), "abc");
        assert!(session.is_admin());
        assert_eq!(session.user.id.as_deref(), Some("u1"));
        assert_eq!(session.display_name(), "ann lee");
    }

    #[test]
    fn test_missing_or_empty_token_is_logged_out() {
        assert!(AuthSession::from_json(r#"{"user":{"isAdmin":true}}"#).is_none());
        assert!(AuthSession::from_json(r#"{"user":{"token":""}}"#).is_none());
        assert!(AuthSession::from_json("not json").is_none());
        assert!(AuthSession::from_json("{}").is_none());
    }

    #[test]
    fn test_is_admin_defaults_false() {
        let session = AuthSession::from_json(r#"{"user":{"token":"t"}}"#).unwrap();
        assert!(!session.is_admin());
    }

    #[test]
    fn test_memory_store_save_load_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load().is_none());

        let session = AuthSession::from_json(STORED).unwrap();
        store.save(&session);
        assert_eq!(store.load(), Some(session));
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.clear();
        assert!(store.load().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let a = MemorySessionStore::with_raw("garbage");
        let b = a.clone();
        assert!(a.load().is_none());
        assert_eq!(b.load_raw().as_deref(), Some("garbage"));
        b.save_raw(STORED);
        assert!(a.load().is_some());
    }
}
