//! Session storage.
//!
//! Holds the authenticated identity and its bearer credential for the
//! lifetime of the running client. Nothing is persisted.

use tracing::info;

/// Opaque bearer value issued by the backend at login/register.
///
/// Sent back verbatim as the `Authorization` header. `Debug` never prints
/// the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub credential: Credential,
}

/// In-memory store for the single active session.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing whatever session was active.
    pub fn establish(&mut self, user_id: impl Into<String>, credential: Credential) -> &Session {
        let user_id = user_id.into();
        info!(user = %user_id, "Session established");
        self.session.insert(Session {
            user_id,
            credential,
        })
    }

    /// Find the session belonging to `user_id`.
    pub fn lookup(&self, user_id: &str) -> Option<&Session> {
        self.session.as_ref().filter(|s| s.user_id == user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn active(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Destroy the active session (logout).
    pub fn end(&mut self) -> Option<Session> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            info!(user = %session.user_id, "Session ended");
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert!(store.active().is_none());
        assert!(store.lookup("bob").is_none());
    }

    #[test]
    fn test_establish_and_lookup() {
        let mut store = SessionStore::new();
        store.establish("bob", Credential::new("Bearer abc"));

        assert!(store.is_authenticated());
        let session = store.lookup("bob").unwrap();
        assert_eq!(session.credential.as_str(), "Bearer abc");
        assert!(store.lookup("alice").is_none());
    }

    #[test]
    fn test_establish_overwrites() {
        let mut store = SessionStore::new();
        store.establish("bob", Credential::new("Bearer old"));
        store.establish("bob", Credential::new("Bearer new"));
        assert_eq!(
            store.lookup("bob").unwrap().credential,
            Credential::new("Bearer new")
        );

        store.establish("alice", Credential::new("Bearer a"));
        assert!(store.lookup("bob").is_none());
        assert_eq!(store.active().unwrap().user_id, "alice");
    }

    #[test]
    fn test_end_session() {
        let mut store = SessionStore::new();
        store.establish("bob", Credential::new("Bearer abc"));
        let ended = store.end().unwrap();
        assert_eq!(ended.user_id, "bob");
        assert!(!store.is_authenticated());
        assert!(store.end().is_none());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("Bearer secret-token");
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("secret-token"));
    }
}
