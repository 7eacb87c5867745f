//! Session login against an in-memory user store.
//!
//! [`SimpleAuthApi`] keeps users and logged-in sessions in memory only.
//! [`LoginForm`] and [`LogoutForm`] bind it to the page's session id.

mod login;

use std::collections::HashMap;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::error::AuthError;
use crate::state::State;

pub use login::{LoginForm, LogoutForm};

// =============================================================================
// Password hashing
// =============================================================================

/// Argon2id hash of a password, as a PHC string.
#[derive(Debug, Clone)]
struct Credentials {
    phc: String,
}

impl Credentials {
    fn new(password: &str) -> Result<Self, AuthError> {
        let salt: [u8; 16] = rand::rng().random();
        let salt = SaltString::encode_b64(&salt).map_err(|e| AuthError::Hash(e.to_string()))?;
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(Self { phc })
    }

    /// Constant-time check of `password` against the stored hash.
    fn matches(&self, password: &str) -> bool {
        match PasswordHash::new(&self.phc) {
            Ok(hash) => Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok(),
            Err(e) => {
                log::warn!("Stored password hash is unreadable: {e}");
                false
            }
        }
    }
}

// =============================================================================
// SimpleAuthApi
// =============================================================================

/// In-memory users and session logins.
///
/// Clones share the same store.
///
/// # Example
///
/// ```
/// use pagewidgets::auth::SimpleAuthApi;
///
/// let auth = SimpleAuthApi::new();
/// auth.add_user("alice", "pwd1234").unwrap();
/// assert!(auth.is_authenticated("alice", "pwd1234"));
///
/// auth.login("session-1", "alice").unwrap();
/// assert_eq!(auth.logged_in_user("session-1").as_deref(), Some("alice"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleAuthApi {
    users: State<HashMap<String, Credentials>>,
    /// Session id -> user name.
    sessions: State<HashMap<String, String>>,
}

impl SimpleAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, name: &str, password: &str) -> Result<(), AuthError> {
        if self.exists_user(name) {
            return Err(AuthError::UserExists(name.to_string()));
        }
        let credentials = Credentials::new(password)?;
        self.users
            .update(|users| users.insert(name.to_string(), credentials));
        log::debug!("Added user {name}");
        Ok(())
    }

    /// Remove a user, logging out any of their sessions.
    pub fn remove_user(&self, name: &str) -> Result<(), AuthError> {
        self.users
            .update(|users| users.remove(name))
            .ok_or_else(|| AuthError::UnknownUser(name.to_string()))?;
        self.sessions
            .update(|sessions| sessions.retain(|_, user| user != name));
        log::debug!("Removed user {name}");
        Ok(())
    }

    pub fn exists_user(&self, name: &str) -> bool {
        self.users.read(|users| users.contains_key(name))
    }

    /// Check a password, reporting why it failed.
    pub fn authenticate(&self, name: &str, password: &str) -> Result<(), AuthError> {
        let matches = self
            .users
            .read(|users| users.get(name).map(|c| c.matches(password)))
            .ok_or_else(|| AuthError::UnknownUser(name.to_string()))?;
        if matches {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials(name.to_string()))
        }
    }

    pub fn is_authenticated(&self, name: &str, password: &str) -> bool {
        self.authenticate(name, password).is_ok()
    }

    /// Mark `session_id` as logged in as `name`.
    pub fn login(&self, session_id: &str, name: &str) -> Result<(), AuthError> {
        if !self.exists_user(name) {
            return Err(AuthError::UnknownUser(name.to_string()));
        }
        self.sessions
            .update(|sessions| sessions.insert(session_id.to_string(), name.to_string()));
        log::info!("Session {session_id} logged in as {name}");
        Ok(())
    }

    /// Log a session out, returning the user it was logged in as.
    pub fn logout(&self, session_id: &str) -> Option<String> {
        let user = self.sessions.update(|sessions| sessions.remove(session_id));
        if let Some(user) = &user {
            log::info!("Session {session_id} ({user}) logged out");
        }
        user
    }

    pub fn is_logged_in(&self, session_id: &str) -> bool {
        self.sessions
            .read(|sessions| sessions.contains_key(session_id))
    }

    pub fn logged_in_user(&self, session_id: &str) -> Option<String> {
        self.sessions
            .read(|sessions| sessions.get(session_id).cloned())
    }
}
