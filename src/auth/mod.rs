//! auth - Admin login and bearer-token sessions
//!
//! # Architecture
//!
//! A single admin principal comes from configuration. The password is
//! hashed with argon2 at startup and the plaintext is dropped; logins
//! verify against the PHC string. Successful logins mint random bearer
//! tokens held in an in-memory session map with a TTL. Restarting the
//! server invalidates every session, which is acceptable for a
//! single-admin tool.
//!
//! There is no refresh and no logout; tokens simply age out.
//!
//! # Security
//!
//! Tokens and password hashes never appear in logs, errors, or debug
//! output. All types here implement custom `Debug` to redact them.
//!
//! # Example
//!
//! ```ignore
//! use carta::auth::AuthService;
//! use std::time::Duration;
//!
//! let auth = AuthService::new("admin", "hunter2", "admin@example.com", Duration::from_secs(3600))?;
//! let session = auth.login("admin", "hunter2")?;
//! let username = auth.validate(&session.token)?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use parking_lot::RwLock;
use password_hash::{PasswordHash, SaltString};
use rand::RngCore;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match the admin principal.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token is unknown or has expired.
    #[error("invalid or expired session token")]
    InvalidToken,

    /// The configured password could not be hashed at startup.
    #[error("failed to prepare password hash: {0}")]
    Hash(String),
}

/// An issued session.
#[derive(Clone)]
pub struct Session {
    /// Bearer token to present on subsequent requests.
    pub token: String,
    /// The authenticated principal.
    pub username: String,
    /// Email reported back to the client.
    pub email: String,
    /// When the token stops validating.
    pub expires_at: Instant,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

struct SessionEntry {
    expires_at: Instant,
}

/// Verifies admin credentials and tracks live sessions.
pub struct AuthService {
    username: String,
    email: String,
    password_hash: String,
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("active_sessions", &self.sessions.read().len())
            .finish()
    }
}

impl AuthService {
    /// Build the service for the configured admin, hashing the password
    /// immediately so the plaintext is not retained.
    pub fn new(
        username: &str,
        password: &str,
        email: &str,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        let password_hash = hash_password(password)?;
        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Verify credentials and mint a session token.
    ///
    /// Expired sessions are pruned as a side effect, so the map cannot
    /// grow beyond the number of live logins.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username != self.username || !verify_password(&self.password_hash, password) {
            warn!(username, "rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Instant::now();
        let token = generate_token();
        let expires_at = now + self.ttl;

        {
            let mut sessions = self.sessions.write();
            sessions.retain(|_, entry| entry.expires_at > now);
            sessions.insert(token.clone(), SessionEntry { expires_at });
        }

        info!(username, ttl_secs = self.ttl.as_secs(), "issued session");
        Ok(Session {
            token,
            username: self.username.clone(),
            email: self.email.clone(),
            expires_at,
        })
    }

    /// Check a bearer token, returning the authenticated username.
    ///
    /// An expired entry is removed on the spot.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let now = Instant::now();
        let live = {
            let sessions = self.sessions.read();
            match sessions.get(token) {
                Some(entry) => entry.expires_at > now,
                None => return Err(AuthError::InvalidToken),
            }
        };

        if !live {
            self.sessions.write().remove(token);
            return Err(AuthError::InvalidToken);
        }

        Ok(self.username.clone())
    }

    /// The admin's email, for login responses.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Number of sessions currently held, expired or not.
    pub fn active_sessions(&self) -> usize {
        self.sessions.read().len()
    }
}

/// 32 random bytes, hex encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hash(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
