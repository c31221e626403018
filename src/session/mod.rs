//! Who is logged in
//!
//! The session is an explicit value owned by the shell and handed to services,
//! never ambient global state. The role claim is decoded from the token without
//! verification; it only gates what the client offers, the backend enforces.

pub mod store;

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

use crate::models::Role;
use crate::utils::errors::ServiceError;
use crate::utils::encryption::CryptoError;

pub use store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Session file is corrupt: {0}")]
    Corrupt(String),
    #[error("Stored token is encrypted but no SESSION_ENCRYPTION_KEY is configured")]
    MissingKey,
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Read the `role` claim from a JWT payload
pub fn decode_role(token: &str) -> Option<Role> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("role")?.as_str()?.parse().ok()
}

/// An authenticated user's credentials and transient selections
#[derive(Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub role: Option<Role>,
    /// User picked from the admin account list, whose transactions are on view
    pub selected_user: Option<i64>,
}

impl AuthSession {
    pub fn new(token: String, user_id: i64) -> Self {
        let role = decode_role(&token);
        Self {
            token,
            user_id,
            role,
            selected_user: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Money requests are keyed by the same id the backend hands out at login
    pub fn account_id(&self) -> i64 {
        self.user_id
    }

    /// Whose transactions the transaction table shows
    pub fn viewed_user(&self) -> i64 {
        self.selected_user.unwrap_or(self.user_id)
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("selected_user", &self.selected_user)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(AuthSession),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn auth(&self) -> Option<&AuthSession> {
        match self {
            Session::Authenticated(auth) => Some(auth),
            Session::Anonymous => None,
        }
    }

    pub fn require(&self) -> Result<&AuthSession, ServiceError> {
        self.auth().ok_or(ServiceError::NotAuthenticated)
    }

    pub fn require_mut(&mut self) -> Result<&mut AuthSession, ServiceError> {
        match self {
            Session::Authenticated(auth) => Ok(auth),
            Session::Anonymous => Err(ServiceError::NotAuthenticated),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Unsigned token carrying the given claims
    pub(crate) fn token_with_claims(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn test_decode_role() {
        assert_eq!(
            decode_role(&token_with_claims(r#"{"sub":"ana","role":"ADMIN"}"#)),
            Some(Role::Admin)
        );
        assert_eq!(
            decode_role(&token_with_claims(r#"{"role":"USER"}"#)),
            Some(Role::User)
        );
        assert_eq!(decode_role(&token_with_claims(r#"{"sub":"ana"}"#)), None);
        assert_eq!(decode_role("not-a-jwt"), None);
        assert_eq!(decode_role("a.%%%.c"), None);
    }

    #[test]
    fn test_require() {
        let mut session = Session::Anonymous;
        assert!(matches!(session.require(), Err(ServiceError::NotAuthenticated)));

        session = Session::Authenticated(AuthSession::new(
            token_with_claims(r#"{"role":"ADMIN"}"#),
            8,
        ));
        let auth = session.require().unwrap();
        assert!(auth.is_admin());
        assert_eq!(auth.viewed_user(), 8);
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = AuthSession::new("secret.token.value".to_string(), 1);
        assert!(!format!("{:?}", auth).contains("secret"));
    }
}
