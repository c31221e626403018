use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthSession, Session, SessionError};
use crate::utils::encryption::TokenCipher;

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user_id: i64,
    #[serde(default)]
    sealed: bool,
}

/// Session persisted between runs: token and user id, nothing else
///
/// With a cipher configured the token is stored sealed. There is no expiry;
/// a stale token simply fails at the backend.
pub struct SessionStore {
    path: PathBuf,
    cipher: Option<TokenCipher>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>, cipher: Option<TokenCipher>) -> Self {
        Self {
            path: path.into(),
            cipher,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Restore the last session; a missing file means nobody is logged in
    pub fn load(&self) -> Result<Session, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::Anonymous),
            Err(e) => return Err(self.io_error(e)),
        };

        let stored: StoredSession =
            serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt(e.to_string()))?;

        let token = if stored.sealed {
            let cipher = self.cipher.as_ref().ok_or(SessionError::MissingKey)?;
            cipher.open(&stored.token)?
        } else {
            stored.token
        };

        debug!("Restored session for user {}", stored.user_id);
        Ok(Session::Authenticated(AuthSession::new(token, stored.user_id)))
    }

    pub fn save(&self, auth: &AuthSession) -> Result<(), SessionError> {
        let stored = match &self.cipher {
            Some(cipher) => StoredSession {
                token: cipher.seal(&auth.token)?,
                user_id: auth.user_id,
                sealed: true,
            },
            None => StoredSession {
                token: auth.token.clone(),
                user_id: auth.user_id,
                sealed: false,
            },
        };

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::token_with_claims;

    const KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("escobanks-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_anonymous() {
        let store = SessionStore::new(scratch_file("missing"), None);
        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), Session::Anonymous);
    }

    #[test]
    fn test_save_load_clear() {
        let store = SessionStore::new(scratch_file("plain"), None);
        let auth = AuthSession::new(token_with_claims(r#"{"role":"ADMIN"}"#), 3);

        store.save(&auth).unwrap();
        let restored = store.load().unwrap();
        store.clear().unwrap();

        assert_eq!(restored, Session::Authenticated(auth));
        assert_eq!(store.load().unwrap(), Session::Anonymous);
    }

    #[test]
    fn test_sealed_token_at_rest() {
        let path = scratch_file("sealed");
        let store = SessionStore::new(&path, Some(TokenCipher::from_hex(KEY).unwrap()));
        let auth = AuthSession::new(token_with_claims(r#"{"role":"USER"}"#), 5);

        store.save(&auth).unwrap();
        let on_disk = fs::read_to_string(&path).unwrap();
        let restored = store.load().unwrap();
        let without_key = SessionStore::new(&path, None).load();
        store.clear().unwrap();

        assert!(!on_disk.contains(&auth.token));
        assert_eq!(restored, Session::Authenticated(auth));
        assert!(matches!(without_key, Err(SessionError::MissingKey)));
    }
}
