use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::errors::{AdtrailError, Result};
use crate::core::models::credentials::Credentials;
use crate::core::traits::session_store::SessionStore;

/// Storage key a login writes the current user under.
pub const DEFAULT_STORAGE_KEY: &str = "siscoca_user";

/// Session store backed by a JSON file of key/value pairs.
///
/// The value under the storage key is the logged-in user, either as an
/// object or as a string holding its JSON, and carries a `token` field.
/// A top-level `token` string is accepted when the key is absent.
///
/// Example `session.json`:
/// ```text
/// {"siscoca_user": {"username": "ana.c", "rol": "Admin", "token": "eyJhbGciOi..."}}
/// ```
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    storage_key: String,
}

impl FileSessionStore {
    /// Create a store reading `storage_key` from the file at `path`.
    pub fn new(path: PathBuf, storage_key: impl Into<String>) -> Self {
        Self {
            path,
            storage_key: storage_key.into(),
        }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default location: `<config_dir>/adtrail/session.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("adtrail").join("session.json"))
    }

    fn parse_error(&self, detail: impl Into<String>) -> AdtrailError {
        AdtrailError::SessionParse {
            path: self.path.clone(),
            detail: detail.into(),
        }
    }

    /// Extract the token from the stored user value.
    fn token_from_user(&self, user: &Value) -> Result<Option<String>> {
        let user = match user {
            Value::Null => return Ok(None),
            Value::String(raw) => serde_json::from_str::<Value>(raw)
                .map_err(|e| self.parse_error(format!("'{}' is not valid JSON: {e}", self.storage_key)))?,
            other => other.clone(),
        };
        match user.get("token") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) => Ok(Some(token.clone())),
            Some(_) => Err(self.parse_error("'token' is not a string")),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let root: Value = serde_json::from_str(&content)
            .map_err(|e| self.parse_error(format!("not valid JSON: {e}")))?;
        let Value::Object(map) = &root else {
            return Err(self.parse_error("expected a JSON object at the top level"));
        };

        let token = match map.get(&self.storage_key) {
            Some(user) => self.token_from_user(user)?,
            None => map
                .get("token")
                .and_then(Value::as_str)
                .map(str::to_string),
        };

        Ok(token
            .map(Credentials::bearer)
            .filter(|c| !c.is_anonymous()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(content: &str) -> (TempDir, FileSessionStore) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, content).unwrap();
        (tmp, FileSessionStore::new(path, DEFAULT_STORAGE_KEY))
    }

    #[test]
    fn missing_file_is_no_session() {
        let store = FileSessionStore::new(PathBuf::from("/nonexistent/session.json"), "k");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn reads_token_from_user_object() {
        let (_tmp, store) = store_with(r#"{"siscoca_user": {"username": "ana", "token": "abc"}}"#);
        assert_eq!(store.load().unwrap().unwrap().token(), Some("abc"));
    }

    #[test]
    fn reads_token_from_json_encoded_user() {
        let (_tmp, store) = store_with(r#"{"siscoca_user": "{\"token\":\"xyz\"}"}"#);
        assert_eq!(store.load().unwrap().unwrap().token(), Some("xyz"));
    }

    #[test]
    fn falls_back_to_top_level_token() {
        let (_tmp, store) = store_with(r#"{"token": "plain"}"#);
        assert_eq!(store.load().unwrap().unwrap().token(), Some("plain"));
    }

    #[test]
    fn user_without_token_is_no_session() {
        let (_tmp, store) = store_with(r#"{"siscoca_user": {"username": "ana"}}"#);
        assert!(store.load().unwrap().is_none());

        let (_tmp, store) = store_with(r#"{"siscoca_user": {"token": "   "}}"#);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn malformed_session_is_a_parse_error() {
        for content in [
            "{not json",
            "[1, 2]",
            r#"{"siscoca_user": "{broken"}"#,
            r#"{"siscoca_user": {"token": 5}}"#,
        ] {
            let (_tmp, store) = store_with(content);
            assert!(
                matches!(store.load(), Err(AdtrailError::SessionParse { .. })),
                "expected parse error for {content}"
            );
        }
    }

    #[test]
    fn custom_storage_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("s.json");
        std::fs::write(&path, r#"{"other": {"token": "k2"}}"#).unwrap();
        let store = FileSessionStore::new(path, "other");
        assert_eq!(store.load().unwrap().unwrap().token(), Some("k2"));
    }
}
