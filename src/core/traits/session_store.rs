use crate::core::errors::Result;
use crate::core::models::credentials::Credentials;

/// Port for reading the credential a previous login persisted.
pub trait SessionStore {
    /// `Ok(None)` when nothing is stored. A malformed session is an
    /// `AdtrailError::SessionParse`.
    fn load(&self) -> Result<Option<Credentials>>;
}
