use std::fmt;

/// Bearer credential handed to the transport.
///
/// An empty credential is valid: requests are then sent without an
/// `Authorization` header and the backend decides.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }
}

// The token never appears in debug output or logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token {
            Some(_) => f.write_str("Credentials(Bearer ***)"),
            None => f.write_str("Credentials(anonymous)"),
        }
    }
}
