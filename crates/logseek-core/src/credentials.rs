//! Service credentials.

use serde::{Deserialize, Serialize};

/// Access/secret key pair used to authenticate against the service.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials from an access key and secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// True when either half is missing.
    pub fn is_empty(&self) -> bool {
        self.access_key.is_empty() || self.secret_key.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret_key() {
        let credentials = Credentials::new("AK123", "SK456");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("AK123"));
        assert!(!debug.contains("SK456"));
    }

    #[test]
    fn empty_when_either_half_missing() {
        assert!(Credentials::default().is_empty());
        assert!(Credentials::new("ak", "").is_empty());
        assert!(!Credentials::new("ak", "sk").is_empty());
    }
}
