//! Service endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// A validated base URL for the log-database service.
///
/// Must use HTTPS; plain HTTP is allowed for localhost only (local test
/// servers).
///
/// # Example
///
/// ```
/// use logseek_core::ServiceUrl;
///
/// let endpoint = ServiceUrl::new("https://logdb.example.com").unwrap();
/// assert_eq!(endpoint.api_url("v5/repos"),
///            "https://logdb.example.com/v5/repos");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s)
            .map_err(|e| Error::Config(format!("invalid service URL '{}': {}", s, e)))?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for an API path under this endpoint.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "invalid service URL '{}': must be an absolute URL",
                original
            )));
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(Error::Config(format!(
                "invalid service URL '{}': must use HTTPS (HTTP allowed only for localhost)",
                original
            )));
        }

        if url.host_str().is_none() {
            return Err(Error::Config(format!(
                "invalid service URL '{}': must have a host",
                original
            )));
        }

        Ok(())
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let endpoint = ServiceUrl::new("https://logdb.example.com").unwrap();
        assert_eq!(endpoint.host(), Some("logdb.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let endpoint = ServiceUrl::new("http://127.0.0.1:9200").unwrap();
        assert_eq!(endpoint.host(), Some("127.0.0.1"));
    }

    #[test]
    fn api_url_construction() {
        let endpoint = ServiceUrl::new("https://logdb.example.com").unwrap();
        assert_eq!(
            endpoint.api_url("v5/repos"),
            "https://logdb.example.com/v5/repos"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let endpoint = ServiceUrl::new("https://logdb.example.com/").unwrap();
        assert_eq!(
            endpoint.api_url("/v5/repos"),
            "https://logdb.example.com/v5/repos"
        );
    }

    #[test]
    fn rejects_http_non_localhost() {
        assert!(ServiceUrl::new("http://logdb.example.com").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(ServiceUrl::new("/v5/repos").is_err());
    }
}
