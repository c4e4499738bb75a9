//! Low-level HTTP plumbing shared by every endpoint.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use logseek_core::types::ServiceUrl;
use logseek_core::{Credentials, Error, Result, ServiceError};

/// Error payload the service returns on non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// An authenticated HTTP client bound to one service endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base: ServiceUrl,
    credentials: Credentials,
    http: reqwest::Client,
}

const USER_AGENT: &str = concat!("logseek/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

impl HttpClient {
    pub fn new(base: ServiceUrl, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport)?;
        Ok(Self {
            base,
            credentials,
            http,
        })
    }

    pub fn base(&self) -> &ServiceUrl {
        &self.base
    }

    fn authorization(&self) -> String {
        format!(
            "Pandora {}:{}",
            self.credentials.access_key(),
            self.credentials.secret_key()
        )
    }

    /// GET with no query parameters.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.base.api_url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(transport)?;
        Self::handle_response(response).await
    }

    /// GET with URL-encoded query parameters.
    pub async fn get_query<Q: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<R> {
        let url = self.base.api_url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(transport)?;
        Self::handle_response(response).await
    }

    /// POST a JSON body.
    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.base.api_url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(transport)?;
        Self::handle_response(response).await
    }

    async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(transport);
        }

        let body = response.text().await.unwrap_or_default();
        trace!(status = status.as_u16(), %body, "error response");

        let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
        let (code, message) = match parsed {
            Some(e) => {
                // The service puts the human text under either key.
                let message = e.message.or_else(|| e.error.clone());
                (e.error, message)
            }
            None if body.is_empty() => (None, None),
            None => (None, Some(body)),
        };

        let service_error = ServiceError::new(status.as_u16(), code, message);
        if service_error.is_auth_error() {
            return Err(Error::Auth(service_error.to_string()));
        }
        Err(Error::Remote(service_error))
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport {
        message: e.to_string(),
    }
}
