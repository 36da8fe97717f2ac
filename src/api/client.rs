//! Authenticated JSON-over-HTTP client for the operations API.
//!
//! The session token is wrapped in `RedactedHeader` so it never shows up in
//! `Debug`/`Display` output, even with `COMMAND_CENTRE_LOG=reqwest=debug`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{CentreError, Result};

/// Path prefix every endpoint lives under
pub const API_PREFIX: &str = "/pht/v1/api";

/// Envelope status marking an application-level failure
const FAILURE: &str = "FAILURE";

/// Called when the server answers 401, after which the session is no longer usable
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Wrapper for the session token that redacts the value when formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        let mut value = header::HeaderValue::from_str(&self.value).map_err(|_| {
            CentreError::Config("session token contains invalid header characters".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// The `{status, data}` wrapper every response uses
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn is_failure(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s == FAILURE)
    }

    /// The server's failure text, if it sent one
    fn failure_message(&self) -> String {
        match &self.data {
            Value::String(s) => s.clone(),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }
}

/// Decode an envelope body, returning `data` as `T` on success
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.is_failure() {
        return Err(CentreError::Rejected(envelope.failure_message()));
    }
    Ok(serde_json::from_value(envelope.data)?)
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
    timeout: Duration,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    /// Create a client without a session (used by `login`)
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
            timeout,
            on_unauthorized: None,
        })
    }

    /// Create an authenticated client from configuration.
    ///
    /// A 401 from any request clears the persisted session token.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.access_token().ok_or(CentreError::NotLoggedIn)?;
        let client = Self::new(config.api_base_url()?, config.request_timeout())?
            .with_token(token)
            .on_unauthorized(Arc::new(clear_persisted_session));
        Ok(client)
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn on_unauthorized(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            API_PREFIX,
            path
        )
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut builder = self
            .client
            .request(method, self.endpoint(path))
            .header(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            );
        if let Some(token) = &self.token {
            let auth = RedactedHeader::new(token.expose_secret());
            builder = builder.header(header::AUTHORIZATION, auth.as_header_value()?);
        }
        Ok(builder)
    }

    /// `GET <path>?<query>` and decode the envelope's `data`
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        self.send(path, builder).await
    }

    /// `POST <path>` with a JSON body and decode the envelope's `data`
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(path, builder).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> Result<T> {
        tracing::debug!(path, "sending request");

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "server answered 401; clearing session");
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(CentreError::Unauthorized);
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            // Some failures still come back wrapped in an envelope with a message
            if let Ok(envelope) = serde_json::from_str::<Envelope>(&body)
                && envelope.is_failure()
            {
                return Err(CentreError::Rejected(envelope.failure_message()));
            }
            return Err(CentreError::Transport(format!("HTTP {}", status.as_u16())));
        }

        let decoded = decode_envelope(&body);
        match &decoded {
            Ok(_) => tracing::debug!(path, status = status.as_u16(), "request succeeded"),
            Err(e) => tracing::debug!(path, error = %e, "request failed"),
        }
        decoded
    }

    fn transport_error(&self, err: reqwest::Error) -> CentreError {
        if err.is_timeout() {
            CentreError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_decode() {
            CentreError::Transport(format!("malformed response: {err}"))
        } else {
            CentreError::Transport(err.without_url().to_string())
        }
    }
}

/// Drop the stored session token; the next command must log in again
fn clear_persisted_session() {
    match Config::load() {
        Ok(mut config) => {
            config.clear_session();
            if let Err(e) = config.save() {
                tracing::error!(error = %e, "failed to clear session after 401");
            }
        }
        Err(e) => tracing::error!(error = %e, "failed to load config after 401"),
    }
}
