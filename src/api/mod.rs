//! REST client for the library backend
//!
//! [`ApiClient`] is the single choke point for backend calls. It owns the
//! bearer token (mirrored into the key-value store), computes request
//! headers, sends JSON bodies and turns every non-2xx answer into
//! [`ClientError::RequestFailed`]. The endpoint wrappers live in the
//! per-domain submodules as further `impl ApiClient` blocks.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged here, at the boundary, and always handed back to the
//! caller. Nothing below this module swallows an error.

pub mod auth;
pub mod books;
pub mod fines;
pub mod reports;
pub mod transactions;
pub mod users;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{ClientError, ClientResult, GENERIC_FAILURE},
    storage::{KeyValueStore, TOKEN_KEY},
};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";

/// Header name to value mapping
pub type Headers = BTreeMap<String, String>;

/// What a caller may specify for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serialize `body` as the JSON request body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Fully resolved request, after computed headers have been merged in
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a client for `config.base_url`, picking up any token already persisted in `store`
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        let token = store.get(TOKEN_KEY);
        if token.is_some() {
            tracing::debug!("Loaded persisted bearer token");
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            token: RwLock::new(token),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Persist the token, then make it the in-memory token. The token is opaque and not validated.
    ///
    /// When the store rejects the write the in-memory token is left as it was.
    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    pub fn remove_token(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY)?;
        *self.token.write() = None;
        Ok(())
    }

    /// Headers for the current token: always `Content-Type`, plus `Authorization` when logged in
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        if let Some(token) = self.token.read().as_deref() {
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// Merge caller options with the computed headers.
    ///
    /// Computed headers take precedence: any caller header whose name matches
    /// `Content-Type` or `Authorization` (case-insensitively) is dropped.
    pub fn request_config(&self, options: RequestOptions) -> RequestConfig {
        let computed = self.headers();
        let mut headers: Headers = options
            .headers
            .into_iter()
            .filter(|(name, _)| {
                !name.eq_ignore_ascii_case(CONTENT_TYPE) && !name.eq_ignore_ascii_case(AUTHORIZATION)
            })
            .collect();
        headers.extend(computed);

        RequestConfig {
            method: options.method,
            headers,
            body: options.body,
        }
    }

    /// Send a request to `base_url + endpoint` and decode the JSON answer
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let config = self.request_config(options);
        let method = config.method.clone();

        let result = self.send(endpoint, config).await;
        if let Err(e) = &result {
            tracing::error!("API error on {} {}: {}", method, endpoint, e);
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, config: RequestConfig) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("{} {}", config.method, url);

        let mut builder = self
            .http
            .request(config.method, &url)
            .headers(header_map(&config.headers)?);
        if let Some(body) = config.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // The body is parsed whatever the status; error bodies carry the message
        let data = serde_json::from_slice::<Value>(&bytes);

        if !status.is_success() {
            let message = data
                .as_ref()
                .ok()
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FAILURE)
                .to_string();
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let data = data.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        serde_json::from_value(data).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

fn header_map(headers: &Headers) -> ClientResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidHeader(format!("{}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Build a `?key=value&...` suffix from a query struct.
///
/// Absent (`None`/null) parameters are omitted entirely and values are
/// percent-encoded. An empty query yields an empty string, not a lone `?`.
pub fn query_string<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<String> {
    let value = serde_json::to_value(query)?;
    let Value::Object(params) = value else {
        return Ok(String::new());
    };

    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(format!("{}={}", urlencoding::encode(key), urlencoding::encode(&value)))
        })
        .collect();

    if pairs.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("?{}", pairs.join("&")))
    }
}
