//! Replayable request description
//!
//! An [`ApiRequest`] holds everything needed to send a call again: the
//! coordinator replays failed requests from this record rather than from a
//! consumed `reqwest::RequestBuilder`.

use std::fmt;

use reqwest::Method;
use serde_json::Value;

#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/users/42`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer credential carried by the request itself. Set on replays.
    pub authorization: Option<String>,
    /// Set once the request has been through a refresh cycle.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authorization: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Mark as replayed with `token`. A replay never starts another refresh.
    pub fn into_replay(mut self, token: String) -> Self {
        self.retried = true;
        self.authorization = Some(token);
        self
    }

    /// True when this request targets the refresh endpoint.
    pub fn is_refresh_call(&self) -> bool {
        self.path.contains(adminhub_domain::constants::ENDPOINT_AUTH_REFRESH)
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .field("authorization", &self.authorization.as_ref().map(|_| "[redacted]"))
            .field("retried", &self.retried)
            .finish()
    }
}
