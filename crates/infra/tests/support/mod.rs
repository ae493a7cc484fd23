//! Shared fixture for the integration suites

#![allow(dead_code)]

use std::sync::Arc;

use adminhub_common::{CredentialStore, MemoryCredentialStore};
use adminhub_core::testing::{RecordingNotifier, RecordingSessionSink};
use adminhub_domain::constants::{STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN};
use adminhub_domain::ApiConfig;
use adminhub_infra::ApiClient;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OLD_TOKEN: &str = "old-token";
pub const NEW_TOKEN: &str = "new-token";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const ROTATED_REFRESH_TOKEN: &str = "refresh-2";

pub struct Fixture {
    pub server: MockServer,
    pub client: Arc<ApiClient>,
    pub store: Arc<dyn CredentialStore>,
    pub session: Arc<RecordingSessionSink>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    /// Client against a fresh mock server. The store holds `OLD_TOKEN` and,
    /// if given, a refresh token.
    pub async fn start(refresh_token: Option<&str>) -> Self {
        let mut entries = vec![(STORAGE_KEY_ACCESS_TOKEN, OLD_TOKEN)];
        if let Some(token) = refresh_token {
            entries.push((STORAGE_KEY_REFRESH_TOKEN, token));
        }
        Self::with_store(Arc::new(MemoryCredentialStore::with_entries(entries))).await
    }

    /// Client over a caller-supplied store.
    pub async fn with_store(store: Arc<dyn CredentialStore>) -> Self {
        let server = MockServer::start().await;

        let session = Arc::new(RecordingSessionSink::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let client = ApiClient::builder()
            .config(ApiConfig::new(server.uri()))
            .store(store.clone())
            .session(session.clone())
            .notifier(notifier.clone())
            .build()
            .expect("api client");

        Self { server, client: Arc::new(client), store, session, notifier }
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap()
    }

    /// `GET {route}` answers 200 for `NEW_TOKEN` and 401 for anything else.
    pub async fn mount_protected(&self, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", format!("Bearer {NEW_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "route": route })))
            .with_priority(1)
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
            )
            .with_priority(2)
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server saw for `route`, and how many of them
    /// carried `NEW_TOKEN`.
    pub async fn hits(&self, route: &str) -> (usize, usize) {
        let requests = self.server.received_requests().await.unwrap_or_default();
        let matching: Vec<_> = requests.iter().filter(|r| r.url.path() == route).collect();
        let with_new = matching
            .iter()
            .filter(|r| {
                r.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v == format!("Bearer {NEW_TOKEN}"))
            })
            .count();
        (matching.len(), with_new)
    }
}
