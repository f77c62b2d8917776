use std::sync::Arc;

use ragdesk_core::{RagdeskError, Result};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::session_store::SessionStore;
use crate::settings::ClientSettings;

/// HTTP client shared by the backend bindings.
///
/// Attaches the session's bearer token when one is present and maps every
/// non-2xx answer to [`RagdeskError::Server`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Arc<SessionStore>>,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| RagdeskError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
            session: None,
        })
    }

    pub fn with_session_store(mut self, store: Arc<SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(path, self.client.get(self.url(path))).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(path, self.client.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        self.send(path, self.client.post(self.url(path)).multipart(form)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(path, self.client.delete(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let request = match &self.session {
            Some(store) => match store.access_token().await {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| RagdeskError::network(format!("{path}: {e}")))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RagdeskError::network(format!("{path}: {e}")))?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::debug!(status = status.as_u16(), "{} failed: {}", path, message);
            return Err(RagdeskError::server(status.as_u16(), message));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Extracts a readable message from an error body.
///
/// FastAPI answers `{"detail": "..."}` for raised errors and
/// `{"detail": [{"msg": "...", ...}]}` for validation failures.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    match detail {
        Some(Value::String(message)) => message,
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                status.to_string()
            } else {
                messages.join("; ")
            }
        }
        Some(other) => other.to_string(),
        None => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            if text.is_empty() {
                status.to_string()
            } else {
                text.to_string()
            }
        }
    }
}
