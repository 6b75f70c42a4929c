//! HTTP implementation of the remote facade.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{RemoteError, RemoteResult, RemoteStore, TagRemote};
use crate::models::{EntityId, Snippet, SnippetDraft, Tag, TagDraft};
use crate::session::Session;

const HTTP_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for the snippet API.
///
/// Responses use the API's `{data, code, message}` envelope. The bearer
/// token is read from the session on every request, so a re-login is picked
/// up without rebuilding the client.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> RemoteResult<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        Ok(Self {
            base_url,
            client,
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header("Accept", "application/json");
        if let Some(token) = self.session.access_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> RemoteResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }

        let envelope = response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;
        Ok(envelope.data)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RemoteResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RemoteResult<T> {
        self.send(self.request(Method::PATCH, path).json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> RemoteResult<()> {
        self.send::<Option<serde_json::Value>>(self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn error_for_status(status: StatusCode, body: &str) -> RemoteError {
    let message =
        parse_api_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    match status {
        StatusCode::UNAUTHORIZED => RemoteError::Unauthorized,
        StatusCode::NOT_FOUND => RemoteError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            RemoteError::Validation(message)
        }
        _ => RemoteError::Network(format!("{message} ({})", status.as_u16())),
    }
}

fn parse_api_message(body: &str) -> Option<String> {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return Some(message.trim().to_string());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_base_url(raw: String) -> RemoteResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RemoteError::Validation(
            "API base URL must not be empty".to_string(),
        ));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(RemoteError::Validation(
            "API base URL must include http:// or https://".to_string(),
        ))
    }
}

/// Snippet endpoints of the API.
#[derive(Clone)]
pub struct HttpSnippetRemote {
    api: ApiClient,
}

impl HttpSnippetRemote {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl RemoteStore<Snippet> for HttpSnippetRemote {
    async fn create(&self, draft: &SnippetDraft) -> RemoteResult<Snippet> {
        self.api.post("/snippets", draft).await
    }

    async fn fetch(&self, id: EntityId) -> RemoteResult<Snippet> {
        self.api.get(&format!("/snippets/{id}")).await
    }

    async fn list(&self) -> RemoteResult<Vec<Snippet>> {
        self.api.get("/snippets").await
    }

    async fn delete(&self, id: EntityId) -> RemoteResult<()> {
        self.api.delete(&format!("/snippets/{id}")).await
    }
}

/// Tag endpoints of the API.
#[derive(Clone)]
pub struct HttpTagRemote {
    api: ApiClient,
}

impl HttpTagRemote {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl RemoteStore<Tag> for HttpTagRemote {
    async fn create(&self, draft: &TagDraft) -> RemoteResult<Tag> {
        self.api.post("/tags", draft).await
    }

    async fn fetch(&self, id: EntityId) -> RemoteResult<Tag> {
        self.api.get(&format!("/tags/{id}")).await
    }

    async fn list(&self) -> RemoteResult<Vec<Tag>> {
        self.api.get("/tags/my-tags").await
    }

    async fn delete(&self, id: EntityId) -> RemoteResult<()> {
        self.api.delete(&format!("/tags/{id}")).await
    }
}

impl TagRemote for HttpTagRemote {
    async fn update_visibility(&self, id: EntityId, hidden: bool) -> RemoteResult<Tag> {
        self.api
            .patch(
                &format!("/tags/{id}/visibility"),
                &serde_json::json!({ "isHidden": hidden }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url(String::new()).is_err());
        assert!(normalize_base_url("api.example.com".to_string()).is_err());
    }

    #[test]
    fn test_normalize_base_url_trims_trailing_slash() {
        let url = normalize_base_url("https://api.example.com/v1/".to_string()).unwrap();
        assert_eq!(url, "https://api.example.com/v1");
    }

    #[test]
    fn test_error_for_status_taxonomy() {
        assert_eq!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            RemoteError::Unauthorized
        );
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, ""),
            RemoteError::NotFound
        );
        assert!(matches!(
            error_for_status(StatusCode::BAD_REQUEST, r#"{"message":"title required"}"#),
            RemoteError::Validation(message) if message == "title required"
        ));
        assert!(matches!(
            error_for_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            RemoteError::Network(_)
        ));
    }

    #[test]
    fn test_parse_api_message_prefers_envelope_message() {
        let message = parse_api_message(r#"{"message":" bad title ","error":"x"}"#);
        assert_eq!(message, Some("bad title".to_string()));
        assert_eq!(parse_api_message("  "), None);
        assert_eq!(parse_api_message("plain text"), Some("plain text".to_string()));
    }
}
