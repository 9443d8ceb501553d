//! REST transport for the Learnora API.
//!
//! [`LearnoraApi`] is the seam the dispatcher and the non-interactive
//! commands talk to; [`HttpApi`] is the reqwest implementation. Every
//! response is unwrapped from its JSON envelope here, and list fields the
//! server leaves out decode as empty lists.

use crate::error::ApiError;
use crate::types::{Assessment, ChatExchange, ContentItem, LearningPath};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait LearnoraApi: Send + Sync {
    /// `POST /api/assessment/start`
    async fn start_assessment(&self) -> Result<Assessment, ApiError>;

    /// `GET /api/assessment/history`, newest first.
    async fn assessment_history(&self) -> Result<Vec<Assessment>, ApiError>;

    /// `GET /api/learning-paths`
    async fn learning_paths(&self) -> Result<Vec<LearningPath>, ApiError>;

    /// `GET /api/learning-paths/{id}`, content details only.
    async fn path_details(&self, path_id: i64) -> Result<Vec<ContentItem>, ApiError>;

    /// `PUT /api/learning-paths/{id}/progress`
    async fn update_progress(&self, path_id: i64, progress: u8) -> Result<(), ApiError>;

    /// `GET /api/chat/history`, oldest first.
    async fn chat_history(&self) -> Result<Vec<ChatExchange>, ApiError>;

    /// `POST /api/chat`, returns the assistant's reply text.
    async fn send_chat(&self, message: &str) -> Result<String, ApiError>;
}

#[derive(Deserialize)]
struct AssessmentEnvelope {
    assessment: Assessment,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    assessments: Vec<Assessment>,
}

#[derive(Deserialize)]
struct PathsEnvelope {
    #[serde(default)]
    learning_paths: Vec<LearningPath>,
}

#[derive(Deserialize)]
struct PathDetailsEnvelope {
    #[serde(default)]
    content_details: Vec<ContentItem>,
}

#[derive(Deserialize)]
struct ChatHistoryEnvelope {
    #[serde(default)]
    messages: Vec<ChatExchange>,
}

#[derive(Deserialize)]
struct ChatReplyEnvelope {
    response: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ProgressRequest {
    progress: u8,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed client rooted at an API base URL such as
/// `http://localhost:5000`.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                base_url,
                parsed.scheme()
            )));
        }

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LearnoraApi for HttpApi {
    async fn start_assessment(&self) -> Result<Assessment, ApiError> {
        let resp = self.client.post(self.url("/api/assessment/start")).send().await?;
        let envelope: AssessmentEnvelope = check_response(resp).await?.json().await?;
        Ok(envelope.assessment)
    }

    async fn assessment_history(&self) -> Result<Vec<Assessment>, ApiError> {
        let resp = self.client.get(self.url("/api/assessment/history")).send().await?;
        let envelope: HistoryEnvelope = check_response(resp).await?.json().await?;
        Ok(envelope.assessments)
    }

    async fn learning_paths(&self) -> Result<Vec<LearningPath>, ApiError> {
        let resp = self.client.get(self.url("/api/learning-paths")).send().await?;
        let envelope: PathsEnvelope = check_response(resp).await?.json().await?;
        Ok(envelope.learning_paths)
    }

    async fn path_details(&self, path_id: i64) -> Result<Vec<ContentItem>, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/learning-paths/{}", path_id)))
            .send()
            .await?;
        let envelope: PathDetailsEnvelope = check_response(resp).await?.json().await?;
        Ok(envelope.content_details)
    }

    async fn update_progress(&self, path_id: i64, progress: u8) -> Result<(), ApiError> {
        let resp = self
            .client
            .put(self.url(&format!("/api/learning-paths/{}/progress", path_id)))
            .json(&ProgressRequest { progress })
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn chat_history(&self) -> Result<Vec<ChatExchange>, ApiError> {
        let resp = self.client.get(self.url("/api/chat/history")).send().await?;
        let envelope: ChatHistoryEnvelope = check_response(resp).await?.json().await?;
        Ok(envelope.messages)
    }

    async fn send_chat(&self, message: &str) -> Result<String, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/chat"))
            .json(&ChatRequest { message })
            .send()
            .await?;
        let envelope: ChatReplyEnvelope = check_response(resp).await?.json().await?;
        Ok(envelope.response)
    }
}

/// Pass successful responses through; turn anything else into
/// [`ApiError::Api`], preferring the server's `{"error": ...}` message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}
