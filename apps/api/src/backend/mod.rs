//! Client for the Python chat, interview and validation service.
//!
//! Every call is a single attempt. Callers decide whether a failure is fatal
//! or gets replaced with fallback content.
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A 4xx carrying a FastAPI `detail` message meant for the caller.
    #[error("backend rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("backend returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// FastAPI-style error body (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
struct Endpoints {
    chat: String,
    interview: String,
    validation: String,
    base: String,
}

#[derive(Debug, Serialize)]
pub struct ChatPayload<'a> {
    pub profile_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InterviewStartPayload<'a> {
    pub participant_name: &'a str,
    pub questionnaire_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InterviewMessagePayload<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
    pub exchange_count: u32,
}

#[derive(Debug, Serialize)]
pub struct QuestionValidationPayload<'a> {
    pub question_id: &'a str,
    pub human_answer: &'a str,
    pub profile_id: &'a str,
}

/// Thin JSON-over-HTTP client for the Python service.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    endpoints: Endpoints,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoints: Endpoints {
                chat: config.chat_api_url.clone(),
                interview: config.interview_api_url.clone(),
                validation: config.validation_api_url.clone(),
                base: config.backend_url.clone(),
            },
        })
    }

    pub async fn chat(&self, payload: &ChatPayload<'_>) -> Result<Value, BackendError> {
        self.post_json(&self.endpoints.chat, payload).await
    }

    pub async fn start_interview(
        &self,
        payload: &InterviewStartPayload<'_>,
    ) -> Result<Value, BackendError> {
        self.post_json(&self.endpoints.interview, payload).await
    }

    pub async fn send_interview_message(
        &self,
        payload: &InterviewMessagePayload<'_>,
    ) -> Result<Value, BackendError> {
        let url = format!("{}/interview/message", self.endpoints.base);
        self.post_json(&url, payload).await
    }

    pub async fn complete_interview(&self, session_id: &str) -> Result<Value, BackendError> {
        // Session ids embed participant names, so they are pushed as an
        // encoded path segment rather than formatted into the URL.
        let mut url = Url::parse(&self.endpoints.base)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {e}", self.endpoints.base)))?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.endpoints.base.clone()))?
            .pop_if_empty()
            .extend(["interview", session_id, "complete"]);
        self.post_json(url.as_str(), &serde_json::json!({})).await
    }

    pub async fn validate_question(
        &self,
        payload: &QuestionValidationPayload<'_>,
    ) -> Result<Value, BackendError> {
        self.post_json(&self.endpoints.validation, payload).await
    }

    /// POSTs `body` as JSON and returns the decoded JSON response.
    /// Any non-2xx status is an error carrying the backend's message.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Value, BackendError> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, text));
        }

        debug!("Backend call to {url} succeeded ({} bytes)", text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

fn status_error(status: StatusCode, text: String) -> BackendError {
    match serde_json::from_str::<BackendErrorBody>(&text) {
        Ok(e) if status.is_client_error() => BackendError::Rejected {
            status: status.as_u16(),
            detail: e.detail,
        },
        Ok(e) => BackendError::Status {
            status: status.as_u16(),
            body: e.detail,
        },
        Err(_) => BackendError::Status {
            status: status.as_u16(),
            body: text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> BackendClient {
        BackendClient {
            client: Client::new(),
            endpoints: Endpoints {
                chat: format!("{base}/chat"),
                interview: format!("{base}/interview"),
                validation: format!("{base}/validation"),
                base: base.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        let backend = client_with_base("http://127.0.0.1:1");
        let err = backend
            .chat(&ChatPayload {
                profile_id: "p",
                message: "hi",
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }

    #[tokio::test]
    async fn test_invalid_base_url_rejected() {
        let backend = client_with_base("not a url");
        let err = backend.complete_interview("abc").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }

    #[test]
    fn test_fastapi_detail_is_extracted() {
        let body: BackendErrorBody =
            serde_json::from_str(r#"{"detail": "Profile not found"}"#).unwrap();
        assert_eq!(body.detail, "Profile not found");
    }

    #[test]
    fn test_client_error_detail_becomes_rejection() {
        let err = status_error(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Session not found"}"#.to_string(),
        );
        assert!(matches!(
            err,
            BackendError::Rejected { status: 404, ref detail } if detail == "Session not found"
        ));
    }

    #[test]
    fn test_server_error_and_plain_body_stay_status() {
        let err = status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "boom"}"#.to_string(),
        );
        assert!(matches!(err, BackendError::Status { status: 500, ref body } if body == "boom"));

        let err = status_error(StatusCode::BAD_REQUEST, "<html>bad</html>".to_string());
        assert!(matches!(err, BackendError::Status { status: 400, .. }));
    }
}
