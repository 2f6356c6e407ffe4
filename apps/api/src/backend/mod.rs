//! Backend client: the single point of entry for all portfolio backend calls.
//!
//! ARCHITECTURAL RULE: No other module may call the portfolio backend directly.
//! Knowledge fetches and AI delegation both go through `BackendClient`.
//!
//! No retries here. A failed AI query falls straight through to the local
//! responder, and a failed knowledge fetch degrades that section to empty.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::assistant::RemoteDelegate;
use crate::models::knowledge::{
    EducationEntry, ExperienceEntry, KnowledgeSnapshot, Profile, ProjectEntry, SkillGroup,
};
use crate::models::lenient;

pub mod snapshot;

const PROFILE_PATH: &str = "/api/profile";
const SKILLS_PATH: &str = "/api/skills";
const EXPERIENCE_PATH: &str = "/api/experience";
const EDUCATION_PATH: &str = "/api/education";
const PROJECTS_PATH: &str = "/api/portfolio";
const AI_QUERY_PATH: &str = "/api/ai-query";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Context sent alongside a delegated question.
#[derive(Debug, Serialize)]
pub struct AiContext<'a> {
    pub snapshot: &'a KnowledgeSnapshot,
    #[serde(rename = "speakerName", skip_serializing_if = "Option::is_none")]
    pub speaker_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AiQueryRequest<'a> {
    question: &'a str,
    context: &'a AiContext<'a>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AiAnswer {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AiAnswer {
    /// The answer text, unless it is missing or blank.
    pub fn text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_profile(&self) -> Result<Profile, BackendError> {
        match self.get_json::<Value>(PROFILE_PATH).await? {
            Value::Null => Ok(Profile::default()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn get_skill_groups(&self) -> Result<Vec<SkillGroup>, BackendError> {
        Ok(lenient::entries(self.get_json(SKILLS_PATH).await?))
    }

    pub async fn get_experience(&self) -> Result<Vec<ExperienceEntry>, BackendError> {
        Ok(lenient::entries(self.get_json(EXPERIENCE_PATH).await?))
    }

    pub async fn get_education(&self) -> Result<Vec<EducationEntry>, BackendError> {
        Ok(lenient::entries(self.get_json(EDUCATION_PATH).await?))
    }

    pub async fn get_projects(&self) -> Result<Vec<ProjectEntry>, BackendError> {
        Ok(lenient::entries(self.get_json(PROJECTS_PATH).await?))
    }

    /// Asks the backend's AI endpoint. One request, no retry; any non-2xx is a failure.
    pub async fn query_ai(
        &self,
        question: &str,
        context: &AiContext<'_>,
    ) -> Result<AiAnswer, BackendError> {
        let response = self
            .client
            .post(self.url(AI_QUERY_PATH))
            .json(&AiQueryRequest { question, context })
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        debug!("AI query succeeded ({} bytes)", body.len());
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.client.get(self.url(path)).send().await?;
        let body = Self::success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Returns the body of a 2xx response, or the backend's error message otherwise.
    async fn success_body(response: Response) -> Result<String, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<BackendErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl RemoteDelegate for BackendClient {
    async fn query_ai(
        &self,
        question: &str,
        context: &AiContext<'_>,
    ) -> Result<AiAnswer, BackendError> {
        BackendClient::query_ai(self, question, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::assistant::Responder;

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_profile_decodes_lenient_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Asha",
                "email": "asha@example.com",
                "phone": 9000000000u64,
                "about": null
            })))
            .mount(&server)
            .await;

        let profile = client_for(&server).get_profile().await.unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.phone, "9000000000");
        assert_eq!(profile.about, "");
    }

    #[tokio::test]
    async fn test_null_profile_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;

        let profile = client_for(&server).get_profile().await.unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[tokio::test]
    async fn test_get_projects_uses_portfolio_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "UptimeEye", "github": "https://github.com/x/uptimeeye"},
                "garbage"
            ])))
            .mount(&server)
            .await;

        let projects = client_for(&server).get_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "UptimeEye");
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_api_error_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/skills"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"message": "warming up"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_skill_groups().await.unwrap_err();
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "warming up");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_ai_sends_question_and_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai-query"))
            .and(body_partial_json(json!({
                "question": "what are your skills",
                "context": {
                    "speakerName": "Asha",
                    "snapshot": {
                        "name": "Chandru",
                        "skillGroups": [{"category": "Frontend", "items": ["React"]}]
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Rust!"})))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = KnowledgeSnapshot {
            name: "Chandru".to_string(),
            skill_groups: vec![SkillGroup {
                category: "Frontend".to_string(),
                items: vec!["React".to_string()],
            }],
            ..Default::default()
        };
        let context = AiContext {
            snapshot: &snapshot,
            speaker_name: Some("Asha"),
        };
        let answer = client_for(&server)
            .query_ai("what are your skills", &context)
            .await
            .unwrap();
        assert_eq!(answer.answer.as_deref(), Some("Rust!"));
    }

    #[tokio::test]
    async fn test_query_ai_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai-query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let snapshot = KnowledgeSnapshot::default();
        let context = AiContext {
            snapshot: &snapshot,
            speaker_name: None,
        };
        let err = client_for(&server)
            .query_ai("hello", &context)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    fn skills_snapshot() -> KnowledgeSnapshot {
        KnowledgeSnapshot {
            name: "Chandru".to_string(),
            skill_groups: vec![SkillGroup {
                category: "Backend Development".to_string(),
                items: vec!["Rust".to_string()],
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_slow_ai_query_times_out_and_falls_back_to_local_rules() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai-query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"answer": "too late"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri(), Duration::from_secs(1)).unwrap();
        let snapshot = skills_snapshot();

        let started = std::time::Instant::now();
        let reply = Responder::with_delegate(Arc::new(client))
            .respond("what are your skills", &snapshot, None)
            .await;
        assert!(started.elapsed() < Duration::from_secs(3), "wait was not bounded by the timeout");

        let local = Responder::local()
            .respond("what are your skills", &snapshot, None)
            .await;
        assert_eq!(reply, local);
        assert!(reply.contains("Rust"));
    }

    #[tokio::test]
    async fn test_ai_query_server_error_falls_back_to_local_rules() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai-query"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "model offline"})))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = skills_snapshot();
        let reply = Responder::with_delegate(Arc::new(client_for(&server)))
            .respond("what are your skills", &snapshot, None)
            .await;
        let local = Responder::local().respond_locally("what are your skills", &snapshot, None);
        assert_eq!(reply, local);
    }
}
