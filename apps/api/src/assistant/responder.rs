//! The portfolio assistant's reply engine.
//!
//! `respond` never fails: remote delegation errors are logged and answered
//! locally, and the local rules always produce text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::assistant::formatter;
use crate::assistant::intent::{classify, Intent};
use crate::assistant::prompts::{CAPABILITY_MENU, EMPTY_REMOTE_ANSWER};
use crate::backend::{AiAnswer, AiContext, BackendError};
use crate::models::knowledge::KnowledgeSnapshot;

/// Remote answering service consulted before the local rules.
/// Implemented by `BackendClient`; swapped for stubs in tests.
#[async_trait]
pub trait RemoteDelegate: Send + Sync {
    async fn query_ai(
        &self,
        question: &str,
        context: &AiContext<'_>,
    ) -> Result<AiAnswer, BackendError>;
}

/// A reply and where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub text: String,
    /// Intent the local rules matched; `None` when the remote service answered.
    pub intent: Option<Intent>,
}

#[derive(Clone, Default)]
pub struct Responder {
    delegate: Option<Arc<dyn RemoteDelegate>>,
}

impl Responder {
    /// Answers from the snapshot only.
    pub fn local() -> Self {
        Self::default()
    }

    /// Asks `delegate` first and falls back to the local rules when it fails.
    pub fn with_delegate(delegate: Arc<dyn RemoteDelegate>) -> Self {
        Self {
            delegate: Some(delegate),
        }
    }

    pub fn is_delegating(&self) -> bool {
        self.delegate.is_some()
    }

    #[allow(dead_code)]
    pub async fn respond(
        &self,
        message: &str,
        snapshot: &KnowledgeSnapshot,
        speaker_name: Option<&str>,
    ) -> String {
        self.reply(message, snapshot, speaker_name).await.text
    }

    pub async fn reply(
        &self,
        message: &str,
        snapshot: &KnowledgeSnapshot,
        speaker_name: Option<&str>,
    ) -> Reply {
        let message = message.trim();
        if message.is_empty() {
            return Reply {
                text: CAPABILITY_MENU.to_string(),
                intent: Some(Intent::Help),
            };
        }

        if let Some(delegate) = &self.delegate {
            let context = AiContext {
                snapshot,
                speaker_name,
            };
            match delegate.query_ai(message, &context).await {
                Ok(answer) => {
                    debug!("Answered by remote delegate");
                    return Reply {
                        text: answer.text().unwrap_or(EMPTY_REMOTE_ANSWER).to_string(),
                        intent: None,
                    };
                }
                Err(e) => warn!("Remote delegate failed, answering locally: {e}"),
            }
        }

        self.reply_locally(message, snapshot, speaker_name)
    }

    /// Deterministic rule-based answer. Same inputs, same output.
    #[allow(dead_code)]
    pub fn respond_locally(
        &self,
        message: &str,
        snapshot: &KnowledgeSnapshot,
        speaker_name: Option<&str>,
    ) -> String {
        self.reply_locally(message, snapshot, speaker_name).text
    }

    fn reply_locally(
        &self,
        message: &str,
        snapshot: &KnowledgeSnapshot,
        speaker_name: Option<&str>,
    ) -> Reply {
        let intent = classify(message);
        debug!(?intent, "Answering locally");
        Reply {
            text: formatter::render(intent, message, snapshot, speaker_name),
            intent: Some(intent),
        }
    }
}
