use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::assistant::session::SessionStore;
use crate::assistant::Responder;
use crate::backend::BackendClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    /// Local rules, optionally fronted by the backend's AI endpoint (AI_DELEGATION_ENABLED).
    pub responder: Responder,
    pub sessions: SessionStore,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let backend = BackendClient::new(
            config.portfolio_api_url.clone(),
            Duration::from_secs(config.backend_timeout_secs),
        )
        .context("Failed to build backend HTTP client")?;

        let responder = if config.ai_delegation_enabled {
            Responder::with_delegate(Arc::new(backend.clone()))
        } else {
            Responder::local()
        };

        Ok(Self {
            backend,
            responder,
            sessions: SessionStore::new(Duration::from_secs(config.session_idle_secs)),
            config,
        })
    }
}
