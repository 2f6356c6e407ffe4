//! In-memory conversation sessions.
//!
//! A session owns the snapshot it was opened with and an append-only transcript.
//! Sends are serialised: while one reply is in flight, further messages are
//! refused. A reply that arrives after its session was closed is dropped.
//! Sessions idle for longer than the store's timeout expire; a session with a
//! reply in flight never does.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::conversation::ConversationTurn;
use crate::models::knowledge::KnowledgeSnapshot;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Session {0} is still answering the previous message")]
    Busy(Uuid),

    #[error("Message cannot be empty")]
    EmptyMessage,
}

struct Session {
    snapshot: Arc<KnowledgeSnapshot>,
    speaker_name: Option<String>,
    transcript: Vec<ConversationTurn>,
    pending: bool,
    opened_at: DateTime<Utc>,
    last_active: Instant,
}

impl Session {
    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        !self.pending && now.duration_since(self.last_active) >= idle_timeout
    }
}

/// Read-only view of a session returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub speaker_name: Option<String>,
    pub pending: bool,
    pub opened_at: DateTime<Utc>,
    pub transcript: Vec<ConversationTurn>,
}

/// What a caller needs to produce the reply for a turn started with `begin_turn`.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub message: String,
    pub snapshot: Arc<KnowledgeSnapshot>,
    pub speaker_name: Option<String>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    /// Opens a conversation whose transcript starts with `welcome` from the assistant.
    pub async fn open(
        &self,
        snapshot: KnowledgeSnapshot,
        speaker_name: Option<String>,
        welcome: String,
    ) -> SessionView {
        self.sweep_idle().await;

        let id = Uuid::new_v4();
        let session = Session {
            snapshot: Arc::new(snapshot),
            speaker_name: speaker_name.filter(|name| !name.trim().is_empty()),
            transcript: vec![ConversationTurn::assistant(welcome)],
            pending: false,
            opened_at: Utc::now(),
            last_active: Instant::now(),
        };
        let opened = view(id, &session);
        self.sessions.write().await.insert(id, session);
        info!(session_id = %id, "Conversation opened");
        opened
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionView, SessionError> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&id)
            .filter(|session| !session.is_expired(now, self.idle_timeout))
            .ok_or(SessionError::NotFound(id))?;
        Ok(view(id, session))
    }

    /// Records the user's message and marks the session busy.
    pub async fn begin_turn(&self, id: Uuid, message: &str) -> Result<PendingTurn, SessionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let mut sessions = self.sessions.write().await;
        let session = live_mut(&mut sessions, id, self.idle_timeout)?;
        if session.pending {
            return Err(SessionError::Busy(id));
        }

        session.pending = true;
        session.last_active = Instant::now();
        session.transcript.push(ConversationTurn::user(message));
        Ok(PendingTurn {
            message: message.to_string(),
            snapshot: Arc::clone(&session.snapshot),
            speaker_name: session.speaker_name.clone(),
        })
    }

    /// Appends the assistant's reply and frees the session for the next message.
    /// Returns `false` when the session was closed in the meantime and the reply was dropped.
    pub async fn complete_turn(&self, id: Uuid, reply: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                session.transcript.push(ConversationTurn::assistant(reply));
                session.pending = false;
                session.last_active = Instant::now();
                true
            }
            None => {
                debug!(session_id = %id, "Session closed before reply arrived, discarding");
                false
            }
        }
    }

    /// Swaps in a freshly loaded snapshot. Not allowed mid-turn.
    pub async fn refresh_snapshot(
        &self,
        id: Uuid,
        snapshot: KnowledgeSnapshot,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = live_mut(&mut sessions, id, self.idle_timeout)?;
        if session.pending {
            return Err(SessionError::Busy(id));
        }
        session.snapshot = Arc::new(snapshot);
        Ok(())
    }

    pub async fn close(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!(session_id = %id, "Conversation closed"))
            .ok_or(SessionError::NotFound(id))
    }

    /// Drops every idle session and returns how many were removed.
    pub async fn sweep_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.idle_timeout));
        let swept = before - sessions.len();
        if swept > 0 {
            info!(swept, remaining = sessions.len(), "Expired idle conversations");
        }
        swept
    }

    /// Sweeps idle sessions every `period` until the runtime shuts down.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                store.sweep_idle().await;
            }
        })
    }
}

fn live_mut(
    sessions: &mut HashMap<Uuid, Session>,
    id: Uuid,
    idle_timeout: Duration,
) -> Result<&mut Session, SessionError> {
    let now = Instant::now();
    sessions
        .get_mut(&id)
        .filter(|session| !session.is_expired(now, idle_timeout))
        .ok_or(SessionError::NotFound(id))
}

fn view(id: Uuid, session: &Session) -> SessionView {
    SessionView {
        session_id: id,
        speaker_name: session.speaker_name.clone(),
        pending: session.pending,
        opened_at: session.opened_at,
        transcript: session.transcript.clone(),
    }
}
