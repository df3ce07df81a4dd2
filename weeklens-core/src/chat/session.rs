//! Chat state machine: an append-only log plus at most one request in flight.
//!
//! ```text
//!            submit (non-blank)
//!   Idle ───────────────────────▶ Pending(request)
//!    ▲                                │
//!    └──────── resolve(id, ok|err) ───┘
//! ```
//!
//! Submitting while pending, or submitting blank text, changes nothing. The
//! user message is logged at submit time, so the log always reads as
//! alternating user/assistant pairs.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::types::{ChatMessage, ChatRole};

/// Assistant message used when the caller supplies none.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, something went wrong.";

/// Handle for a submitted message, to be sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    id: u64,
    message: String,
}

impl ChatRequest {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Trimmed text to send.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The request currently awaiting a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request: ChatRequest,
    pub started_at: Instant,
}

/// Whether a new submission is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatRequestState {
    #[default]
    Idle,
    Pending(PendingRequest),
}

/// Chat log, input draft and request lifecycle for one dashboard session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    log: Vec<ChatMessage>,
    state: ChatRequestState,
    draft: String,
    next_id: u64,
    fallback_message: String,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MESSAGE)
    }
}

impl ChatSession {
    pub fn new(fallback_message: impl Into<String>) -> Self {
        Self {
            log: Vec::new(),
            state: ChatRequestState::Idle,
            draft: String::new(),
            next_id: 1,
            fallback_message: fallback_message.into(),
        }
    }

    /// Submit `text`. Returns the request to send, or `None` if the
    /// submission was rejected (blank text, or a request already pending).
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        if self.is_pending() {
            tracing::debug!("Ignoring chat submit while a request is pending");
            return None;
        }

        let message = text.trim();
        if message.is_empty() {
            return None;
        }

        let request = ChatRequest {
            id: self.next_id,
            message: message.to_string(),
        };
        self.next_id += 1;

        self.log.push(ChatMessage::user(message));
        self.draft.clear();
        self.state = ChatRequestState::Pending(PendingRequest {
            request: request.clone(),
            started_at: Instant::now(),
        });

        tracing::info!(request_id = request.id, chars = message.len(), "Chat submitted");
        Some(request)
    }

    /// Submit the current draft.
    pub fn submit_draft(&mut self) -> Option<ChatRequest> {
        let text = self.draft.clone();
        self.submit(&text)
    }

    /// Record the outcome of request `id` and return to idle.
    ///
    /// Returns `false` (and changes nothing) if `id` is not the pending request.
    pub fn resolve(&mut self, id: u64, outcome: Result<String>) -> bool {
        let pending_id = match &self.state {
            ChatRequestState::Pending(pending) => pending.request.id,
            ChatRequestState::Idle => {
                tracing::warn!(request_id = id, "Chat reply arrived while idle");
                return false;
            }
        };
        if pending_id != id {
            tracing::warn!(
                request_id = id,
                pending_id,
                "Chat reply does not match the pending request"
            );
            return false;
        }

        let content = match outcome {
            Ok(reply) => {
                tracing::info!(request_id = id, "Chat reply received");
                reply
            }
            Err(e) => {
                tracing::warn!(request_id = id, error = %e, "Chat request failed");
                self.fallback_message.clone()
            }
        };

        self.log.push(ChatMessage::assistant(content));
        self.state = ChatRequestState::Idle;
        true
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn state(&self) -> &ChatRequestState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ChatRequestState::Pending(_))
    }

    /// How long the pending request has been waiting.
    pub fn pending_for(&self) -> Option<Duration> {
        match &self.state {
            ChatRequestState::Pending(pending) => Some(pending.started_at.elapsed()),
            ChatRequestState::Idle => None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Append to the draft. The input is disabled while a request is pending.
    pub fn push_char(&mut self, c: char) {
        if !self.is_pending() {
            self.draft.push(c);
        }
    }

    /// Delete the last character of the draft.
    pub fn backspace(&mut self) {
        if !self.is_pending() {
            self.draft.pop();
        }
    }

    /// Number of completed user/assistant exchanges.
    pub fn exchange_count(&self) -> usize {
        self.log
            .iter()
            .filter(|m| m.role == ChatRole::Assistant)
            .count()
    }
}
