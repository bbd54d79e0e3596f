use std::fmt;

use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::api::{ApiError, ChatRequest, ChatResponse};

pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// The two phases of a conversation.
///
/// Each turn flows through: IDLE → SENDING → IDLE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Sending,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "IDLE"),
            Phase::Sending => write!(f, "SENDING"),
        }
    }
}

/// Why a submission was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Input was empty after trimming.
    Empty,
    /// A request is already in flight.
    Busy,
}

/// The result of offering user input to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The turn started; the caller must send this request and later `settle`.
    Accepted(ChatRequest),
    Ignored(Ignored),
}

/// Transient conversation state: the transcript, the pending flag and the
/// session assigned by the service.
///
/// The transcript is append-only and at most one request is in flight.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    phase: Phase,
    session_id: Option<String>,
    fallback_message: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MESSAGE)
    }
}

impl Conversation {
    pub fn new(fallback_message: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Idle,
            session_id: None,
            fallback_message: fallback_message.into(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Sending
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// IDLE → SENDING.
    ///
    /// Guarded by non-empty trimmed input and not already sending. On
    /// acceptance the user message is appended immediately with the input
    /// verbatim, and the request to send is returned.
    pub fn submit(&mut self, input: &str) -> Submission {
        if input.trim().is_empty() {
            return Submission::Ignored(Ignored::Empty);
        }
        if self.is_pending() {
            return Submission::Ignored(Ignored::Busy);
        }

        self.messages.push(Message::user(input));
        self.phase = Phase::Sending;
        Submission::Accepted(ChatRequest::new(input, self.session_id.clone()))
    }

    /// SENDING → IDLE, applying the outcome of the in-flight request.
    ///
    /// Success appends the answer with its sources and adopts a non-empty
    /// session id (the last one wins). Failure appends the fallback message
    /// once; the error itself only goes to the log. Returns the appended
    /// message, or `None` if no request was in flight.
    pub fn settle(&mut self, outcome: Result<ChatResponse, ApiError>) -> Option<&Message> {
        if !self.is_pending() {
            tracing::warn!("settle called with no request in flight");
            return None;
        }
        self.phase = Phase::Idle;

        let message = match outcome {
            Ok(response) => {
                if let Some(id) = response.session() {
                    if self.session_id.as_deref().is_some_and(|cur| cur != id) {
                        tracing::debug!(old = ?self.session_id, new = id, "service changed session id");
                    }
                    self.session_id = Some(id.to_string());
                }
                Message::assistant(response.answer, response.sources)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                Message::assistant(self.fallback_message.clone(), Vec::new())
            }
        };

        self.messages.push(message);
        self.messages.last()
    }
}
