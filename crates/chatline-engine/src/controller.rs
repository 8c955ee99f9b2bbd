//! Chat controller: the send/reply cycle over a message log.
//!
//! A send is split in two halves so the caller owns the network call:
//! [`ChatController::on_send`] does everything that happens synchronously on
//! submit and returns a [`PendingRequest`]; [`ChatController::resolve`] is the
//! continuation once the reply (or failure) is known.
//!
//! Sends are independent. Several requests may be in flight at once and, by
//! default, each renders in the order its reply arrives.

use crate::client::{ChatResponse, ClientError};
use crate::input::InputField;
use crate::message::{Author, MessageId, MessageKind, ERROR_REPLY, FALLBACK_REPLY, THINKING_TEXT};
use crate::message_log::MessageLog;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Behaviour switches for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Show a "Thinking..." entry while a request is in flight.
    pub show_thinking_indicator: bool,
    /// Drop replies to requests older than the latest one issued.
    pub discard_stale_replies: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            show_thinking_indicator: true,
            discard_stale_replies: false,
        }
    }
}

/// Lifecycle of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing sent yet.
    Idle,
    /// Request issued, reply not yet known.
    AwaitingResponse,
    /// A bot reply (or the fallback text) was appended.
    Rendered,
    /// The request failed and the error notice was appended.
    Errored,
    /// A newer request superseded this one; nothing was appended.
    Discarded,
}

impl RequestState {
    /// Whether the request has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rendered | Self::Errored | Self::Discarded)
    }
}

/// A request issued by [`ChatController::on_send`] and not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Monotonic sequence number, starting at 1.
    pub seq: u64,
    /// Text to post.
    pub message: String,
    /// Thinking entry to remove once resolved.
    pub placeholder: Option<MessageId>,
}

/// Drives the message log through send and reply.
#[derive(Debug, Clone, Default)]
pub struct ChatController {
    log: MessageLog,
    options: ControllerOptions,
    last_seq: u64,
    requests: BTreeMap<u64, RequestState>,
}

impl ChatController {
    /// Create a controller over an empty log.
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            log: MessageLog::new(),
            options,
            last_seq: 0,
            requests: BTreeMap::new(),
        }
    }

    /// The message log.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Mutable access to the log, for scrolling.
    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    /// Active options.
    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// Number of requests awaiting a reply.
    pub fn in_flight(&self) -> usize {
        self.requests
            .values()
            .filter(|s| **s == RequestState::AwaitingResponse)
            .count()
    }

    /// State of the request with sequence number `seq`.
    ///
    /// Sequence numbers that were never issued report [`RequestState::Idle`].
    pub fn request_state(&self, seq: u64) -> RequestState {
        self.requests.get(&seq).copied().unwrap_or(RequestState::Idle)
    }

    /// Sequence number of the most recently issued request.
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    /// Handle a send: echo the input, show the thinking entry, clear the field.
    ///
    /// The input is not validated; an empty field is sent as an empty message.
    /// The caller must issue exactly one request for the returned token and
    /// pass its outcome to [`resolve`](Self::resolve).
    pub fn on_send<I: InputField + ?Sized>(&mut self, input: &mut I) -> PendingRequest {
        let message = input.value().to_string();
        self.log.push(Author::User, MessageKind::Text, message.clone());

        let placeholder = self
            .options
            .show_thinking_indicator
            .then(|| self.log.push(Author::Bot, MessageKind::Placeholder, THINKING_TEXT));

        input.clear();

        self.last_seq += 1;
        self.requests.insert(self.last_seq, RequestState::AwaitingResponse);
        debug!(seq = self.last_seq, "Chat request issued");

        PendingRequest {
            seq: self.last_seq,
            message,
            placeholder,
        }
    }

    /// Apply the outcome of a request to the log.
    ///
    /// Resolving a request that is not awaiting a response changes nothing and
    /// returns its current state.
    pub fn resolve(
        &mut self,
        pending: PendingRequest,
        outcome: Result<ChatResponse, ClientError>,
    ) -> RequestState {
        let current = self.request_state(pending.seq);
        if current != RequestState::AwaitingResponse {
            warn!(seq = pending.seq, state = ?current, "Ignoring reply for inactive request");
            return current;
        }

        if let Some(id) = pending.placeholder {
            self.log.remove(id);
        }

        let state = self.render_outcome(&pending, outcome);
        self.requests.insert(pending.seq, state);
        state
    }

    fn render_outcome(
        &mut self,
        pending: &PendingRequest,
        outcome: Result<ChatResponse, ClientError>,
    ) -> RequestState {
        if self.options.discard_stale_replies && pending.seq < self.last_seq {
            debug!(
                seq = pending.seq,
                latest = self.last_seq,
                "Discarding reply to superseded request"
            );
            return RequestState::Discarded;
        }

        match outcome {
            Ok(response) => {
                let text = response
                    .reply_text()
                    .unwrap_or_else(|| FALLBACK_REPLY.to_string());
                self.log.push(Author::Bot, MessageKind::Text, text);
                debug!(seq = pending.seq, "Chat reply rendered");
                RequestState::Rendered
            }
            Err(e) => {
                error!(seq = pending.seq, error = %e, "Chat request failed");
                self.log.push(Author::Bot, MessageKind::Error, ERROR_REPLY);
                RequestState::Errored
            }
        }
    }
}
