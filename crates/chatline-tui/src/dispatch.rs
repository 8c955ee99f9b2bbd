//! Request dispatch for the event loop.
//!
//! Each send runs on its own tokio task. Outcomes come back over a channel so
//! the log is only ever touched by the loop that owns the [`App`](crate::App).

use chatline_engine::{ChatClient, ChatResponse, ClientError, PendingRequest};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Outcome of one request, tagged with the send that issued it.
#[derive(Debug)]
pub struct ChatReply {
    pub pending: PendingRequest,
    pub outcome: Result<ChatResponse, ClientError>,
}

/// Post `pending.message` on a new task and report the outcome on `tx`.
pub fn spawn_request(
    client: ChatClient,
    pending: PendingRequest,
    tx: mpsc::UnboundedSender<ChatReply>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = client.send(&pending.message).await;
        let seq = pending.seq;
        if tx.send(ChatReply { pending, outcome }).is_err() {
            debug!(seq, "reply dropped, event loop is gone");
        }
    })
}

/// Spawns requests and keeps their handles so they can be aborted on quit.
pub struct Dispatcher {
    client: ChatClient,
    tx: mpsc::UnboundedSender<ChatReply>,
    handles: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver its replies arrive on.
    pub fn new(client: ChatClient) -> (Self, mpsc::UnboundedReceiver<ChatReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            client,
            tx,
            handles: Vec::new(),
        };
        (dispatcher, rx)
    }

    /// Start the request for a send.
    pub fn dispatch(&mut self, pending: PendingRequest) {
        self.handles.retain(|handle| !handle.is_finished());
        let handle = spawn_request(self.client.clone(), pending, self.tx.clone());
        self.handles.push(handle);
    }

    /// Tasks that have not finished yet.
    pub fn running(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every outstanding request.
    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}
