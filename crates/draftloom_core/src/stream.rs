//! Text event-stream framing for the real-time delivery surface.
//!
//! # Responsibility
//! - Encode bus events as `event:`/`data:` text frames.
//! - Manage one client connection's subscription lifetime.
//!
//! # Invariants
//! - `close` is idempotent; dropping a session also detaches it.
//! - Frames preserve bus delivery order per event kind.
//! - A disconnected client never leaves listeners behind on the bus.

use crate::events::{DraftEvent, DraftEventBus, EventKind, SubscriptionId};
use crate::model::comment::Comment;
use crate::model::draft::{Draft, DraftId};
use log::warn;
use serde::Serialize;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Wire name of the connect handshake frame.
pub const READY_EVENT: &str = "ready";
/// Wire name of the initial full-state snapshot frame.
pub const SNAPSHOT_EVENT: &str = "draft";

/// Encodes one frame of the text event stream.
pub fn frame(kind: &str, json: &str) -> String {
    format!("event: {kind}\ndata: {json}\n\n")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentedPayload<'a> {
    draft_id: DraftId,
    comment: &'a Comment,
}

/// Serializes one bus event's data payload.
pub fn payload_json(event: &DraftEvent) -> Result<String, serde_json::Error> {
    match event {
        DraftEvent::Updated { draft } => serde_json::to_string(draft),
        DraftEvent::Commented { draft_id, comment } => serde_json::to_string(&CommentedPayload {
            draft_id: *draft_id,
            comment,
        }),
    }
}

/// One client connection's live view of the event bus.
///
/// The session owns two bus subscriptions and a frame queue; the transport
/// layer drains [`DraftStreamSession::frames`] into the wire connection and
/// calls [`DraftStreamSession::close`] (or drops the session) on
/// disconnect.
pub struct DraftStreamSession {
    bus: Arc<DraftEventBus>,
    subscriptions: Vec<SubscriptionId>,
    receiver: Receiver<String>,
}

impl DraftStreamSession {
    /// Opens a session: queues the `ready` handshake and the full-state
    /// snapshot, then subscribes to both draft event kinds.
    pub fn open(bus: Arc<DraftEventBus>, snapshot: &[Draft]) -> Self {
        let (sender, receiver) = channel();

        queue_frame(&sender, READY_EVENT, Ok("{}".to_string()));
        queue_frame(&sender, SNAPSHOT_EVENT, serde_json::to_string(snapshot));

        let subscriptions = [EventKind::DraftUpdated, EventKind::DraftCommented]
            .into_iter()
            .map(|kind| {
                let sender = sender.clone();
                bus.subscribe(kind, move |event| {
                    queue_frame(&sender, event.kind().as_str(), payload_json(event));
                })
            })
            .collect();

        Self {
            bus,
            subscriptions,
            receiver,
        }
    }

    /// Frame queue drained by the transport layer.
    pub fn frames(&self) -> &Receiver<String> {
        &self.receiver
    }

    /// Returns the next queued frame without blocking.
    pub fn try_next_frame(&self) -> Option<String> {
        self.receiver.try_recv().ok()
    }

    /// Detaches both bus subscriptions. Safe to call more than once.
    pub fn close(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.bus.unsubscribe(subscription);
        }
    }
}

impl Drop for DraftStreamSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn queue_frame(sender: &Sender<String>, kind: &str, json: Result<String, serde_json::Error>) {
    match json {
        // A send failure means the receiver is gone; the client already
        // disconnected and there is nothing left to deliver.
        Ok(json) => {
            let _ = sender.send(frame(kind, &json));
        }
        Err(err) => {
            warn!("event=frame_encode module=stream status=error kind={kind} error={err}");
        }
    }
}
