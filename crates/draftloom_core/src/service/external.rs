//! Contracts for collaborators outside the draft core.
//!
//! # Responsibility
//! - Define the seams for the writer directory, notification delivery and
//!   binary asset storage.
//! - Ship the in-memory/no-op implementations hosts and tests start from.
//!
//! # Invariants
//! - Everything behind these traits is fire-and-forget from the core's
//!   perspective; no operation fails because a collaborator does.

use crate::model::draft::{AttachmentMeta, DraftId, WriterId};
use serde::{Deserialize, Serialize};

/// One known writer identity from the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterProfile {
    pub id: WriterId,
    pub display_name: String,
}

/// Read-only view of the host's writer/identity directory.
pub trait WriterDirectory: Send + Sync {
    /// Returns every known writer.
    fn list_writers(&self) -> Vec<WriterProfile>;

    /// Resolves one writer's display name.
    fn display_name(&self, writer_id: &str) -> Option<String>;
}

/// Fixed in-memory writer roster.
#[derive(Debug, Default)]
pub struct StaticWriterDirectory {
    writers: Vec<WriterProfile>,
}

impl StaticWriterDirectory {
    pub fn new(writers: Vec<WriterProfile>) -> Self {
        Self { writers }
    }
}

impl WriterDirectory for StaticWriterDirectory {
    fn list_writers(&self) -> Vec<WriterProfile> {
        self.writers.clone()
    }

    fn display_name(&self, writer_id: &str) -> Option<String> {
        self.writers
            .iter()
            .find(|writer| writer.id == writer_id)
            .map(|writer| writer.display_name.clone())
    }
}

/// Outbound "someone commented on your draft" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNotification {
    pub draft_id: DraftId,
    pub draft_title: String,
    pub comment_author: WriterId,
    /// Owner and shared collaborators, minus the comment author.
    pub recipients: Vec<WriterId>,
}

/// Fire-and-forget delivery of workspace notifications.
pub trait NotificationSink: Send + Sync {
    fn comment_posted(&self, notification: &CommentNotification);
}

/// Sink that drops every notification.
#[derive(Debug, Default)]
pub struct NoopNotificationSink;

impl NotificationSink for NoopNotificationSink {
    fn comment_posted(&self, _notification: &CommentNotification) {}
}

/// Hand-off point for attachment binaries; the core keeps metadata only.
pub trait AssetStore: Send + Sync {
    fn register_attachment(&self, draft_id: DraftId, meta: &AttachmentMeta);
}

/// Asset store that acknowledges hand-offs without storing anything.
#[derive(Debug, Default)]
pub struct NoopAssetStore;

impl AssetStore for NoopAssetStore {
    fn register_attachment(&self, _draft_id: DraftId, _meta: &AttachmentMeta) {}
}
