//! Core domain logic for DraftLoom.
//! This crate is the single source of truth for draft-workspace invariants.

pub mod access;
pub mod diff;
pub mod events;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stream;

pub use access::{can_read, can_write, resolve_tier, AccessTier};
pub use diff::{diff_words, DiffSegment, RevisionDiff, SegmentKind};
pub use events::{DraftEvent, DraftEventBus, EventKind, SubscriptionId};
pub use ledger::{append_revision, find_revision, word_count};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{parse_placement, Comment, CommentId, CommentPlacement};
pub use model::draft::{
    parse_visibility, AttachmentMeta, Draft, DraftId, Visibility, WriterId, DEFAULT_DRAFT_TITLE,
};
pub use model::revision::{Revision, RevisionId, RevisionLabel};
pub use repo::draft_repo::{DraftRepository, MemoryDraftRepository};
pub use service::external::{
    AssetStore, CommentNotification, NoopAssetStore, NoopNotificationSink, NotificationSink,
    StaticWriterDirectory, WriterDirectory, WriterProfile,
};
pub use service::workspace_service::{
    CommentInput, CreateDraftInput, DraftBuckets, DraftPatch, WorkspaceError, WorkspaceErrorKind,
    WorkspaceResult, WorkspaceService,
};
pub use stream::{frame, DraftStreamSession, READY_EVENT, SNAPSHOT_EVENT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
