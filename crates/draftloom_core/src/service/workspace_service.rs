//! Draft workspace use-case service.
//!
//! # Responsibility
//! - Provide the create/update/fetch/list/diff/comment operations consumed
//!   by the host's HTTP layer.
//! - Run every entry point through the access gate before touching data.
//! - Publish `draft:updated` / `draft:commented` events after mutations.
//!
//! # Invariants
//! - Creation produces exactly one revision; content-changing updates
//!   append exactly one more.
//! - Gate checks and mutation run in a single `modify` closure under the
//!   store lock, so same-draft updates serialize.
//! - Events are emitted after the store lock is released.
//! - The workspace fetch is the only read path that returns comments
//!   alongside the draft; listing paths return drafts without threads.

use crate::access::{self, AccessTier};
use crate::diff::{diff_words, RevisionDiff};
use crate::events::{DraftEvent, DraftEventBus};
use crate::ledger;
use crate::model::comment::{Comment, CommentPlacement};
use crate::model::draft::{
    AttachmentMeta, Draft, DraftId, Visibility, WriterId, DEFAULT_DRAFT_TITLE,
};
use crate::model::now_epoch_ms;
use crate::model::revision::{Revision, RevisionId, RevisionLabel};
use crate::repo::draft_repo::{DraftRepository, MemoryDraftRepository};
use crate::service::external::{
    AssetStore, CommentNotification, NoopAssetStore, NoopNotificationSink, NotificationSink,
    StaticWriterDirectory, WriterDirectory, WriterProfile,
};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Coarse failure classification for transport status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceErrorKind {
    NotFound,
    Unauthorized,
    Validation,
}

/// Failure taxonomy for workspace operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// Referenced draft does not exist.
    DraftNotFound(DraftId),
    /// Referenced revision does not belong to the draft.
    RevisionNotFound(RevisionId),
    /// Viewer lacks the permission tier the operation requires.
    Unauthorized {
        viewer: WriterId,
        action: &'static str,
        draft_id: DraftId,
    },
    /// Malformed client input.
    Validation(String),
}

impl WorkspaceError {
    /// Discriminant used by callers to pick a transport status.
    pub fn kind(&self) -> WorkspaceErrorKind {
        match self {
            Self::DraftNotFound(_) | Self::RevisionNotFound(_) => WorkspaceErrorKind::NotFound,
            Self::Unauthorized { .. } => WorkspaceErrorKind::Unauthorized,
            Self::Validation(_) => WorkspaceErrorKind::Validation,
        }
    }
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DraftNotFound(id) => write!(f, "draft not found: {id}"),
            Self::RevisionNotFound(id) => write!(f, "revision not found: {id}"),
            // Existing callers recognize authorization failures by matching
            // "authoris"/"authoriz" in the message; keep that wording.
            Self::Unauthorized {
                viewer,
                action,
                draft_id,
            } => write!(
                f,
                "viewer `{viewer}` is not authorized to {action} draft {draft_id}"
            ),
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl Error for WorkspaceError {}

/// Owner-supplied creation request.
#[derive(Debug, Clone, Default)]
pub struct CreateDraftInput {
    pub owner_id: WriterId,
    /// Blank titles fall back to [`DEFAULT_DRAFT_TITLE`].
    pub title: String,
    pub content: String,
    /// Defaults to private.
    pub visibility: Option<Visibility>,
    /// Retained only when visibility is shared.
    pub shared_with: Vec<WriterId>,
    pub attachments: Vec<AttachmentMeta>,
    /// Optional note from the owner, recorded as an initial sidebar
    /// comment.
    pub note: Option<String>,
}

/// Partial update applied by [`WorkspaceService::update_draft`].
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub visibility: Option<Visibility>,
    pub shared_with: Option<Vec<WriterId>>,
    /// Labels the appended revision when `content` changes.
    pub autosave: bool,
}

/// Comment creation request.
#[derive(Debug, Clone, Default)]
pub struct CommentInput {
    pub body: String,
    /// Defaults to sidebar.
    pub placement: Option<CommentPlacement>,
    pub quote: Option<String>,
}

/// Per-viewer partition of the draft collection.
///
/// Buckets are disjoint and exhaustive over the viewer's accessible
/// drafts: owned wins over collaborating, which wins over public.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBuckets {
    pub owned: Vec<Draft>,
    pub collaborating: Vec<Draft>,
    pub public: Vec<Draft>,
}

/// Workspace service facade over draft storage.
pub struct WorkspaceService<R: DraftRepository> {
    repo: R,
    bus: Arc<DraftEventBus>,
    directory: Arc<dyn WriterDirectory>,
    notifier: Arc<dyn NotificationSink>,
    assets: Arc<dyn AssetStore>,
}

impl WorkspaceService<MemoryDraftRepository> {
    /// Creates a service over fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(MemoryDraftRepository::new())
    }
}

impl<R: DraftRepository> WorkspaceService<R> {
    /// Creates a service with no-op external collaborators and a fresh
    /// event bus.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            bus: Arc::new(DraftEventBus::new()),
            directory: Arc::new(StaticWriterDirectory::default()),
            notifier: Arc::new(NoopNotificationSink),
            assets: Arc::new(NoopAssetStore),
        }
    }

    /// Replaces the event bus shared with the delivery surface.
    pub fn with_event_bus(mut self, bus: Arc<DraftEventBus>) -> Self {
        self.bus = bus;
        self
    }

    /// Replaces the writer directory collaborator.
    pub fn with_directory(mut self, directory: Arc<dyn WriterDirectory>) -> Self {
        self.directory = directory;
        self
    }

    /// Replaces the notification sink collaborator.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the asset store collaborator.
    pub fn with_assets(mut self, assets: Arc<dyn AssetStore>) -> Self {
        self.assets = assets;
        self
    }

    /// Shared event emitter for the real-time delivery surface.
    pub fn event_bus(&self) -> &Arc<DraftEventBus> {
        &self.bus
    }

    /// Creates one draft with exactly one initial revision.
    pub fn create_draft(&self, input: CreateDraftInput) -> WorkspaceResult<Draft> {
        let owner_id = input.owner_id.trim().to_string();
        if owner_id.is_empty() {
            return Err(WorkspaceError::Validation(
                "Drafts require an owner".to_string(),
            ));
        }

        let title = if input.title.trim().is_empty() {
            DEFAULT_DRAFT_TITLE.to_string()
        } else {
            input.title
        };
        let visibility = input.visibility.unwrap_or(Visibility::Private);

        let mut draft = Draft::new(
            owner_id.clone(),
            title,
            input.content,
            visibility,
            now_epoch_ms(),
        );
        if visibility == Visibility::Shared {
            draft.shared_with = input.shared_with.into_iter().collect();
        }

        for meta in &input.attachments {
            self.assets.register_attachment(draft.id, meta);
        }
        draft.attachments = input.attachments;

        let snapshot = draft.content.clone();
        ledger::append_revision(&mut draft, snapshot, owner_id.clone(), RevisionLabel::Save);

        if let Some(note) = input.note {
            let note = note.trim().to_string();
            if !note.is_empty() {
                push_comment(&mut draft, owner_id.clone(), note, CommentPlacement::Sidebar, None);
            }
        }

        info!(
            "event=draft_created module=workspace status=ok draft_id={} owner={owner_id} visibility={}",
            draft.id,
            draft.visibility.as_str()
        );
        self.repo.insert(draft.clone());
        self.bus.emit(&DraftEvent::Updated {
            draft: draft.clone(),
        });
        Ok(draft)
    }

    /// Applies a partial update; appends one revision when content changed.
    pub fn update_draft(
        &self,
        draft_id: DraftId,
        actor_id: &str,
        patch: DraftPatch,
    ) -> WorkspaceResult<Draft> {
        let updated = self
            .repo
            .modify(draft_id, |draft| apply_patch(draft, actor_id, patch))
            .ok_or(WorkspaceError::DraftNotFound(draft_id))??;

        info!(
            "event=draft_updated module=workspace status=ok draft_id={draft_id} actor={actor_id} revisions={}",
            updated.revisions.len()
        );
        self.bus.emit(&DraftEvent::Updated {
            draft: updated.clone(),
        });
        Ok(updated)
    }

    /// Returns the full draft view, revisions and comments included.
    pub fn get_draft_workspace(
        &self,
        draft_id: DraftId,
        viewer_id: &str,
    ) -> WorkspaceResult<Draft> {
        let draft = self
            .repo
            .snapshot(draft_id)
            .ok_or(WorkspaceError::DraftNotFound(draft_id))?;
        ensure_can_read(&draft, viewer_id, "view")?;
        Ok(draft)
    }

    /// Returns every draft the viewer may read, in creation order.
    pub fn list_accessible_drafts(&self, viewer_id: &str) -> Vec<Draft> {
        self.repo
            .list()
            .into_iter()
            .filter(|draft| access::can_read(draft, viewer_id))
            .map(without_comments)
            .collect()
    }

    /// Partitions the viewer's accessible drafts into owned, collaborating
    /// and public buckets.
    pub fn list_draft_buckets(&self, viewer_id: &str) -> DraftBuckets {
        let mut buckets = DraftBuckets::default();
        for draft in self.repo.list() {
            match access::resolve_tier(&draft, viewer_id) {
                AccessTier::Owner => buckets.owned.push(without_comments(draft)),
                AccessTier::Collaborator => buckets.collaborating.push(without_comments(draft)),
                AccessTier::PublicReader => buckets.public.push(without_comments(draft)),
                AccessTier::None => {}
            }
        }
        buckets
    }

    /// Returns the draft's revisions, oldest first.
    pub fn list_draft_revisions(
        &self,
        draft_id: DraftId,
        viewer_id: &str,
    ) -> WorkspaceResult<Vec<Revision>> {
        let draft = self
            .repo
            .snapshot(draft_id)
            .ok_or(WorkspaceError::DraftNotFound(draft_id))?;
        ensure_can_read(&draft, viewer_id, "view revisions of")?;
        Ok(draft.revisions)
    }

    /// Computes the word-level diff transforming one revision into another.
    pub fn compare_draft_revisions(
        &self,
        draft_id: DraftId,
        base_revision_id: RevisionId,
        target_revision_id: RevisionId,
        viewer_id: &str,
    ) -> WorkspaceResult<RevisionDiff> {
        let draft = self
            .repo
            .snapshot(draft_id)
            .ok_or(WorkspaceError::DraftNotFound(draft_id))?;
        ensure_can_read(&draft, viewer_id, "compare revisions of")?;

        let base = ledger::find_revision(&draft, base_revision_id)
            .ok_or(WorkspaceError::RevisionNotFound(base_revision_id))?;
        let target = ledger::find_revision(&draft, target_revision_id)
            .ok_or(WorkspaceError::RevisionNotFound(target_revision_id))?;

        Ok(RevisionDiff {
            segments: diff_words(&base.content, &target.content),
        })
    }

    /// Appends one comment; read access is sufficient.
    pub fn create_comment(
        &self,
        draft_id: DraftId,
        actor_id: &str,
        input: CommentInput,
    ) -> WorkspaceResult<Comment> {
        let (comment, notification) = self
            .repo
            .modify(draft_id, |draft| build_comment(draft, actor_id, input))
            .ok_or(WorkspaceError::DraftNotFound(draft_id))??;

        info!(
            "event=draft_commented module=workspace status=ok draft_id={draft_id} author={actor_id} placement={}",
            comment.placement.as_str()
        );
        self.notifier.comment_posted(&notification);
        self.bus.emit(&DraftEvent::Commented {
            draft_id,
            comment: comment.clone(),
        });
        Ok(comment)
    }

    /// Returns the draft's comments in creation order.
    pub fn list_comments(
        &self,
        draft_id: DraftId,
        viewer_id: &str,
    ) -> WorkspaceResult<Vec<Comment>> {
        let draft = self
            .repo
            .snapshot(draft_id)
            .ok_or(WorkspaceError::DraftNotFound(draft_id))?;
        ensure_can_read(&draft, viewer_id, "view comments of")?;
        Ok(draft.comments)
    }

    /// Returns every known writer except the owner, for collaborator
    /// pickers. Exclusion filter only; no authorization logic.
    pub fn list_potential_collaborators(&self, owner_id: &str) -> Vec<WriterProfile> {
        self.directory
            .list_writers()
            .into_iter()
            .filter(|writer| writer.id != owner_id)
            .collect()
    }

    /// Clears every draft. Test isolation between scenarios; the only
    /// deletion path in this core.
    pub fn reset(&self) {
        self.repo.clear();
        info!("event=workspace_reset module=workspace status=ok");
    }
}

fn ensure_can_read(draft: &Draft, viewer_id: &str, action: &'static str) -> WorkspaceResult<()> {
    if access::can_read(draft, viewer_id) {
        Ok(())
    } else {
        Err(WorkspaceError::Unauthorized {
            viewer: viewer_id.to_string(),
            action,
            draft_id: draft.id,
        })
    }
}

fn apply_patch(draft: &mut Draft, actor_id: &str, patch: DraftPatch) -> WorkspaceResult<Draft> {
    if !access::can_write(draft, actor_id) {
        return Err(WorkspaceError::Unauthorized {
            viewer: actor_id.to_string(),
            action: "edit",
            draft_id: draft.id,
        });
    }

    if let Some(title) = patch.title {
        draft.title = title;
    }
    if let Some(visibility) = patch.visibility {
        draft.visibility = visibility;
    }
    if let Some(shared_with) = patch.shared_with {
        draft.shared_with = shared_with.into_iter().collect();
    }
    if let Some(content) = patch.content {
        if content != draft.content {
            draft.content = content.clone();
            ledger::append_revision(
                draft,
                content,
                actor_id,
                RevisionLabel::from_autosave_flag(patch.autosave),
            );
        }
    }
    draft.updated_at = now_epoch_ms();
    Ok(draft.clone())
}

fn build_comment(
    draft: &mut Draft,
    actor_id: &str,
    input: CommentInput,
) -> WorkspaceResult<(Comment, CommentNotification)> {
    if !access::can_read(draft, actor_id) {
        return Err(WorkspaceError::Unauthorized {
            viewer: actor_id.to_string(),
            action: "comment on",
            draft_id: draft.id,
        });
    }

    let body = input.body.trim().to_string();
    if body.is_empty() {
        return Err(WorkspaceError::Validation(
            "Comments require content".to_string(),
        ));
    }

    let placement = input.placement.unwrap_or(CommentPlacement::Sidebar);
    let comment = push_comment(draft, actor_id.to_string(), body, placement, input.quote);

    let mut recipients: Vec<WriterId> = Vec::new();
    if draft.owner_id != actor_id {
        recipients.push(draft.owner_id.clone());
    }
    if draft.visibility == Visibility::Shared {
        for writer in &draft.shared_with {
            if writer != actor_id && !recipients.contains(writer) {
                recipients.push(writer.clone());
            }
        }
    }

    let notification = CommentNotification {
        draft_id: draft.id,
        draft_title: draft.title.clone(),
        comment_author: actor_id.to_string(),
        recipients,
    };
    Ok((comment, notification))
}

fn push_comment(
    draft: &mut Draft,
    author_id: WriterId,
    body: String,
    placement: CommentPlacement,
    quote: Option<String>,
) -> Comment {
    let comment = Comment::new(draft.id, author_id, body, placement, quote, now_epoch_ms());
    draft.comments.push(comment.clone());
    comment
}

/// Listing paths omit comment threads; the workspace fetch is the one
/// read path that includes them.
fn without_comments(mut draft: Draft) -> Draft {
    draft.comments.clear();
    draft
}
