//! Draft aggregate model.
//!
//! # Responsibility
//! - Define the draft record that owns its revisions and comments.
//! - Define the visibility tiers controlling read access.
//!
//! # Invariants
//! - `revisions` is never empty once a draft exists; creation appends #1.
//! - `shared_with` is only consulted when `visibility == Shared`.

use crate::model::comment::Comment;
use crate::model::revision::Revision;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for a draft.
pub type DraftId = Uuid;

/// Opaque writer identity resolved by the host's session layer.
pub type WriterId = String;

/// Title applied when a creation request leaves the title blank.
pub const DEFAULT_DRAFT_TITLE: &str = "Untitled draft";

/// Read-access classification for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Readable by the owner only.
    Private,
    /// Readable and writable by the owner and everyone in `shared_with`.
    Shared,
    /// Readable by anyone; writable by the owner only.
    Public,
}

impl Visibility {
    /// Stable string value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Shared => "shared",
            Self::Public => "public",
        }
    }
}

/// Parses one visibility value from its wire string.
pub fn parse_visibility(value: &str) -> Option<Visibility> {
    match value.trim() {
        "private" => Some(Visibility::Private),
        "shared" => Some(Visibility::Shared),
        "public" => Some(Visibility::Public),
        _ => None,
    }
}

/// Metadata recorded for an attachment handed off to external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// A versioned text/HTML document under collaborative editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    pub owner_id: WriterId,
    pub title: String,
    /// Current full payload; history lives in `revisions`.
    pub content: String,
    pub visibility: Visibility,
    /// Collaborator ids; meaningful only when `visibility == Shared`.
    pub shared_with: BTreeSet<WriterId>,
    pub attachments: Vec<AttachmentMeta>,
    /// Oldest first; append-only.
    pub revisions: Vec<Revision>,
    /// Creation order; append-only.
    pub comments: Vec<Comment>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Draft {
    /// Creates an empty draft shell; the caller appends revision #1.
    pub(crate) fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        visibility: Visibility,
        now: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            content: content.into(),
            visibility,
            shared_with: BTreeSet::new(),
            attachments: Vec::new(),
            revisions: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
