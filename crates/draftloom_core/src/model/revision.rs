//! Revision snapshot model.
//!
//! # Invariants
//! - Revisions are immutable once created; edits append, never mutate.
//! - Revision order is the containing array order, not timestamp order.

use crate::model::draft::{DraftId, WriterId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a revision.
pub type RevisionId = Uuid;

/// How a revision came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionLabel {
    /// Explicit save by a writer.
    Save,
    /// Background autosave.
    Autosave,
}

impl RevisionLabel {
    /// Stable string value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Autosave => "autosave",
        }
    }

    /// Maps an update request's autosave flag to a label.
    pub fn from_autosave_flag(autosave: bool) -> Self {
        if autosave {
            Self::Autosave
        } else {
            Self::Save
        }
    }
}

/// One immutable content snapshot in a draft's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: RevisionId,
    pub draft_id: DraftId,
    /// Snapshot payload; never mutated after creation.
    pub content: String,
    /// Count of whitespace-delimited tokens in `content` at creation time.
    pub word_count: usize,
    pub author_id: WriterId,
    pub label: RevisionLabel,
    pub created_at: i64,
}
