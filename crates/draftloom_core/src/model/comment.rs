//! Comment thread model.
//!
//! # Invariants
//! - `body` is non-empty after trimming; validation happens before append.
//! - Comments are append-only; the list order is creation order.

use crate::model::draft::{DraftId, WriterId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a comment.
pub type CommentId = Uuid;

/// Where a comment is anchored in the workspace view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPlacement {
    /// Anchored to quoted draft content.
    Inline,
    /// Attached to the draft as a whole.
    Sidebar,
}

impl CommentPlacement {
    /// Stable string value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Sidebar => "sidebar",
        }
    }
}

/// Parses a requested placement; anything but `inline` is sidebar.
pub fn parse_placement(value: &str) -> CommentPlacement {
    if value.trim() == "inline" {
        CommentPlacement::Inline
    } else {
        CommentPlacement::Sidebar
    }
}

/// One comment on a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub draft_id: DraftId,
    pub author_id: WriterId,
    pub body: String,
    pub placement: CommentPlacement,
    /// Anchor text for inline comments.
    pub quote: Option<String>,
    pub created_at: i64,
}

impl Comment {
    pub(crate) fn new(
        draft_id: DraftId,
        author_id: WriterId,
        body: String,
        placement: CommentPlacement,
        quote: Option<String>,
        now: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft_id,
            author_id,
            body,
            placement,
            quote,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_placement, CommentPlacement};

    #[test]
    fn only_inline_parses_to_inline() {
        assert_eq!(parse_placement("inline"), CommentPlacement::Inline);
        assert_eq!(parse_placement(" inline "), CommentPlacement::Inline);
        assert_eq!(parse_placement("sidebar"), CommentPlacement::Sidebar);
        assert_eq!(parse_placement("margin"), CommentPlacement::Sidebar);
        assert_eq!(parse_placement(""), CommentPlacement::Sidebar);
    }
}
