//! Append-only revision ledger.
//!
//! # Responsibility
//! - Append immutable snapshots with word counts derived at write time.
//! - Expose chronological revision access for listings and diffing.
//!
//! # Invariants
//! - Revision order is array order; it is never recomputed from timestamps.
//! - Existing revisions are never mutated.

use crate::model::draft::Draft;
use crate::model::now_epoch_ms;
use crate::model::revision::{Revision, RevisionId, RevisionLabel};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Counts whitespace-delimited tokens in raw content.
///
/// Plain split on runs of whitespace; markup counts as text, so
/// `<p>Hello world</p>` is two words.
pub fn word_count(content: &str) -> usize {
    WHITESPACE_RE
        .split(content)
        .filter(|token| !token.is_empty())
        .count()
}

/// Appends one revision snapshot to the draft and returns a copy of it.
pub fn append_revision(
    draft: &mut Draft,
    content: impl Into<String>,
    author_id: impl Into<String>,
    label: RevisionLabel,
) -> Revision {
    let content = content.into();
    let revision = Revision {
        id: Uuid::new_v4(),
        draft_id: draft.id,
        word_count: word_count(&content),
        content,
        author_id: author_id.into(),
        label,
        created_at: now_epoch_ms(),
    };
    draft.revisions.push(revision.clone());
    revision
}

/// Finds one of the draft's revisions by id.
pub fn find_revision(draft: &Draft, revision_id: RevisionId) -> Option<&Revision> {
    draft
        .revisions
        .iter()
        .find(|revision| revision.id == revision_id)
}
