//! Word-level diff between revision contents.
//!
//! # Responsibility
//! - Tokenize contents on whitespace and align them with a Myers diff.
//! - Emit tagged segments in document order for workspace consumers.
//!
//! # Invariants
//! - Identical inputs produce at most one segment, tagged unchanged.
//! - Segments partition both token sequences: unchanged + removed covers
//!   the base, unchanged + added covers the target.

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffOp};

/// Classification of one diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

/// A run of tokens tagged against the base-to-target transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSegment {
    pub kind: SegmentKind,
    /// The run's tokens joined with single spaces.
    pub text: String,
}

/// Diff result for one revision pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionDiff {
    pub segments: Vec<DiffSegment>,
}

/// Computes word-level segments transforming `base` into `target`.
///
/// Tokens are whitespace-delimited words; alignment is the deterministic
/// Myers variant, so equal inputs always yield equal segment lists.
pub fn diff_words(base: &str, target: &str) -> Vec<DiffSegment> {
    let base_tokens: Vec<&str> = base.split_whitespace().collect();
    let target_tokens: Vec<&str> = target.split_whitespace().collect();

    let mut segments: Vec<DiffSegment> = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &base_tokens, &target_tokens) {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                push_run(
                    &mut segments,
                    SegmentKind::Unchanged,
                    &base_tokens[old_index..old_index + len],
                );
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                push_run(
                    &mut segments,
                    SegmentKind::Removed,
                    &base_tokens[old_index..old_index + old_len],
                );
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                push_run(
                    &mut segments,
                    SegmentKind::Added,
                    &target_tokens[new_index..new_index + new_len],
                );
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                push_run(
                    &mut segments,
                    SegmentKind::Removed,
                    &base_tokens[old_index..old_index + old_len],
                );
                push_run(
                    &mut segments,
                    SegmentKind::Added,
                    &target_tokens[new_index..new_index + new_len],
                );
            }
        }
    }
    segments
}

/// Appends one run, merging it into the previous segment when the tag
/// repeats across adjacent ops.
fn push_run(segments: &mut Vec<DiffSegment>, kind: SegmentKind, tokens: &[&str]) {
    if tokens.is_empty() {
        return;
    }
    let text = tokens.join(" ");
    if let Some(last) = segments.last_mut() {
        if last.kind == kind {
            last.text.push(' ');
            last.text.push_str(&text);
            return;
        }
    }
    segments.push(DiffSegment { kind, text });
}
