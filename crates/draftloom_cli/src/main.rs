//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `draftloom_core` end-to-end from a plain binary.
//! - Keep output deterministic enough for quick local sanity checks.

use draftloom_core::{
    CommentInput, CreateDraftInput, DraftPatch, SegmentKind, Visibility, WorkspaceError,
    WorkspaceService,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("draftloom smoke run failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), WorkspaceError> {
    println!("draftloom_core version={}", draftloom_core::core_version());

    let service = WorkspaceService::in_memory();
    let draft = service.create_draft(CreateDraftInput {
        owner_id: "writer-aria".to_string(),
        title: "Smoke draft".to_string(),
        content: "<p>Hello world</p>".to_string(),
        visibility: Some(Visibility::Shared),
        shared_with: vec!["writer-jules".to_string()],
        ..CreateDraftInput::default()
    })?;

    let updated = service.update_draft(
        draft.id,
        "writer-jules",
        DraftPatch {
            content: Some("<p>Hello world</p><p>Added line</p>".to_string()),
            autosave: true,
            ..DraftPatch::default()
        },
    )?;

    service.create_comment(
        draft.id,
        "writer-jules",
        CommentInput {
            body: "Second paragraph reads well.".to_string(),
            ..CommentInput::default()
        },
    )?;

    let diff = service.compare_draft_revisions(
        draft.id,
        updated.revisions[0].id,
        updated.revisions[1].id,
        "writer-aria",
    )?;

    println!("revisions={}", updated.revisions.len());
    println!(
        "comments={}",
        service.list_comments(draft.id, "writer-aria")?.len()
    );
    for segment in diff.segments {
        let tag = match segment.kind {
            SegmentKind::Unchanged => '=',
            SegmentKind::Added => '+',
            SegmentKind::Removed => '-',
        };
        println!("{tag} {}", segment.text);
    }
    Ok(())
}
