use draftloom_core::{
    CommentInput, CommentNotification, CommentPlacement, CreateDraftInput, Draft, NotificationSink,
    Visibility, WorkspaceError, WorkspaceErrorKind, WorkspaceService,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    notifications: Mutex<Vec<CommentNotification>>,
}

impl NotificationSink for RecordingSink {
    fn comment_posted(&self, notification: &CommentNotification) {
        self.notifications.lock().unwrap().push(notification.clone());
    }
}

fn create(
    service: &WorkspaceService<draftloom_core::MemoryDraftRepository>,
    owner: &str,
    visibility: Visibility,
    shared_with: &[&str],
) -> Draft {
    service
        .create_draft(CreateDraftInput {
            owner_id: owner.to_string(),
            title: "Commented draft".to_string(),
            content: "body".to_string(),
            visibility: Some(visibility),
            shared_with: shared_with.iter().map(|id| id.to_string()).collect(),
            ..CreateDraftInput::default()
        })
        .unwrap()
}

#[test]
fn whitespace_body_is_rejected_with_required_content_message() {
    let service = WorkspaceService::in_memory();
    let draft = create(&service, "writer-aria", Visibility::Private, &[]);

    let err = service
        .create_comment(
            draft.id,
            "writer-aria",
            CommentInput {
                body: "   \n\t ".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap_err();

    assert_eq!(err.kind(), WorkspaceErrorKind::Validation);
    assert_eq!(err.to_string(), "Comments require content");
}

#[test]
fn commenting_requires_read_access_not_write_access() {
    let service = WorkspaceService::in_memory();
    let public = create(&service, "writer-aria", Visibility::Public, &[]);
    let private = create(&service, "writer-aria", Visibility::Private, &[]);

    // writer-ronin can read the public draft but cannot write it; a
    // comment still goes through.
    let comment = service
        .create_comment(
            public.id,
            "writer-ronin",
            CommentInput {
                body: "drive-by praise".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap();
    assert_eq!(comment.author_id, "writer-ronin");

    let err = service
        .create_comment(
            private.id,
            "writer-ronin",
            CommentInput {
                body: "should not land".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), WorkspaceErrorKind::Unauthorized);
    assert!(err.to_string().contains("authoriz"));
}

#[test]
fn placement_defaults_to_sidebar_and_inline_keeps_its_quote() {
    let service = WorkspaceService::in_memory();
    let draft = create(&service, "writer-aria", Visibility::Private, &[]);

    let sidebar = service
        .create_comment(
            draft.id,
            "writer-aria",
            CommentInput {
                body: "general remark".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap();
    assert_eq!(sidebar.placement, CommentPlacement::Sidebar);
    assert!(sidebar.quote.is_none());

    let inline = service
        .create_comment(
            draft.id,
            "writer-aria",
            CommentInput {
                body: "tighten this sentence".to_string(),
                placement: Some(CommentPlacement::Inline),
                quote: Some("Hello world".to_string()),
            },
        )
        .unwrap();
    assert_eq!(inline.placement, CommentPlacement::Inline);
    assert_eq!(inline.quote.as_deref(), Some("Hello world"));
}

#[test]
fn comments_are_listed_in_creation_order() {
    let service = WorkspaceService::in_memory();
    let draft = create(&service, "writer-aria", Visibility::Shared, &["writer-jules"]);

    for body in ["first", "second", "third"] {
        service
            .create_comment(
                draft.id,
                "writer-jules",
                CommentInput {
                    body: body.to_string(),
                    ..CommentInput::default()
                },
            )
            .unwrap();
    }

    let bodies: Vec<String> = service
        .list_comments(draft.id, "writer-aria")
        .unwrap()
        .into_iter()
        .map(|comment| comment.body)
        .collect();
    assert_eq!(bodies, vec!["first", "second", "third"]);
}

#[test]
fn listing_comments_is_read_gated() {
    let service = WorkspaceService::in_memory();
    let draft = create(&service, "writer-aria", Visibility::Private, &[]);

    let err = service.list_comments(draft.id, "writer-ronin").unwrap_err();
    assert!(matches!(err, WorkspaceError::Unauthorized { .. }));
}

#[test]
fn comment_notifies_owner_and_collaborators_except_the_author() {
    let sink = Arc::new(RecordingSink::default());
    let service = WorkspaceService::in_memory().with_notifier(sink.clone());
    let draft = create(
        &service,
        "writer-aria",
        Visibility::Shared,
        &["writer-jules", "writer-ronin"],
    );

    service
        .create_comment(
            draft.id,
            "writer-jules",
            CommentInput {
                body: "flagging a typo".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap();

    let notifications = sink.notifications.lock().unwrap();
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.draft_id, draft.id);
    assert_eq!(notification.comment_author, "writer-jules");
    assert!(notification.recipients.contains(&"writer-aria".to_string()));
    assert!(notification.recipients.contains(&"writer-ronin".to_string()));
    assert!(!notification.recipients.contains(&"writer-jules".to_string()));
}

#[test]
fn owner_commenting_notifies_collaborators_only() {
    let sink = Arc::new(RecordingSink::default());
    let service = WorkspaceService::in_memory().with_notifier(sink.clone());
    let draft = create(&service, "writer-aria", Visibility::Shared, &["writer-jules"]);

    service
        .create_comment(
            draft.id,
            "writer-aria",
            CommentInput {
                body: "replying to myself".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap();

    let notifications = sink.notifications.lock().unwrap();
    assert_eq!(notifications[0].recipients, vec!["writer-jules".to_string()]);
}

#[test]
fn rejected_comments_do_not_notify_anyone() {
    let sink = Arc::new(RecordingSink::default());
    let service = WorkspaceService::in_memory().with_notifier(sink.clone());
    let draft = create(&service, "writer-aria", Visibility::Private, &[]);

    let _ = service.create_comment(
        draft.id,
        "writer-ronin",
        CommentInput {
            body: "no access".to_string(),
            ..CommentInput::default()
        },
    );
    let _ = service.create_comment(
        draft.id,
        "writer-aria",
        CommentInput {
            body: "  ".to_string(),
            ..CommentInput::default()
        },
    );

    assert!(sink.notifications.lock().unwrap().is_empty());
}

#[test]
fn workspace_fetch_is_the_read_path_that_carries_comments() {
    let service = WorkspaceService::in_memory();
    let draft = create(&service, "writer-aria", Visibility::Public, &[]);
    service
        .create_comment(
            draft.id,
            "writer-aria",
            CommentInput {
                body: "visible in workspace".to_string(),
                ..CommentInput::default()
            },
        )
        .unwrap();

    let workspace = service.get_draft_workspace(draft.id, "writer-aria").unwrap();
    assert_eq!(workspace.comments.len(), 1);

    let listed = service.list_accessible_drafts("writer-aria");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].comments.is_empty());

    let buckets = service.list_draft_buckets("writer-aria");
    assert!(buckets.owned[0].comments.is_empty());
}
