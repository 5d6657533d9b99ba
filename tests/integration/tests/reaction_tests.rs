//! Reaction client integration tests
//!
//! Each test starts its own in-process backend on an ephemeral port and
//! drives it through the real HTTP adapter.
//!
//! Run with: cargo test -p integration-tests --test reaction_tests

use std::time::Duration;

use axum::http::{Method, StatusCode};
use integration_tests::{
    counts, fresh_comment, fresh_post, wait_until, TestBackend, CSRF_TOKEN,
};
use reaction_client::{GestureOutcome, GestureTarget, ReactionEvent, SyncError};
use reaction_core::ReactionKind;
use serde_json::json;

// ============================================================================
// Seeding
// ============================================================================

#[tokio::test]
async fn test_reseed_loads_server_state() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(
        post,
        Some(ReactionKind::Smile),
        counts(&[(ReactionKind::Smile, 2), (ReactionKind::Like, 5)]),
    );

    let view = ctx.sync().reseed(post).await.unwrap().unwrap();

    assert_eq!(view.icon_for_viewer, Some(ReactionKind::Smile));
    assert_eq!(view.ordered_badges[0].kind, ReactionKind::Like);
    assert_eq!(view.overflow_count, 5);
    assert_eq!(view.counter_label(), "+5");
}

#[tokio::test]
async fn test_reseed_of_missing_entity_evicts() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();

    let view = ctx.sync().reseed(post).await.unwrap();

    assert!(view.is_none());
    assert!(!ctx.sync().store().contains(post));
}

// ============================================================================
// Create / Update
// ============================================================================

#[tokio::test]
async fn test_quick_react_posts_like_with_csrf_header() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[]));
    ctx.sync().reseed(post).await.unwrap();

    let outcome = ctx
        .dispatcher()
        .dispatch(post, GestureTarget::resolve(Some("like"), None))
        .await
        .unwrap();

    assert!(matches!(outcome, GestureOutcome::Applied(_)));
    let writes = backend.reaction_writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, Method::POST);
    assert_eq!(writes[0].path, format!("/like/post/{}", post.id));
    assert_eq!(writes[0].csrf_token.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(writes[0].body, Some(json!({ "emojiType": "like" })));
    assert_eq!(
        backend.reactions_of(post),
        Some((Some(ReactionKind::Like), counts(&[(ReactionKind::Like, 1)])))
    );
}

#[tokio::test]
async fn test_panel_pick_updates_existing_reaction() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let comment = fresh_comment();
    backend.insert(
        comment,
        Some(ReactionKind::Like),
        counts(&[(ReactionKind::Like, 1), (ReactionKind::Thanks, 2)]),
    );
    ctx.sync().reseed(comment).await.unwrap();

    let outcome = ctx
        .dispatcher()
        .dispatch(comment, GestureTarget::resolve(None, Some("thanks")))
        .await
        .unwrap();

    let GestureOutcome::Applied(view) = outcome else {
        panic!("expected applied, got {outcome:?}");
    };
    let writes = backend.reaction_writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, Method::PUT);
    assert_eq!(writes[0].path, format!("/like/comment/{}", comment.id));

    let state = ctx.sync().store().get(comment).unwrap();
    assert_eq!(
        backend.reactions_of(comment),
        Some((state.viewer_reaction(), state.counts().clone()))
    );
    assert_eq!(view.ordered_badges.len(), 1);
    assert_eq!(view.ordered_badges[0].count, 3);
}

#[tokio::test]
async fn test_heart_scenario_end_to_end() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(
        post,
        None,
        counts(&[(ReactionKind::Like, 2), (ReactionKind::Heart, 1)]),
    );
    ctx.sync().reseed(post).await.unwrap();

    let view = ctx.sync().submit(post, ReactionKind::Heart).await.unwrap();

    let badges: Vec<_> = view
        .ordered_badges
        .iter()
        .map(|b| (b.kind, b.count))
        .collect();
    assert_eq!(
        badges,
        vec![(ReactionKind::Like, 2), (ReactionKind::Heart, 2)]
    );
    assert_eq!(view.overflow_count, 2);
    assert_eq!(view.icon_for_viewer, Some(ReactionKind::Heart));
}

#[tokio::test]
async fn test_repeat_pick_is_suppressed_without_request() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, Some(ReactionKind::Heart), counts(&[(ReactionKind::Heart, 1)]));
    ctx.sync().reseed(post).await.unwrap();

    let outcome = ctx
        .dispatcher()
        .dispatch(post, GestureTarget::EmojiPanel(ReactionKind::Heart))
        .await
        .unwrap();

    assert_eq!(outcome, GestureOutcome::Suppressed);
    assert!(backend.reaction_writes().is_empty());
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_missing_csrf_cookie_fails_without_touching_state() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend
        .client_with_cookies("sessionid=4bc9e1", Duration::from_secs(5))
        .expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[(ReactionKind::Like, 3)]));
    ctx.sync().reseed(post).await.unwrap();
    let before = ctx.sync().store().get(post).unwrap();
    let mut events = ctx.sync().subscribe();

    let err = ctx.sync().submit(post, ReactionKind::Heart).await.unwrap_err();

    assert!(matches!(err, SyncError::Transport(_)));
    assert_eq!(ctx.sync().store().get(post).unwrap(), before);
    assert_eq!(backend.reactions_of(post).unwrap().1, counts(&[(ReactionKind::Like, 3)]));
    match events.recv().await.unwrap() {
        ReactionEvent::Notice { notice, .. } => assert!(notice.retryable),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_conflict_adopts_server_snapshot() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[]));
    ctx.sync().reseed(post).await.unwrap();
    backend.react_elsewhere(post, ReactionKind::Dislike);

    let err = ctx.sync().submit(post, ReactionKind::Like).await.unwrap_err();

    assert_eq!(err, SyncError::Conflict(post));
    let state = ctx.sync().store().get(post).unwrap();
    assert_eq!(state.viewer_reaction(), Some(ReactionKind::Dislike));
    assert_eq!(state.counts().get(ReactionKind::Dislike), 1);
}

#[tokio::test]
async fn test_write_answered_without_no_content_is_rejected() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[(ReactionKind::Smile, 1)]));
    ctx.sync().reseed(post).await.unwrap();
    backend.set_write_status(Some(StatusCode::OK));

    let err = ctx.sync().submit(post, ReactionKind::Like).await.unwrap_err();

    assert!(matches!(err, SyncError::Transport(_)));
    let state = ctx.sync().store().get(post).unwrap();
    assert_eq!(state.viewer_reaction(), None);
    assert_eq!(state.counts(), &counts(&[(ReactionKind::Smile, 1)]));
}

#[tokio::test]
async fn test_deleted_entity_is_evicted() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let comment = fresh_comment();
    backend.insert(comment, None, counts(&[]));
    ctx.sync().reseed(comment).await.unwrap();
    backend.remove(comment);
    let mut events = ctx.sync().subscribe();

    let err = ctx
        .dispatcher()
        .dispatch(comment, GestureTarget::QuickReact)
        .await
        .unwrap_err();

    assert_eq!(err, SyncError::NotFound(comment));
    assert!(!ctx.sync().store().contains(comment));
    assert!(matches!(
        events.recv().await.unwrap(),
        ReactionEvent::Notice { .. }
    ));
    assert_eq!(
        events.recv().await.unwrap(),
        ReactionEvent::Evicted { entity: comment }
    );
}

#[tokio::test]
async fn test_slow_backend_times_out_and_frees_entity() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend
        .client_with_cookies(integration_tests::PAGE_COOKIES, Duration::from_millis(150))
        .expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[]));
    ctx.sync().reseed(post).await.unwrap();
    let dispatcher = ctx.dispatcher();
    backend.set_delay(Some(Duration::from_secs(2)));

    let err = dispatcher
        .dispatch(post, GestureTarget::QuickReact)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Timeout(_)));
    assert!(err.is_retryable());
    assert!(!dispatcher.is_in_flight(post));
    assert_eq!(ctx.sync().store().get(post).unwrap().viewer_reaction(), None);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_two_gestures_make_one_request() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[]));
    ctx.sync().reseed(post).await.unwrap();
    let dispatcher = ctx.dispatcher();
    backend.set_delay(Some(Duration::from_millis(200)));

    let (first, second) = tokio::join!(
        dispatcher.dispatch(post, GestureTarget::QuickReact),
        async {
            wait_until(|| dispatcher.is_in_flight(post)).await;
            dispatcher
                .dispatch(post, GestureTarget::EmojiPanel(ReactionKind::Smile))
                .await
        }
    );

    assert!(matches!(first.unwrap(), GestureOutcome::Applied(_)));
    assert_eq!(second.unwrap(), GestureOutcome::Busy);
    assert_eq!(backend.reaction_writes().len(), 1);
    assert_eq!(
        ctx.sync().store().get(post).unwrap().viewer_reaction(),
        Some(ReactionKind::Like)
    );
}

// ============================================================================
// Content
// ============================================================================

#[tokio::test]
async fn test_edit_sends_trimmed_content_then_reseeds() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let post = fresh_post();
    backend.insert(post, None, counts(&[]));
    ctx.sync().reseed(post).await.unwrap();
    backend.react_elsewhere(post, ReactionKind::Heart);

    let view = ctx
        .content()
        .edit(post, "  updated text \n")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(backend.content_of(post).as_deref(), Some("updated text"));
    let requests = backend.requests();
    let edit = requests
        .iter()
        .find(|r| r.method == Method::PUT && r.path == "/post-comment/post")
        .expect("edit request");
    assert_eq!(
        edit.body,
        Some(json!({ "id": post.id.to_string(), "content": "updated text" }))
    );
    assert_eq!(edit.csrf_token.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(requests.last().map(|r| r.method.clone()), Some(Method::GET));
    assert_eq!(view.icon_for_viewer, Some(ReactionKind::Heart));
}

#[tokio::test]
async fn test_delete_removes_and_evicts() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.client().expect("Failed to build client");
    let comment = fresh_comment();
    backend.insert(comment, None, counts(&[(ReactionKind::Like, 4)]));
    ctx.sync().reseed(comment).await.unwrap();

    ctx.content().delete(comment).await.unwrap();

    assert!(backend.reactions_of(comment).is_none());
    assert!(!ctx.sync().store().contains(comment));
    let delete = backend.requests().pop().expect("delete request");
    assert_eq!(delete.method, Method::DELETE);
    assert_eq!(delete.path, "/post-comment/comment");
    assert_eq!(delete.body, Some(json!({ "id": comment.id.to_string() })));
}
