mod helpers;

use community_server::models::view::comment::CommentThreadView;
use community_server::routes::comments::CommentListResponse;
use serde_json::json;

use crate::helpers::comment_helpers::{create_comment, create_fake_comment, list_comments};
use crate::helpers::create_fake_login_test_user;
use crate::helpers::user_helpers::login_as_moderator;

test_with_server!(create_and_list_comment, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = create_comment(
        server,
        &user.token,
        "tech_news",
        "release-roundup",
        "Great read!",
        None,
    )
    .await;
    response.assert_status_success();
    let comment = response.json::<community_server::models::view::comment::CommentView>();
    assert_eq!(comment.text, "Great read!");
    assert_eq!(comment.likes_count, 0);
    assert_eq!(comment.dislikes_count, 0);
    assert!(comment.is_approved);
    assert!(!comment.is_flagged);

    let listing = list_comments(server, "tech_news", "release-roundup").await;
    listing.assert_status_success();
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.results.len(), 1);
    assert_eq!(listing.results[0].text, "Great read!");
    assert_eq!(listing.results[0].replies_nr, 0);
    assert!(listing.results[0].replies.is_empty());
});

test_with_server!(list_unknown_target_is_empty, |server, ctx_state, config| {
    let listing = list_comments(&server, "story", "nobody-commented-here").await;
    listing.assert_status_success();
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.count, 0);
    assert!(listing.results.is_empty());
});

test_with_server!(create_comment_requires_auth, |server, ctx_state, config| {
    let response = server
        .post("/api/comments")
        .json(&json!({
            "content_type": "tech_news",
            "content_slug": "release-roundup",
            "text": "anonymous drive-by",
        }))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_unauthorized();
});

test_with_server!(create_comment_empty_text_fails, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = create_comment(server, &user.token, "tech_news", "release-roundup", "   ", None).await;
    response.assert_status_bad_request();
});

test_with_server!(reply_is_nested_under_parent, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let parent = create_fake_comment(server, &user.token, "story", "founding-story", None).await;

    let (server, other) = create_fake_login_test_user(&server).await;
    let reply = create_comment(
        server,
        &other.token,
        "story",
        "founding-story",
        "Replying to you",
        Some(parent.id.to_raw()),
    )
    .await;
    reply.assert_status_success();

    let listing = list_comments(server, "story", "founding-story").await;
    listing.assert_status_success();
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    // replies stay nested, only the top level is counted
    assert_eq!(listing.count, 1);
    assert_eq!(listing.results.len(), 1);
    assert_eq!(listing.results[0].replies_nr, 1);
    assert_eq!(listing.results[0].replies.len(), 1);
    assert_eq!(listing.results[0].replies[0].text, "Replying to you");
});

test_with_server!(reply_to_reply_is_rejected, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let parent = create_fake_comment(server, &user.token, "story", "founding-story", None).await;
    let reply = create_fake_comment(
        server,
        &user.token,
        "story",
        "founding-story",
        Some(parent.id.to_raw()),
    )
    .await;

    let nested = create_comment(
        server,
        &user.token,
        "story",
        "founding-story",
        "going deeper",
        Some(reply.id.to_raw()),
    )
    .await;
    nested.assert_status_bad_request();
});

test_with_server!(reply_cross_target_is_rejected, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let parent = create_fake_comment(server, &user.token, "story", "founding-story", None).await;

    let response = create_comment(
        server,
        &user.token,
        "tech_news",
        "release-roundup",
        "wrong thread entirely",
        Some(parent.id.to_raw()),
    )
    .await;
    response.assert_status_bad_request();
});

test_with_server!(reply_missing_parent_not_found, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = create_comment(
        server,
        &user.token,
        "story",
        "founding-story",
        "replying into the void",
        Some("comment:doesnotexist".to_string()),
    )
    .await;
    response.assert_status_not_found();
});

test_with_server!(update_own_comment, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let comment = create_fake_comment(server, &user.token, "hackathon", "spring-edition", None).await;

    let response = server
        .put(format!("/api/comments/{}", comment.id.to_raw()).as_str())
        .json(&json!({ "text": "edited text" }))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_success();
    let updated = response.json::<community_server::models::view::comment::CommentView>();
    assert_eq!(updated.text, "edited text");
});

test_with_server!(update_other_users_comment_forbidden, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let comment = create_fake_comment(server, &owner.token, "hackathon", "spring-edition", None).await;
    let original_text = comment.text.clone();

    let (server, intruder) = create_fake_login_test_user(&server).await;
    let response = server
        .put(format!("/api/comments/{}", comment.id.to_raw()).as_str())
        .json(&json!({ "text": "hijacked" }))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_forbidden();

    let listing = list_comments(server, "hackathon", "spring-edition").await;
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.results[0].text, original_text);
});

test_with_server!(moderator_cannot_edit_others_comment, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let comment = create_fake_comment(server, &owner.token, "hackathon", "spring-edition", None).await;

    let moderator_token = login_as_moderator(server, &config).await;
    let response = server
        .put(format!("/api/comments/{}", comment.id.to_raw()).as_str())
        .json(&json!({ "text": "moderated text" }))
        .add_header("Authorization", format!("Bearer {}", moderator_token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_forbidden();
});

test_with_server!(delete_own_comment, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let comment = create_fake_comment(server, &user.token, "project", "robot-arm", None).await;

    let response = server
        .delete(format!("/api/comments/{}", comment.id.to_raw()).as_str())
        .add_header("Authorization", format!("Bearer {}", user.token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_success();

    let listing = list_comments(server, "project", "robot-arm").await;
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.count, 0);
});

test_with_server!(delete_other_users_comment_forbidden, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let comment = create_fake_comment(server, &owner.token, "project", "robot-arm", None).await;

    let (server, intruder) = create_fake_login_test_user(&server).await;
    let response = server
        .delete(format!("/api/comments/{}", comment.id.to_raw()).as_str())
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_forbidden();

    let listing = list_comments(server, "project", "robot-arm").await;
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.count, 1);
});

test_with_server!(moderator_can_delete_any_comment, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let comment = create_fake_comment(server, &owner.token, "project", "robot-arm", None).await;

    let moderator_token = login_as_moderator(server, &config).await;
    let response = server
        .delete(format!("/api/comments/{}", comment.id.to_raw()).as_str())
        .add_header("Authorization", format!("Bearer {}", moderator_token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_success();

    let listing = list_comments(server, "project", "robot-arm").await;
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.count, 0);
});

test_with_server!(delete_cascades_to_replies, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let parent = create_fake_comment(server, &user.token, "talk_episode", "episode-12", None).await;
    for _ in 0..2 {
        create_fake_comment(
            server,
            &user.token,
            "talk_episode",
            "episode-12",
            Some(parent.id.to_raw()),
        )
        .await;
    }

    let response = server
        .delete(format!("/api/comments/{}", parent.id.to_raw()).as_str())
        .add_header("Authorization", format!("Bearer {}", user.token))
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_success();

    let listing = list_comments(server, "talk_episode", "episode-12").await;
    let listing = listing.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(listing.count, 0);

    // the reply rows are gone too, not just unlisted
    let mut res = ctx_state
        .db
        .client
        .query("RETURN count((SELECT id FROM comment WHERE content_slug = 'episode-12'));")
        .await
        .unwrap();
    let remaining = res.take::<Option<i64>>(0).unwrap().unwrap_or(0);
    assert_eq!(remaining, 0);
});

test_with_server!(listing_is_newest_first_and_paginated, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    create_comment(server, &user.token, "robotics_news", "gripper-update", "first", None)
        .await
        .assert_status_success();
    create_comment(server, &user.token, "robotics_news", "gripper-update", "second", None)
        .await
        .assert_status_success();
    create_comment(server, &user.token, "robotics_news", "gripper-update", "third", None)
        .await
        .assert_status_success();

    let page = server
        .get("/api/comments?content_type=robotics_news&content_slug=gripper-update&limit=2&offset=0")
        .add_header("Accept", "application/json")
        .await;
    page.assert_status_success();
    let page = page.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(page.count, 3);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].text, "third");
    assert_eq!(page.results[1].text, "second");

    let page = server
        .get("/api/comments?content_type=robotics_news&content_slug=gripper-update&limit=2&offset=2")
        .add_header("Accept", "application/json")
        .await;
    let page = page.json::<CommentListResponse<CommentThreadView>>();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].text, "first");
});

test_with_server!(own_comments_feed, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    create_fake_comment(server, &user.token, "tech_news", "release-roundup", None).await;
    create_fake_comment(server, &user.token, "story", "founding-story", None).await;

    let (server, other) = create_fake_login_test_user(&server).await;
    create_fake_comment(server, &other.token, "tech_news", "release-roundup", None).await;

    let feed = server
        .get("/api/comments/user")
        .add_header("Authorization", format!("Bearer {}", user.token))
        .add_header("Accept", "application/json")
        .await;
    feed.assert_status_success();
    let feed = feed.json::<CommentListResponse<community_server::models::view::comment::CommentView>>();
    assert_eq!(feed.count, 2);
    assert!(feed
        .results
        .iter()
        .all(|comment| comment.created_by.username == user.username));
});
