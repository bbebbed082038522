use axum_test::{TestResponse, TestServer};
use community_server::models::view::comment::CommentView;
use fake::{faker, Fake};
use serde_json::json;

#[allow(dead_code)]
pub async fn create_comment(
    server: &TestServer,
    token: &str,
    content_type: &str,
    content_slug: &str,
    text: &str,
    parent: Option<String>,
) -> TestResponse {
    let mut body = json!({
        "content_type": content_type,
        "content_slug": content_slug,
        "text": text,
    });
    if let Some(parent) = parent {
        body["parent"] = json!(parent);
    }

    server
        .post("/api/comments")
        .json(&body)
        .add_header("Authorization", format!("Bearer {}", token))
        .add_header("Accept", "application/json")
        .await
}

#[allow(dead_code)]
pub async fn create_fake_comment(
    server: &TestServer,
    token: &str,
    content_type: &str,
    content_slug: &str,
    parent: Option<String>,
) -> CommentView {
    let text: String = faker::lorem::en::Sentence(5..12).fake();
    let response = create_comment(server, token, content_type, content_slug, &text, parent).await;
    response.assert_status_success();
    response.json::<CommentView>()
}

#[allow(dead_code)]
pub async fn list_comments(
    server: &TestServer,
    content_type: &str,
    content_slug: &str,
) -> TestResponse {
    server
        .get(
            format!("/api/comments?content_type={content_type}&content_slug={content_slug}")
                .as_str(),
        )
        .add_header("Accept", "application/json")
        .await
}

#[allow(dead_code)]
pub async fn toggle_reaction(
    server: &TestServer,
    token: &str,
    comment_id: &str,
    reaction: &str,
) -> TestResponse {
    server
        .post("/api/comments/reactions")
        .json(&json!({
            "comment_id": comment_id,
            "reaction": reaction,
        }))
        .add_header("Authorization", format!("Bearer {}", token))
        .add_header("Accept", "application/json")
        .await
}

#[allow(dead_code)]
pub async fn flag_comment(
    server: &TestServer,
    token: &str,
    comment_id: &str,
    reason: Option<&str>,
) -> TestResponse {
    let body = match reason {
        Some(reason) => json!({ "reason": reason }),
        None => json!({}),
    };

    server
        .post(format!("/api/comments/{comment_id}/flag").as_str())
        .json(&body)
        .add_header("Authorization", format!("Bearer {}", token))
        .add_header("Accept", "application/json")
        .await
}

#[allow(dead_code)]
pub async fn moderate_comment(
    server: &TestServer,
    token: &str,
    comment_id: &str,
    action: &str,
) -> TestResponse {
    server
        .post(format!("/api/comments/{comment_id}/moderate").as_str())
        .json(&json!({ "action": action }))
        .add_header("Authorization", format!("Bearer {}", token))
        .add_header("Accept", "application/json")
        .await
}
