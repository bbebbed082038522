use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::comment::ContentType;
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::Pagination;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::comment::{CommentThreadView, CommentView};
use crate::services::comment_service::{CommentService, CreateCommentInput, UpdateCommentInput};
use crate::services::moderation_service::{ModerationAction, ModerationService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/comments", get(list_comments).post(create_comment))
        .route("/api/comments/user", get(user_comments))
        .route("/api/comments/admin/flagged", get(flagged_comments))
        .route(
            "/api/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        )
        .route("/api/comments/:comment_id/flag", post(flag_comment))
        .route("/api/comments/:comment_id/moderate", post(moderate_comment))
}

#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    pub content_type: ContentType,
    pub content_slug: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentListResponse<T> {
    pub results: Vec<T>,
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlagCommentInput {
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlagCommentResponse {
    pub message: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModerateCommentInput {
    pub action: ModerationAction,
}

async fn list_comments(
    State(ctx_state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ListCommentsQuery>,
) -> CtxResult<Json<CommentListResponse<CommentThreadView>>> {
    let pagination = Pagination::new(query.limit, query.offset);
    let (limit, offset) = (pagination.count, pagination.start);

    let service = CommentService::new(
        &ctx_state.db.client,
        &ctx,
        &ctx_state.db.comments,
        &ctx_state.db.reactions,
    );
    let (results, count) = service
        .list(query.content_type, &query.content_slug, pagination)
        .await?;

    Ok(Json(CommentListResponse {
        results,
        count,
        limit,
        offset,
    }))
}

async fn create_comment(
    auth: BearerAuth,
    State(ctx_state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<CreateCommentInput>,
) -> CtxResult<(StatusCode, Json<CommentView>)> {
    let service = CommentService::new(
        &ctx_state.db.client,
        &auth.ctx,
        &ctx_state.db.comments,
        &ctx_state.db.reactions,
    );
    let view = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_comment(
    auth: BearerAuth,
    Path(comment_id): Path<String>,
    State(ctx_state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<UpdateCommentInput>,
) -> CtxResult<Json<CommentView>> {
    let service = CommentService::new(
        &ctx_state.db.client,
        &auth.ctx,
        &ctx_state.db.comments,
        &ctx_state.db.reactions,
    );
    let view = service.update(&comment_id, input).await?;
    Ok(Json(view))
}

async fn delete_comment(
    auth: BearerAuth,
    Path(comment_id): Path<String>,
    State(ctx_state): State<Arc<CtxState>>,
) -> CtxResult<Json<MessageResponse>> {
    let service = CommentService::new(
        &ctx_state.db.client,
        &auth.ctx,
        &ctx_state.db.comments,
        &ctx_state.db.reactions,
    );
    service.delete(&comment_id).await?;
    Ok(Json(MessageResponse {
        message: "Comment deleted successfully".to_string(),
    }))
}

async fn flag_comment(
    auth: BearerAuth,
    Path(comment_id): Path<String>,
    State(ctx_state): State<Arc<CtxState>>,
    Json(input): Json<FlagCommentInput>,
) -> CtxResult<Json<FlagCommentResponse>> {
    let service = ModerationService::new(&ctx_state.db.client, &auth.ctx, &ctx_state.db.comments);
    let reason = service.flag(&comment_id, input.reason).await?;
    Ok(Json(FlagCommentResponse {
        message: "Comment flagged for review".to_string(),
        reason,
    }))
}

async fn moderate_comment(
    auth: BearerAuth,
    Path(comment_id): Path<String>,
    State(ctx_state): State<Arc<CtxState>>,
    Json(input): Json<ModerateCommentInput>,
) -> CtxResult<Json<MessageResponse>> {
    let service = ModerationService::new(&ctx_state.db.client, &auth.ctx, &ctx_state.db.comments);
    service.moderate(&comment_id, input.action).await?;
    Ok(Json(MessageResponse {
        message: format!("Applied {} to comment", input.action),
    }))
}

async fn user_comments(
    auth: BearerAuth,
    State(ctx_state): State<Arc<CtxState>>,
    Query(query): Query<PaginationQuery>,
) -> CtxResult<Json<CommentListResponse<CommentView>>> {
    let pagination = Pagination::new(query.limit, query.offset);
    let (limit, offset) = (pagination.count, pagination.start);

    let service = CommentService::new(
        &ctx_state.db.client,
        &auth.ctx,
        &ctx_state.db.comments,
        &ctx_state.db.reactions,
    );
    let (results, count) = service.list_by_author(pagination).await?;

    Ok(Json(CommentListResponse {
        results,
        count,
        limit,
        offset,
    }))
}

async fn flagged_comments(
    auth: BearerAuth,
    State(ctx_state): State<Arc<CtxState>>,
    Query(query): Query<PaginationQuery>,
) -> CtxResult<Json<CommentListResponse<CommentView>>> {
    let pagination = Pagination::new(query.limit, query.offset);
    let (limit, offset) = (pagination.count, pagination.start);

    let service = ModerationService::new(&ctx_state.db.client, &auth.ctx, &ctx_state.db.comments);
    let (results, count) = service.list_flagged(pagination).await?;

    Ok(Json(CommentListResponse {
        results,
        count,
        limit,
        offset,
    }))
}
