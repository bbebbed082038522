use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::reaction::{ReactionKind, ToggleAction};
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::services::comment_service::CommentService;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/api/comments/reactions", post(toggle_reaction))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleReactionInput {
    pub comment_id: String,
    pub reaction: ReactionKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReactionResponse {
    pub action: ToggleAction,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub user_reaction: Option<ReactionKind>,
}

async fn toggle_reaction(
    auth: BearerAuth,
    State(ctx_state): State<Arc<CtxState>>,
    Json(input): Json<ToggleReactionInput>,
) -> CtxResult<Json<ReactionResponse>> {
    let service = CommentService::new(
        &ctx_state.db.client,
        &auth.ctx,
        &ctx_state.db.comments,
        &ctx_state.db.reactions,
    );
    let outcome = service
        .toggle_reaction(&input.comment_id, input.reaction)
        .await?;

    let user_reaction = match outcome.action {
        ToggleAction::Removed => None,
        _ => Some(input.reaction),
    };

    Ok(Json(ReactionResponse {
        action: outcome.action,
        likes_count: outcome.likes_count,
        dislikes_count: outcome.dislikes_count,
        user_reaction,
    }))
}
