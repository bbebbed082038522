use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::{CtxState, JWT_KEY};
use crate::services::auth_service::{AuthRegisterInput, AuthService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/api/register", post(register))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    pub token: String,
}

async fn register(
    State(ctx_state): State<Arc<CtxState>>,
    cookies: Cookies,
    ctx: Ctx,
    Json(input): Json<AuthRegisterInput>,
) -> CtxResult<(StatusCode, Json<RegisterResponse>)> {
    let auth_service = AuthService::new(&ctx_state.db.client, &ctx, &ctx_state.jwt);
    let (token, user) = auth_service.register_password(input).await?;

    cookies.add(Cookie::new(JWT_KEY, token.clone()));

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id.expect("registered user has id").to_raw(),
            username: user.username,
            token,
        }),
    ))
}
