use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::{CtxState, JWT_KEY};
use crate::services::auth_service::{AuthLoginInput, AuthService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", get(logout))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub token: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub image_uri: Option<String>,
}

async fn login(
    State(ctx_state): State<Arc<CtxState>>,
    cookies: Cookies,
    ctx: Ctx,
    Json(input): Json<AuthLoginInput>,
) -> CtxResult<Json<LoginResponse>> {
    let auth_service = AuthService::new(&ctx_state.db.client, &ctx, &ctx_state.jwt);
    let (token, user) = auth_service.login_password(input).await?;

    cookies.add(Cookie::new(JWT_KEY, token.clone()));

    Ok(Json(LoginResponse {
        id: user.id.expect("stored user has id").to_raw(),
        username: user.username,
        token,
        full_name: user.full_name,
        bio: user.bio,
        image_uri: user.image_uri,
    }))
}

async fn logout(cookies: Cookies) -> CtxResult<Json<serde_json::Value>> {
    cookies.remove(Cookie::new(JWT_KEY, ""));
    Ok(Json(serde_json::json!({ "success": true })))
}
