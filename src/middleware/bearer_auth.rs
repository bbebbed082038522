use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::middleware::{
    ctx::Ctx,
    mw_ctx::{CtxState, JWT_KEY},
};

/// Authenticated request identity. Accepts a `Bearer` header or the login
/// cookie; missing or invalid credentials reject with 401.
#[derive(Debug)]
pub struct BearerAuth {
    pub user_id: String,
    pub ctx: Ctx,
}

impl BearerAuth {
    pub fn user_thing_id(&self) -> String {
        match self.user_id.find(":") {
            None => self.user_id.clone(),
            Some(ind) => (&self.user_id[ind + 1..]).to_string(),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for BearerAuth {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let token = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(bearer) => Some(bearer.token().to_string()),
            None => CookieJar::from_headers(&parts.headers)
                .get(JWT_KEY)
                .map(|cookie| cookie.value().to_string()),
        };

        match token {
            Some(token) => match app_state.jwt.decode(&token) {
                Ok(claims) => Ok(BearerAuth {
                    user_id: claims.auth.clone(),
                    ctx: Ctx::new(Ok(claims.auth)),
                }),
                Err(_) => Err(StatusCode::UNAUTHORIZED),
            },
            None => Err(StatusCode::UNAUTHORIZED),
        }
    }
}
