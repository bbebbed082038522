use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
};
use axum::{http::StatusCode, Router};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::database::client::Database;
use crate::entities::user_auth::authentication_entity::AuthenticationDbService;
use crate::entities::user_auth::local_user_entity::LocalUserDbService;
use crate::middleware::{ctx::Ctx, error::AppResult, mw_ctx::CtxState};
use crate::routes::{comments, reactions, user_auth::login_routes, user_auth::register_routes};
use crate::services::auth_service::{AuthRegisterInput, AuthService};

pub const STARTER_USERNAME: &str = "community_starter";
pub const MODERATOR_USERNAME: &str = "community_mod";

pub async fn run_migrations(db: &Database) -> AppResult<()> {
    let c = Ctx::new(Ok("migrations".to_string()));

    LocalUserDbService {
        db: &db.client,
        ctx: &c,
    }
    .mutate_db()
    .await?;
    AuthenticationDbService {
        db: &db.client,
        ctx: &c,
    }
    .mutate_db()
    .await?;
    Ok(())
}

pub async fn create_default_users(ctx_state: &Arc<CtxState>) {
    let c = Ctx::new(Ok("create_default_users".to_string()));

    let auth_service = AuthService::new(&ctx_state.db.client, &c, &ctx_state.jwt);

    let _ = auth_service
        .register_password(AuthRegisterInput {
            username: STARTER_USERNAME.to_string(),
            password: ctx_state.start_password.clone(),
            email: None,
            bio: None,
            full_name: None,
            image_uri: None,
        })
        .await;

    let moderator = auth_service
        .register_password(AuthRegisterInput {
            username: MODERATOR_USERNAME.to_string(),
            password: ctx_state.start_password.clone(),
            email: None,
            bio: None,
            full_name: None,
            image_uri: None,
        })
        .await;

    if let Ok((_, user)) = moderator {
        let users = LocalUserDbService {
            db: &ctx_state.db.client,
            ctx: &c,
        };
        let set = users
            .set_moderator(user.id.as_ref().expect("registered user has id"), true)
            .await;
        if set.is_ok() {
            info!("->> seeded moderator account {MODERATOR_USERNAME}");
        }
    }
}

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(register_routes::routes())
        .merge(login_routes::routes())
        .merge(comments::routes())
        .merge(reactions::routes())
        .with_state(ctx_state.clone())
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
