use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::utils::jwt::JWT;

pub struct CtxState {
    pub db: Database,
    pub start_password: String,
    pub is_development: bool,
    pub jwt: JWT,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CtxState")
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        start_password: config.init_server_password.clone(),
        is_development: config.is_development,
        jwt: JWT::new(config.jwt_secret.clone(), Duration::days(7)),
    };
    Arc::new(ctx_state)
}

pub const JWT_KEY: &str = "jwt";
