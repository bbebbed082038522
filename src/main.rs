use std::net::{Ipv4Addr, SocketAddr};

use tracing::info;
use tracing_subscriber::EnvFilter;

use community_server::config::AppConfig;
use community_server::database::client::{Database, DbConfig};
use community_server::init;
use community_server::middleware::error::AppResult;
use community_server::middleware::mw_ctx::create_ctx_state;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _sentry_guard = config.sentry_project_link.as_ref().map(|link| {
        sentry::init((
            link.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        username: config.db_username.as_deref(),
        password: config.db_password.as_deref(),
    })
    .await;

    init::run_migrations(&db).await?;
    db.run_migrations().await?;

    let ctx_state = create_ctx_state(db, &config);
    if ctx_state.is_development {
        info!("->> running in development mode");
    }
    init::create_default_users(&ctx_state).await;

    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    axum::serve(listener, routes_all.into_make_service())
        .await
        .unwrap();

    Ok(())
}
