use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::comments::CommentsRepository;
use crate::database::repositories::reactions::ReactionsRepository;
use crate::middleware::error::AppError;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug)]
pub struct Database {
    pub client: Db,
    pub comments: CommentsRepository,
    pub reactions: ReactionsRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> Self {
        info!("->> connecting DB config = {:?}", config);
        let conn = connect(config.url)
            .await
            .expect("Failed to connect to SurrealDB");

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password })
                .await
                .expect("Failed to sign in to SurrealDB");
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await
            .expect("Failed to select namespace and database");

        let version = conn
            .version()
            .await
            .expect("Failed to get SurrealDB version");

        info!("->> connected DB version: {version}");
        Self {
            comments: CommentsRepository::new(conn.clone()),
            reactions: ReactionsRepository::new(conn.clone()),
            client: conn,
        }
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        self.comments.mutate_db().await?;
        self.reactions.mutate_db().await?;
        Ok(())
    }
}
