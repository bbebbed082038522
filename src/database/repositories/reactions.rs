use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::database::repositories::comments::TABLE_NAME as COMMENT_TABLE_NAME;
use crate::entities::reaction::{ReactionKind, ReactionToggleOutcome};
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE_NAME;
use crate::interfaces::repositories::reactions::ReactionsRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};

pub const TABLE_NAME: &str = "reaction";

#[derive(Debug)]
pub struct ReactionsRepository {
    client: Db,
}

impl ReactionsRepository {
    pub fn new(client: Db) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("

    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} TYPE RELATION IN {USER_TABLE_NAME} OUT {COMMENT_TABLE_NAME} ENFORCED SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS in_out_unique_idx ON {TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS kind ON TABLE {TABLE_NAME} TYPE string ASSERT $value INSIDE ['like','dislike'];
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now();

    ");
        let mutation = self.client.query(sql).await?;

        mutation.check().expect("should mutate ReactionsRepository");

        Ok(())
    }
}

#[async_trait]
impl ReactionsRepositoryInterface for ReactionsRepository {
    async fn toggle(
        &self,
        user: Thing,
        comment: Thing,
        kind: ReactionKind,
    ) -> AppResult<ReactionToggleOutcome> {
        // The whole toggle runs as one transaction: resolve the existing
        // (user, comment) row, mutate it, then recount both counters from
        // the reaction rows. Counters are never incremented in place.
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                 LET $existing = (SELECT id, kind FROM {TABLE_NAME} WHERE in = $user AND out = $comment)[0]; \
                 LET $action = IF $existing = NONE {{ 'added' }} ELSE IF $existing.kind = $kind {{ 'removed' }} ELSE {{ 'updated' }}; \
                 IF $action = 'added' {{ RELATE $user->{TABLE_NAME}->$comment SET kind = $kind }} \
                 ELSE IF $action = 'removed' {{ DELETE $existing.id }} \
                 ELSE {{ UPDATE $existing.id SET kind = $kind }}; \
                 LET $likes = count((SELECT id FROM {TABLE_NAME} WHERE out = $comment AND kind = 'like')); \
                 LET $dislikes = count((SELECT id FROM {TABLE_NAME} WHERE out = $comment AND kind = 'dislike')); \
                 UPDATE $comment SET likes_nr = $likes, dislikes_nr = $dislikes; \
                 COMMIT TRANSACTION; \
                 RETURN {{ action: $action, likes_count: $likes, dislikes_count: $dislikes }};"
            ))
            .bind(("user", user))
            .bind(("comment", comment))
            .bind(("kind", kind.to_string()))
            .await?;

        let outcome =
            res.take::<Option<ReactionToggleOutcome>>(res.num_statements() - 1)?;
        outcome.ok_or(AppError::Generic {
            description: "reaction toggle returned no outcome".to_string(),
        })
    }
}
