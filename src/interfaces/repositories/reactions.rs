use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::reaction::{ReactionKind, ReactionToggleOutcome};
use crate::middleware::error::AppResult;

#[async_trait]
pub trait ReactionsRepositoryInterface {
    async fn toggle(
        &self,
        user: Thing,
        comment: Thing,
        kind: ReactionKind,
    ) -> AppResult<ReactionToggleOutcome>;
}
