use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    database::client::Db,
    entities::user_auth::local_user_entity::LocalUserDbService,
    interfaces::repositories::comments::CommentsRepositoryInterface,
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
        utils::{db_utils::Pagination, string_utils::get_str_thing},
    },
    models::view::comment::CommentView,
};

pub const DEFAULT_FLAG_REASON: &str = "Inappropriate content";

/// Moderator resolution of a flagged comment. Hiding flips visibility off
/// without deleting; clearing drops the flag and keeps the comment visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Hide,
    Restore,
    ClearFlag,
}

pub struct ModerationService<'a, C>
where
    C: CommentsRepositoryInterface,
{
    users_repository: LocalUserDbService<'a>,
    comments_repository: &'a C,
    ctx: &'a Ctx,
}

impl<'a, C> ModerationService<'a, C>
where
    C: CommentsRepositoryInterface,
{
    pub fn new(db: &'a Db, ctx: &'a Ctx, comments_repository: &'a C) -> Self {
        Self {
            users_repository: LocalUserDbService { db, ctx },
            comments_repository,
            ctx,
        }
    }

    /// Flagging marks the comment for review but never hides it; only a
    /// moderator action changes visibility.
    pub async fn flag(&self, comment_id: &str, reason: Option<String>) -> CtxResult<String> {
        let actor = self.users_repository.get_ctx_user().await?;
        let comment_thing = get_str_thing(comment_id)?;
        let comment = self.comments_repository.get_by_id(&comment_thing).await?;

        let is_own = comment.created_by == *actor.id.as_ref().expect("stored user has id");
        if is_own && !actor.can_moderate() {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: "You cannot flag your own comment".to_string(),
            }));
        }

        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_FLAG_REASON.to_string());

        self.comments_repository
            .set_flagged(comment.id, reason.clone())
            .await?;
        Ok(reason)
    }

    pub async fn list_flagged(
        &self,
        pagination: Pagination,
    ) -> CtxResult<(Vec<CommentView>, i64)> {
        let actor = self.users_repository.get_ctx_user().await?;
        if !actor.can_moderate() {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        let res = self.comments_repository.list_flagged(pagination).await?;
        Ok(res)
    }

    pub async fn moderate(&self, comment_id: &str, action: ModerationAction) -> CtxResult<()> {
        let actor = self.users_repository.get_ctx_user().await?;
        if !actor.can_moderate() {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        let comment_thing = get_str_thing(comment_id)?;
        let comment = self.comments_repository.get_by_id(&comment_thing).await?;

        match action {
            ModerationAction::Hide => {
                self.comments_repository
                    .set_approved(comment.id, false)
                    .await?
            }
            ModerationAction::Restore => {
                self.comments_repository
                    .set_approved(comment.id, true)
                    .await?
            }
            ModerationAction::ClearFlag => {
                self.comments_repository.clear_flag(comment.id).await?
            }
        }
        Ok(())
    }
}
