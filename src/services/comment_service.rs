use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    database::client::Db,
    entities::{
        comment::{Comment, ContentType, CreateComment},
        reaction::{ReactionKind, ReactionToggleOutcome},
        user_auth::local_user_entity::LocalUserDbService,
    },
    interfaces::repositories::{
        comments::CommentsRepositoryInterface, reactions::ReactionsRepositoryInterface,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
        utils::{db_utils::Pagination, string_utils::get_str_thing},
    },
    models::view::comment::{CommentThreadView, CommentView},
    utils::validate_utils::{trim_string, validate_comment_text},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateCommentInput {
    pub content_type: ContentType,
    #[validate(length(min = 1, message = "content_slug is required"))]
    pub content_slug: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_comment_text))]
    pub text: String,
    pub parent: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateCommentInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_comment_text))]
    pub text: String,
}

pub struct CommentService<'a, C, R>
where
    C: CommentsRepositoryInterface,
    R: ReactionsRepositoryInterface,
{
    users_repository: LocalUserDbService<'a>,
    comments_repository: &'a C,
    reactions_repository: &'a R,
    ctx: &'a Ctx,
}

impl<'a, C, R> CommentService<'a, C, R>
where
    C: CommentsRepositoryInterface,
    R: ReactionsRepositoryInterface,
{
    pub fn new(db: &'a Db, ctx: &'a Ctx, comments_repository: &'a C, reactions_repository: &'a R) -> Self {
        Self {
            users_repository: LocalUserDbService { db, ctx },
            comments_repository,
            reactions_repository,
            ctx,
        }
    }

    pub async fn list(
        &self,
        content_type: ContentType,
        content_slug: &str,
        pagination: Pagination,
    ) -> CtxResult<(Vec<CommentThreadView>, i64)> {
        let res = self
            .comments_repository
            .list_top_level(content_type, content_slug, pagination)
            .await?;
        Ok(res)
    }

    pub async fn create(&self, data: CreateCommentInput) -> CtxResult<CommentView> {
        data.validate()?;

        let author = self.users_repository.get_ctx_user_thing().await?;

        let parent = match data.parent.as_deref() {
            Some(parent_id) => {
                let parent_thing = get_str_thing(parent_id)?;
                let parent = self.comments_repository.get_by_id(&parent_thing).await?;
                if parent.content_type != data.content_type
                    || parent.content_slug != data.content_slug
                {
                    return Err(self.ctx.to_ctx_error(AppError::Generic {
                        description: "Parent comment belongs to a different target".to_string(),
                    }));
                }
                if parent.is_reply() {
                    return Err(self.ctx.to_ctx_error(AppError::Generic {
                        description: "Replies cannot be nested deeper than one level".to_string(),
                    }));
                }
                Some(parent.id)
            }
            None => None,
        };

        let view = self
            .comments_repository
            .create(CreateComment {
                created_by: author,
                content_type: data.content_type,
                content_slug: data.content_slug,
                text: data.text,
                parent,
            })
            .await?;
        Ok(view)
    }

    pub async fn update(&self, comment_id: &str, data: UpdateCommentInput) -> CtxResult<CommentView> {
        data.validate()?;

        let actor = self.users_repository.get_ctx_user_thing().await?;
        let comment = self.get_required(comment_id).await?;

        if comment.created_by != actor {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        let view = self
            .comments_repository
            .update_text(comment.id, data.text)
            .await?;
        Ok(view)
    }

    pub async fn delete(&self, comment_id: &str) -> CtxResult<()> {
        let actor = self.users_repository.get_ctx_user().await?;
        let comment = self.get_required(comment_id).await?;

        let is_owner = comment.created_by == *actor.id.as_ref().expect("stored user has id");
        if !is_owner && !actor.can_moderate() {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        self.comments_repository
            .delete_with_replies(comment.id)
            .await?;
        Ok(())
    }

    pub async fn toggle_reaction(
        &self,
        comment_id: &str,
        kind: ReactionKind,
    ) -> CtxResult<ReactionToggleOutcome> {
        let actor = self.users_repository.get_ctx_user_thing().await?;
        let comment = self.get_required(comment_id).await?;

        let outcome = self
            .reactions_repository
            .toggle(actor, comment.id, kind)
            .await?;
        Ok(outcome)
    }

    pub async fn list_by_author(
        &self,
        pagination: Pagination,
    ) -> CtxResult<(Vec<CommentView>, i64)> {
        let actor = self.users_repository.get_ctx_user_thing().await?;
        let res = self
            .comments_repository
            .list_by_author(actor, pagination)
            .await?;
        Ok(res)
    }

    async fn get_required(&self, comment_id: &str) -> CtxResult<Comment> {
        let comment_thing = get_str_thing(comment_id)?;
        let comment = self.comments_repository.get_by_id(&comment_thing).await?;
        Ok(comment)
    }
}
