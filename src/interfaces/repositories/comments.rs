use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::comment::{Comment, ContentType, CreateComment};
use crate::middleware::error::AppResult;
use crate::middleware::utils::db_utils::Pagination;
use crate::models::view::comment::{CommentThreadView, CommentView};

#[async_trait]
pub trait CommentsRepositoryInterface {
    async fn create(&self, data: CreateComment) -> AppResult<CommentView>;
    async fn get_by_id(&self, comment: &Thing) -> AppResult<Comment>;
    async fn get_view_by_id(&self, comment: &Thing) -> AppResult<CommentView>;
    async fn list_top_level(
        &self,
        content_type: ContentType,
        content_slug: &str,
        pagination: Pagination,
    ) -> AppResult<(Vec<CommentThreadView>, i64)>;
    async fn list_by_author(
        &self,
        author: Thing,
        pagination: Pagination,
    ) -> AppResult<(Vec<CommentView>, i64)>;
    async fn list_flagged(&self, pagination: Pagination) -> AppResult<(Vec<CommentView>, i64)>;
    async fn update_text(&self, comment: Thing, text: String) -> AppResult<CommentView>;
    async fn set_flagged(&self, comment: Thing, reason: String) -> AppResult<()>;
    async fn set_approved(&self, comment: Thing, is_approved: bool) -> AppResult<()>;
    async fn clear_flag(&self, comment: Thing) -> AppResult<()>;
    async fn delete_with_replies(&self, comment: Thing) -> AppResult<()>;
}
