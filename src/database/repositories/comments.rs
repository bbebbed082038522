use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::database::repositories::reactions::TABLE_NAME as REACTION_TABLE_NAME;
use crate::entities::comment::{Comment, ContentType, CreateComment};
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE_NAME;
use crate::interfaces::repositories::comments::CommentsRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder, ViewFieldSelector};
use crate::models::view::comment::{CommentThreadView, CommentView};

pub const TABLE_NAME: &str = "comment";

#[derive(Debug)]
pub struct CommentsRepository {
    client: Db,
}

impl CommentsRepository {
    pub fn new(client: Db) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let content_types = ContentType::variants_sql_array();
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS created_by ON TABLE {TABLE_NAME} TYPE record<{USER_TABLE_NAME}>;
    DEFINE FIELD IF NOT EXISTS content_type ON TABLE {TABLE_NAME} TYPE string ASSERT $value INSIDE {content_types};
    DEFINE FIELD IF NOT EXISTS content_slug ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value)) > 0;
    DEFINE FIELD IF NOT EXISTS text ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value)) > 0;
    DEFINE FIELD IF NOT EXISTS parent ON TABLE {TABLE_NAME} TYPE option<record<{TABLE_NAME}>>;
    DEFINE FIELD IF NOT EXISTS is_approved ON TABLE {TABLE_NAME} TYPE bool DEFAULT true;
    DEFINE FIELD IF NOT EXISTS is_flagged ON TABLE {TABLE_NAME} TYPE bool DEFAULT false;
    DEFINE FIELD IF NOT EXISTS flagged_reason ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS likes_nr ON TABLE {TABLE_NAME} TYPE number DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS dislikes_nr ON TABLE {TABLE_NAME} TYPE number DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    DEFINE INDEX IF NOT EXISTS target_idx ON TABLE {TABLE_NAME} COLUMNS content_type, content_slug;
    DEFINE INDEX IF NOT EXISTS created_by_idx ON TABLE {TABLE_NAME} COLUMNS created_by;
    DEFINE INDEX IF NOT EXISTS parent_idx ON TABLE {TABLE_NAME} COLUMNS parent;
    ");
        let mutation = self.client.query(sql).await?;

        mutation.check().expect("should mutate CommentsRepository");

        Ok(())
    }
}

#[async_trait]
impl CommentsRepositoryInterface for CommentsRepository {
    async fn create(&self, data: CreateComment) -> AppResult<CommentView> {
        let record: Option<Comment> = self.client.create(TABLE_NAME).content(data).await?;
        let record = record.ok_or(AppError::Generic {
            description: "comment insert returned no record".to_string(),
        })?;
        self.get_view_by_id(&record.id).await
    }

    async fn get_by_id(&self, comment: &Thing) -> AppResult<Comment> {
        if comment.tb != TABLE_NAME {
            return Err(AppError::EntityFailIdNotFound {
                ident: comment.to_raw(),
            });
        }
        let record: Option<Comment> = self
            .client
            .select((TABLE_NAME, comment.id.to_raw()))
            .await?;
        record.ok_or(AppError::EntityFailIdNotFound {
            ident: comment.to_raw(),
        })
    }

    async fn get_view_by_id(&self, comment: &Thing) -> AppResult<CommentView> {
        let mut res = self
            .client
            .query(format!(
                "SELECT {} FROM $comment;",
                CommentView::get_select_query_fields()
            ))
            .bind(("comment", comment.clone()))
            .await?;
        let view = res.take::<Option<CommentView>>(0)?;
        view.ok_or(AppError::EntityFailIdNotFound {
            ident: comment.to_raw(),
        })
    }

    async fn list_top_level(
        &self,
        content_type: ContentType,
        content_slug: &str,
        pagination: Pagination,
    ) -> AppResult<(Vec<CommentThreadView>, i64)> {
        let fields = CommentThreadView::get_select_query_fields();
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC);
        let filter = "content_type = $content_type AND content_slug = $content_slug AND parent IS NONE AND is_approved = true";
        let mut res = self
            .client
            .query(format!(
                "SELECT {fields} FROM {TABLE_NAME} WHERE {filter} ORDER BY created_at {order_dir} LIMIT $limit START $start; \
                 RETURN count((SELECT id FROM {TABLE_NAME} WHERE {filter}));"
            ))
            .bind(("content_type", content_type.to_string()))
            .bind(("content_slug", content_slug.to_string()))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?;
        let items = res.take::<Vec<CommentThreadView>>(0)?;
        let total = res.take::<Option<i64>>(1)?.unwrap_or(0);
        Ok((items, total))
    }

    async fn list_by_author(
        &self,
        author: Thing,
        pagination: Pagination,
    ) -> AppResult<(Vec<CommentView>, i64)> {
        let fields = CommentView::get_select_query_fields();
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC);
        let mut res = self
            .client
            .query(format!(
                "SELECT {fields} FROM {TABLE_NAME} WHERE created_by = $author ORDER BY created_at {order_dir} LIMIT $limit START $start; \
                 RETURN count((SELECT id FROM {TABLE_NAME} WHERE created_by = $author));"
            ))
            .bind(("author", author))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?;
        let items = res.take::<Vec<CommentView>>(0)?;
        let total = res.take::<Option<i64>>(1)?.unwrap_or(0);
        Ok((items, total))
    }

    async fn list_flagged(&self, pagination: Pagination) -> AppResult<(Vec<CommentView>, i64)> {
        let fields = CommentView::get_select_query_fields();
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC);
        let mut res = self
            .client
            .query(format!(
                "SELECT {fields} FROM {TABLE_NAME} WHERE is_flagged = true ORDER BY created_at {order_dir} LIMIT $limit START $start; \
                 RETURN count((SELECT id FROM {TABLE_NAME} WHERE is_flagged = true));"
            ))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?;
        let items = res.take::<Vec<CommentView>>(0)?;
        let total = res.take::<Option<i64>>(1)?.unwrap_or(0);
        Ok((items, total))
    }

    async fn update_text(&self, comment: Thing, text: String) -> AppResult<CommentView> {
        let mut res = self
            .client
            .query(format!(
                "UPDATE $comment SET text = $text; SELECT {} FROM $comment;",
                CommentView::get_select_query_fields()
            ))
            .bind(("comment", comment.clone()))
            .bind(("text", text))
            .await?;
        let view = res.take::<Option<CommentView>>(1)?;
        view.ok_or(AppError::EntityFailIdNotFound {
            ident: comment.to_raw(),
        })
    }

    async fn set_flagged(&self, comment: Thing, reason: String) -> AppResult<()> {
        let res = self
            .client
            .query("UPDATE $comment SET is_flagged = true, flagged_reason = $reason;")
            .bind(("comment", comment))
            .bind(("reason", reason))
            .await?;
        res.check()?;
        Ok(())
    }

    async fn set_approved(&self, comment: Thing, is_approved: bool) -> AppResult<()> {
        let res = self
            .client
            .query("UPDATE $comment SET is_approved = $is_approved;")
            .bind(("comment", comment))
            .bind(("is_approved", is_approved))
            .await?;
        res.check()?;
        Ok(())
    }

    async fn clear_flag(&self, comment: Thing) -> AppResult<()> {
        let res = self
            .client
            .query("UPDATE $comment SET is_flagged = false, flagged_reason = NONE;")
            .bind(("comment", comment))
            .await?;
        res.check()?;
        Ok(())
    }

    async fn delete_with_replies(&self, comment: Thing) -> AppResult<()> {
        // replies and every reaction on the thread go with the parent,
        // in one transaction
        let res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                 LET $replies = (SELECT VALUE id FROM {TABLE_NAME} WHERE parent = $comment); \
                 DELETE {REACTION_TABLE_NAME} WHERE out = $comment OR out IN $replies; \
                 DELETE {TABLE_NAME} WHERE parent = $comment; \
                 DELETE $comment; \
                 COMMIT TRANSACTION;"
            ))
            .bind(("comment", comment))
            .await?;
        res.check()?;
        Ok(())
    }
}
