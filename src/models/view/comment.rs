use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::entities::comment::ContentType;
use crate::middleware::utils::db_utils::ViewFieldSelector;
use crate::models::view::user::UserView;

/// Flat comment projection, used for create/update responses, the author
/// feed and the flagged queue.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Thing,
    pub created_by: UserView,
    pub content_type: ContentType,
    pub content_slug: String,
    pub text: String,
    pub parent: Option<Thing>,
    pub is_approved: bool,
    pub is_flagged: bool,
    pub flagged_reason: Option<String>,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewFieldSelector for CommentView {
    fn get_select_query_fields() -> String {
        "id, content_type, content_slug, text, parent, is_approved, is_flagged, flagged_reason, \
         likes_nr AS likes_count, dislikes_nr AS dislikes_count, created_at, updated_at, \
         created_by.* AS created_by"
            .to_string()
    }
}

/// Top-level comment with its most recent approved replies (oldest-first)
/// and the total approved reply count.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentThreadView {
    pub id: Thing,
    pub created_by: UserView,
    pub content_type: ContentType,
    pub content_slug: String,
    pub text: String,
    pub parent: Option<Thing>,
    pub is_approved: bool,
    pub is_flagged: bool,
    pub flagged_reason: Option<String>,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub replies: Vec<CommentView>,
    pub replies_nr: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const REPLIES_PREVIEW_LIMIT: u8 = 10;

impl ViewFieldSelector for CommentThreadView {
    fn get_select_query_fields() -> String {
        let flat = CommentView::get_select_query_fields();
        format!(
            "{flat}, \
             array::reverse((SELECT {flat} FROM comment WHERE parent = $parent.id AND is_approved = true ORDER BY created_at DESC LIMIT {REPLIES_PREVIEW_LIMIT})) AS replies, \
             count((SELECT id FROM comment WHERE parent = $parent.id AND is_approved = true)) AS replies_nr"
        )
    }
}
