use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use surrealdb::sql::Thing;

/// Kind of content item a comment is attached to. The comment system stores
/// the `(content_type, content_slug)` pair without checking that the target
/// exists; the content registries own those records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    StartupStory,
    Story,
    Project,
    TechNews,
    RoboticsNews,
    TalkEpisode,
    Hackathon,
}

impl ContentType {
    pub fn variants_sql_array() -> String {
        let quoted: Vec<String> = [
            ContentType::StartupStory,
            ContentType::Story,
            ContentType::Project,
            ContentType::TechNews,
            ContentType::RoboticsNews,
            ContentType::TalkEpisode,
            ContentType::Hackathon,
        ]
        .iter()
        .map(|v| format!("'{v}'"))
        .collect();
        format!("[{}]", quoted.join(","))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: Thing,
    pub created_by: Thing,
    pub content_type: ContentType,
    pub content_slug: String,
    pub text: String,
    pub parent: Option<Thing>,
    pub is_approved: bool,
    pub is_flagged: bool,
    pub flagged_reason: Option<String>,
    pub likes_nr: i64,
    pub dislikes_nr: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }
}

/// Insert payload; approval, flags, counters and timestamps come from the
/// table defaults.
#[derive(Debug, Serialize)]
pub struct CreateComment {
    pub created_by: Thing,
    pub content_type: ContentType,
    pub content_slug: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Thing>,
}
