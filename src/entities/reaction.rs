use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    Added,
    Removed,
    Updated,
}

/// Result of a reaction toggle: what happened plus the freshly recounted
/// totals on the comment.
#[derive(Debug, Deserialize)]
pub struct ReactionToggleOutcome {
    pub action: ToggleAction,
    pub likes_count: i64,
    pub dislikes_count: i64,
}
