use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id: Thing,
    pub username: String,
    pub full_name: Option<String>,
    pub image_uri: Option<String>,
}
