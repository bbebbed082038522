use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::middleware::error::AppError::EntityFailIdNotFound;
use crate::middleware::utils::string_utils::get_string_thing;
use crate::middleware::{
    ctx::Ctx,
    error::{AppError, CtxError, CtxResult},
};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct LocalUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub is_moderator: bool,
}

impl LocalUser {
    /// Moderation is a capability, not a role lookup; call sites never read
    /// the flag directly.
    pub fn can_moderate(&self) -> bool {
        self.is_moderator
    }
}

pub struct LocalUserDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "local_user";

impl<'a> LocalUserDbService<'a> {
    pub fn get_table_name() -> &'static str {
        TABLE_NAME
    }

    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS username ON TABLE {TABLE_NAME} TYPE string VALUE string::lowercase($value);
    DEFINE FIELD IF NOT EXISTS full_name ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS email_verified ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS bio ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS image_uri ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS is_moderator ON TABLE {TABLE_NAME} TYPE bool DEFAULT false;
    DEFINE INDEX IF NOT EXISTS local_user_username_idx ON TABLE {TABLE_NAME} COLUMNS username UNIQUE;
    ");
        let mutation = self.db.query(sql).await?;
        mutation.check().expect("should mutate local_user");

        Ok(())
    }

    pub async fn get_ctx_user(&self) -> CtxResult<LocalUser> {
        let created_by = self.ctx.user_id()?;
        let user_id = get_string_thing(created_by.clone())?;
        self.get_by_id_thing(&user_id).await
    }

    pub async fn get_ctx_user_thing(&self) -> CtxResult<Thing> {
        let user = self.get_ctx_user().await?;
        Ok(user.id.expect("stored user has id"))
    }

    pub async fn get_by_id_thing(&self, user_id: &Thing) -> CtxResult<LocalUser> {
        if user_id.tb != TABLE_NAME {
            return Err(self.ctx.to_ctx_error(EntityFailIdNotFound {
                ident: user_id.to_raw(),
            }));
        }
        let res: Option<LocalUser> = self
            .db
            .select((TABLE_NAME, user_id.id.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        res.ok_or(self.ctx.to_ctx_error(EntityFailIdNotFound {
            ident: user_id.to_raw(),
        }))
    }

    pub async fn get_by_username(&self, username: &str) -> CtxResult<LocalUser> {
        let res = self.find_by_username(username).await?;
        res.ok_or(self.ctx.to_ctx_error(EntityFailIdNotFound {
            ident: username.to_string(),
        }))
    }

    pub async fn find_by_username(&self, username: &str) -> CtxResult<Option<LocalUser>> {
        let mut res = self
            .db
            .query(format!(
                "SELECT * FROM {TABLE_NAME} WHERE username = $username;"
            ))
            .bind(("username", username.to_lowercase()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(res
            .take::<Option<LocalUser>>(0)
            .map_err(CtxError::from(self.ctx))?)
    }

    pub async fn create(&self, ct_input: LocalUser) -> CtxResult<LocalUser> {
        let created: Option<LocalUser> = self
            .db
            .create(TABLE_NAME)
            .content(ct_input)
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(created.expect("created local_user record"))
    }

    pub async fn set_moderator(&self, user_id: &Thing, is_moderator: bool) -> CtxResult<()> {
        let res = self
            .db
            .query("UPDATE $user SET is_moderator = $is_moderator;")
            .bind(("user", user_id.clone()))
            .bind(("is_moderator", is_moderator))
            .await
            .map_err(CtxError::from(self.ctx))?;
        res.check().map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
