use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    database::client::Db,
    entities::user_auth::{
        authentication_entity::{AuthType, AuthenticationDbService, CreateAuthInput},
        local_user_entity::{LocalUser, LocalUserDbService},
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
    },
    utils::{
        hash::{hash_password, verify_password},
        jwt::JWT,
        validate_utils::validate_username,
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthRegisterInput {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
    #[validate(email)]
    pub email: Option<String>,
    pub bio: Option<String>,
    pub full_name: Option<String>,
    pub image_uri: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthLoginInput {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
}

pub struct AuthService<'a> {
    ctx: &'a Ctx,
    jwt: &'a JWT,
    user_repository: LocalUserDbService<'a>,
    auth_repository: AuthenticationDbService<'a>,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx, jwt: &'a JWT) -> AuthService<'a> {
        AuthService {
            ctx,
            jwt,
            user_repository: LocalUserDbService { db, ctx },
            auth_repository: AuthenticationDbService { db, ctx },
        }
    }

    pub async fn login_password(&self, input: AuthLoginInput) -> CtxResult<(String, LocalUser)> {
        input.validate()?;

        let user = self.user_repository.get_by_username(&input.username).await?;

        let auth = self
            .auth_repository
            .get_by_auth_type(user.id.clone().expect("stored user has id"), AuthType::PASSWORD)
            .await?
            .ok_or(AppError::Generic {
                description: "Password not found".to_string(),
            })?;

        if !verify_password(&auth.token, &input.password) {
            return Err(AppError::Generic {
                description: "Password is not correct".to_string(),
            }
            .into());
        }

        let token = self.build_jwt_token(&user.id.as_ref().unwrap().to_raw())?;
        Ok((token, user))
    }

    pub async fn register_password(
        &self,
        input: AuthRegisterInput,
    ) -> CtxResult<(String, LocalUser)> {
        input.validate()?;

        if self
            .user_repository
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: "The username is already used".to_string(),
            }));
        }

        let user = LocalUser {
            id: None,
            username: input.username,
            full_name: input.full_name,
            email_verified: input.email,
            bio: input.bio,
            image_uri: input.image_uri,
            is_moderator: false,
        };

        let hash = hash_password(&input.password).expect("Hash password error");

        let user = self.user_repository.create(user).await?;
        self.auth_repository
            .create(CreateAuthInput {
                local_user: user.id.clone().expect("created user has id"),
                token: hash,
                auth_type: AuthType::PASSWORD,
            })
            .await?;

        let token = self.build_jwt_token(&user.id.as_ref().unwrap().to_raw())?;
        Ok((token, user))
    }

    fn build_jwt_token(&self, user_id: &str) -> CtxResult<String> {
        self.jwt.encode(user_id).map_err(|e| {
            self.ctx
                .to_ctx_error(AppError::AuthFailJwtInvalid { source: e })
        })
    }
}
