//! User registration and profile update operations.

use encuesta_core::types::{Date, DbId};
use encuesta_core::validation;
use encuesta_db::models::user::{CreateUser, UpdateUser, User};
use encuesta_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::EngineResult;
use crate::{today, Engine, EngineError};

/// Input for [`Engine::create_user`]. The registration date defaults to
/// the current date when unset.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub registered_on: Option<Date>,
}

impl Engine {
    /// Register a user: default the registration date, validate every
    /// field, then persist. Nothing is written when validation fails.
    pub async fn create_user(&self, input: NewUser) -> EngineResult<User> {
        let registered_on = input.registered_on.unwrap_or_else(today);
        validation::validate_new_user(&input.username, &input.email, &input.password)?;

        let user = UserRepo::create(
            &self.pool,
            &CreateUser {
                username: input.username,
                email: input.email,
                password: input.password,
                registered_on,
            },
        )
        .await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Update a user's profile. Each provided field is re-validated before
    /// the patch is applied; absent fields keep their stored value.
    pub async fn update_user(&self, id: DbId, input: UpdateUser) -> EngineResult<User> {
        if let Some(email) = &input.email {
            validation::validate_email(email)?;
        }
        if let Some(username) = &input.username {
            validation::validate_username(username)?;
        }
        if let Some(password) = &input.password {
            validation::validate_password(password)?;
        }

        UserRepo::update(&self.pool, id, &input)
            .await?
            .ok_or(EngineError::NotFound { entity: "user", id })
    }
}
