use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth;
use crate::db;
use crate::errors::AppError;
use crate::models::{ChangePasswordRequest, LoginRequest, RegisterRequest, User};

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn register(pool: &PgPool, input: RegisterRequest) -> Result<User, AppError> {
    let username = present(&input.username)
        .ok_or_else(|| AppError::Validation("missing username".into()))?;
    let password = input
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("missing password".into()))?;
    let confirmation = input
        .confirmation
        .as_deref()
        .ok_or_else(|| AppError::Validation("passwords don't match".into()))?;
    if password != confirmation {
        return Err(AppError::Validation("passwords don't match".into()));
    }

    let password_hash = auth::hash_password(password)?;
    let user = User::new(username.to_string(), password_hash);

    match db::user_queries::insert(pool, &user).await {
        Ok(()) => {
            info!("Registered user {} ({})", user.username, user.id);
            Ok(user)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Validation("username already exists".into()))
        }
        Err(e) => {
            error!("Failed to insert user {}: {}", username, e);
            Err(AppError::Db(e))
        }
    }
}

/// Credential failures are indistinguishable on purpose: absent user and
/// wrong password both return the same reason.
pub async fn authenticate(pool: &PgPool, input: LoginRequest) -> Result<User, AppError> {
    let username =
        present(&input.username).ok_or_else(|| AppError::Auth("must provide username".into()))?;
    let password = input
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Auth("must provide password".into()))?;

    let user = db::user_queries::find_by_username(pool, username).await?;

    match user {
        Some(user) if auth::verify_password(&user.password_hash, password) => Ok(user),
        _ => Err(AppError::Auth("invalid username and/or password".into())),
    }
}

pub async fn change_password(
    pool: &PgPool,
    user_id: Uuid,
    input: ChangePasswordRequest,
) -> Result<(), AppError> {
    let old_password = input
        .old_password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Auth("must provide old password".into()))?;
    let new_password = input
        .new_password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Auth("must provide new password".into()))?;
    let confirmation = input
        .confirmation
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Auth("must provide confirmation".into()))?;

    let user = db::user_queries::fetch_one(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    if !auth::verify_password(&user.password_hash, old_password) {
        return Err(AppError::Auth("invalid old password".into()));
    }
    if new_password != confirmation {
        return Err(AppError::Auth(
            "confirmation does not match the new password".into(),
        ));
    }

    let new_hash = auth::hash_password(new_password)?;
    let updated = db::user_queries::update_password_hash(pool, user_id, &new_hash).await?;
    if updated == 0 {
        return Err(AppError::NotFound("user not found".into()));
    }
    info!("Password changed for user {}", user_id);
    Ok(())
}
