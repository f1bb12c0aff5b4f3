use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{mint_token, AuthUser};
use crate::errors::AppError;
use crate::models::{ChangePasswordRequest, LoginRequest, RegisterRequest, User};
use crate::services::account_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/change-password", post(change_password))
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user_id: Uuid,
    username: String,
    cash_cents: i64,
}

impl AuthResponse {
    fn for_user(user: User, token: String) -> Self {
        Self {
            token,
            user_id: user.id,
            username: user.username,
            cash_cents: user.cash_cents,
        }
    }
}

// Registration logs the new user in, same as a successful login.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /api/auth/register - Registering user");
    let user = account_service::register(&state.pool, input).await?;
    let token = mint_token(user.id, &state.auth)?;
    Ok(Json(AuthResponse::for_user(user, token)))
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /api/auth/login - Authenticating user");
    let user = account_service::authenticate(&state.pool, input).await?;
    let token = mint_token(user.id, &state.auth)?;
    Ok(Json(AuthResponse::for_user(user, token)))
}

async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    info!("POST /api/auth/change-password - user {}", user_id);
    account_service::change_password(&state.pool, user_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}
