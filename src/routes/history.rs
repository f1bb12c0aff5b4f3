use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::db::transaction_queries;
use crate::errors::AppError;
use crate::models::Transaction;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_history))
}

async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Transaction>>, AppError> {
    info!("GET /api/history - user {}", user_id);
    let transactions = transaction_queries::fetch_history(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch history for user {}: {}", user_id, e);
            AppError::Db(e)
        })?;
    Ok(Json(transactions))
}
