use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{OrderReceipt, OrderRequest, Side};
use crate::services::order_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buy", post(buy))
        .route("/sell", post(sell))
}

async fn buy(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<OrderRequest>,
) -> Result<Json<OrderReceipt>, AppError> {
    info!("POST /api/orders/buy - user {}", user_id);
    let receipt = order_service::place_order(
        &state.pool,
        state.quote_provider.as_ref(),
        user_id,
        Side::Buy,
        input,
    )
    .await?;
    Ok(Json(receipt))
}

async fn sell(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<OrderRequest>,
) -> Result<Json<OrderReceipt>, AppError> {
    info!("POST /api/orders/sell - user {}", user_id);
    let receipt = order_service::place_order(
        &state.pool,
        state.quote_provider.as_ref(),
        user_id,
        Side::Sell,
        input,
    )
    .await?;
    Ok(Json(receipt))
}
