use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::PortfolioValuation;
use crate::services::portfolio_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_portfolio))
}

async fn get_portfolio(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PortfolioValuation>, AppError> {
    info!("GET /api/portfolio - user {}", user_id);
    let valuation =
        portfolio_service::valuation(&state.pool, state.quote_provider.as_ref(), user_id).await?;
    Ok(Json(valuation))
}
