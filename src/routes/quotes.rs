use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::Quote;
use crate::services::quote_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_quote))
}

#[derive(Debug, Deserialize)]
struct QuoteParams {
    symbol: Option<String>,
}

async fn get_quote(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<QuoteParams>,
) -> Result<Json<Quote>, AppError> {
    info!("GET /api/quotes - user {}", user_id);
    let symbol = params.symbol.unwrap_or_default();
    let quote = quote_service::lookup(state.quote_provider.as_ref(), &symbol).await?;
    Ok(Json(quote))
}
