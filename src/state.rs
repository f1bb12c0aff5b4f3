use std::sync::Arc;
use sqlx::PgPool;
use crate::auth::AuthConfig;
use crate::external::quote_provider::QuoteProvider;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quote_provider: Arc<dyn QuoteProvider>,
    pub auth: AuthConfig,
}
