mod holding;
mod quote;
mod transaction;
mod user;

pub use holding::{Holding, HoldingValuation, PortfolioValuation, QuoteStatus};
pub use quote::Quote;
pub use transaction::{OrderReceipt, OrderRequest, Side, Transaction};
pub use user::{ChangePasswordRequest, LoginRequest, RegisterRequest, User, INITIAL_CASH_CENTS};
