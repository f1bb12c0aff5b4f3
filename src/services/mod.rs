pub(crate) mod account_service;
pub(crate) mod order_service;
pub(crate) mod portfolio_service;
pub(crate) mod quote_service;
