//! Shared types used across the marketplace services.
//!
//! Identifiers are opaque strings wrapped in newtypes so an account id can
//! never be passed where a product id is expected. Monetary amounts are
//! integer cents.

mod ids;
mod money;

pub use ids::{AccountId, OrderId, ProductId};
pub use money::Money;
