//! Product catalog service.
//!
//! Products are owned by the catalog and read-only for the rest of the
//! system. Lookups come in three shapes: by single id, by id set (bounded
//! batch), and paginated listing/search.

mod error;
mod memory;
mod model;
mod postgres;
mod service;
mod store;

pub use error::{CatalogError, Result};
pub use memory::InMemoryProductStore;
pub use model::Product;
pub use postgres::PgProductStore;
pub use service::{CatalogService, MAX_BATCH_SIZE};
pub use store::ProductStore;
