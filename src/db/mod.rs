pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryCatalogStore;
pub use postgres::{create_pool, run_migrations, PgCatalogStore};
pub use store::CatalogStore;

#[cfg(test)]
pub use store::MockCatalogStore;
