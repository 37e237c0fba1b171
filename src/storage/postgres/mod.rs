//! PostgreSQL durable store.

mod toggle_store;

pub use toggle_store::PostgresToggleStore;
