//! Store implementations.
//!
//! # Stores
//!
//! - [`InMemoryUrlStore`] - Process-local reference implementation
//! - [`PgUrlStore`] - PostgreSQL implementation with constraint-backed uniqueness

pub mod memory_url_store;
pub mod pg_url_store;

pub use memory_url_store::InMemoryUrlStore;
pub use pg_url_store::PgUrlStore;
