//! Two-tier result cache.
//!
//! - Ephemeral tier: TTL key-value store holding every terminal result
//! - Durable tier: SQLite table with one row per successfully enriched page
//! - CSV export of the durable tier
//!
//! The durable tier uses tokio-rusqlite in WAL mode.

pub mod codec;
pub mod connection;
pub mod ephemeral;
pub mod export;
pub mod manager;
pub mod pages;
pub mod schema;

pub use crate::Error;

pub use connection::CacheDb;
pub use ephemeral::{EphemeralStore, MemoryStore};
pub use manager::CacheManager;
pub use pages::CachedPage;
