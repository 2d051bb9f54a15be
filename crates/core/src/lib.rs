//! Core types and shared functionality for pagelens.
//!
//! This crate provides:
//! - Scrape request and result types
//! - Two-tier cache with SQLite durable backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{CacheDb, CacheManager, CachedPage, EphemeralStore, MemoryStore};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{PageSignals, ScrapeFailure, ScrapeRequest, ScrapeResult};
