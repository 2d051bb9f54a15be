//! Cache-related MCP tools.
//!
//! This module provides tools for reading and exporting the durable store.

pub mod export;
pub mod get;

pub use export::{CacheExportParams, export_impl};
pub use get::{CacheGetParams, get_impl};
