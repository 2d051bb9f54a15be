//! Durable table bootstrap.
//!
//! The schema is a single idempotent batch; records are never migrated.

use crate::Error;
use tokio_rusqlite::Connection;

const SCHEMA: &str = include_str!("../../sql/cache.sql");

/// Create the `cache` table if it does not exist yet.
pub async fn ensure(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| conn.execute_batch(SCHEMA))
        .await
        .map_err(|e| Error::SchemaFailed(e.to_string()))
}
