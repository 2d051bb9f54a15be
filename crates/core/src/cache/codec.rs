//! Ephemeral value encoding.
//!
//! Values are JSON documents decoded into `ScrapeResult` by serde; a value
//! that does not match either result shape is rejected, never interpreted.

use crate::Error;
use crate::model::ScrapeResult;

pub fn encode(result: &ScrapeResult) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(result)?)
}

pub fn decode(bytes: &[u8]) -> Result<ScrapeResult, Error> {
    Ok(serde_json::from_slice(bytes)?)
}
