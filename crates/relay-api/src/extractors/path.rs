//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use relay_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with peer_id
#[derive(Debug, serde::Deserialize)]
pub struct PeerIdPath {
    pub peer_id: String,
}

impl PeerIdPath {
    /// Parse peer_id as Snowflake
    pub fn peer_id(&self) -> Result<Snowflake, ApiError> {
        self.peer_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid peer_id format"))
    }
}
