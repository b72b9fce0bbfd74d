//! The review that triggers an alert.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A newly received customer review, as produced by review ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub review_id: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub reviewer_name: String,
    pub review_text: String,
    pub store_name: String,
    pub received_at: Timestamp,
}
