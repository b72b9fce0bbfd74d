//! In-process review queue backed by a bounded `tokio::sync::mpsc` channel.
//!
//! [`ReviewBus`] carries [`ReviewReceived`] envelopes from ingestion to the
//! alert router. Every review is delivered exactly once, in order. When the
//! queue is full, [`ReviewBus::publish`] waits for the router to catch up
//! instead of dropping anything.

use revalert_core::review::ReviewEvent;
use revalert_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// ReviewReceived
// ---------------------------------------------------------------------------

/// A new review for a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReceived {
    /// Store whose settings and SMS quota apply.
    pub store_id: DbId,
    pub review: ReviewEvent,
}

// ---------------------------------------------------------------------------
// ReviewBus
// ---------------------------------------------------------------------------

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Receiving half of the queue, consumed by the alert router.
pub type ReviewStream = mpsc::Receiver<ReviewReceived>;

/// The router has stopped; the review was not queued.
#[derive(Debug, thiserror::Error)]
#[error("Review bus closed, review {review_id} for store {store_id} not queued")]
pub struct BusClosed {
    pub store_id: DbId,
    pub review_id: String,
}

/// Publishing half of the review queue. Cheap to clone.
///
/// # Usage
///
/// ```rust
/// use revalert_events::bus::ReviewBus;
///
/// let (bus, stream) = ReviewBus::new(16);
/// ```
#[derive(Debug, Clone)]
pub struct ReviewBus {
    sender: mpsc::Sender<ReviewReceived>,
}

impl ReviewBus {
    /// Create a queue holding at most `capacity` pending reviews.
    ///
    /// Dropping every `ReviewBus` clone closes the stream once the queued
    /// reviews have been received.
    pub fn new(capacity: usize) -> (Self, ReviewStream) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Queue a review, waiting while the queue is full.
    pub async fn publish(&self, event: ReviewReceived) -> Result<(), BusClosed> {
        self.sender.send(event).await.map_err(|mpsc::error::SendError(event)| BusClosed {
            store_id: event.store_id,
            review_id: event.review.review_id,
        })
    }

    /// Reviews that can still be queued without waiting.
    pub fn available(&self) -> usize {
        self.sender.capacity()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
