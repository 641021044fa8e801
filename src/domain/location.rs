//! Location samples and the batches they are delivered in

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Altitude in meters, signed
    #[serde(rename = "altitude")]
    pub altitude_meters: f64,

    /// Instant the position was recorded
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    /// Creates a new location sample
    pub fn new(
        latitude: f64,
        longitude: f64,
        altitude_meters: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude_meters,
            timestamp,
        }
    }
}

/// One delivery from a segment's location subscription
///
/// Batches for a segment arrive in timestamp order; the last one is flagged final.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationBatch {
    /// Samples in this delivery (may be empty)
    pub samples: Vec<LocationSample>,

    /// Whether this is the segment's last delivery
    pub is_final: bool,
}

impl LocationBatch {
    /// A batch that more deliveries will follow
    pub fn partial(samples: Vec<LocationSample>) -> Self {
        Self {
            samples,
            is_final: false,
        }
    }

    /// The segment's last batch
    pub fn last(samples: Vec<LocationSample>) -> Self {
        Self {
            samples,
            is_final: true,
        }
    }

    /// Number of samples in the batch
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the batch carries no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
