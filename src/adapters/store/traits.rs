//! Health data store trait definition
//!
//! This module defines the `HealthStore` trait that abstracts the external
//! data store the exporter reads from. Workouts, their route segments and the
//! location batches of each segment are all obtained through it.

use crate::domain::{ActivityType, LocationBatch, Result, RouteSegment, Workout, WorkoutId};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy sequence of location batches for one route segment
///
/// Each item is one delivery. An `Err` item is the error the subscription
/// reported; the stream should not be polled further after it.
pub type LocationBatchStream = BoxStream<'static, Result<LocationBatch>>;

/// Which workouts a listing returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutFilter {
    /// Activity types to include
    pub activity_types: Vec<ActivityType>,
}

impl WorkoutFilter {
    /// Filter matching only the given activity types
    pub fn new(activity_types: Vec<ActivityType>) -> Self {
        Self { activity_types }
    }

    /// Whether a workout passes the filter
    pub fn matches(&self, workout: &Workout) -> bool {
        self.activity_types.contains(&workout.activity_type)
    }
}

impl Default for WorkoutFilter {
    fn default() -> Self {
        Self::new(vec![
            ActivityType::Walking,
            ActivityType::Running,
            ActivityType::Cycling,
            ActivityType::Swimming,
        ])
    }
}

/// Trait for health data store implementations
///
/// # Example
///
/// ```no_run
/// use gpxport::adapters::store::{HealthStore, WorkoutFilter};
/// use futures::StreamExt;
///
/// # async fn example(store: &dyn HealthStore) -> gpxport::domain::Result<()> {
/// store.authorize().await?;
///
/// let workouts = store.list_workouts(&WorkoutFilter::default()).await?;
/// if let Some(workout) = workouts.first() {
///     for segment in store.list_route_segments(workout).await? {
///         let mut batches = store.subscribe_location_batches(&segment);
///         while let Some(batch) = batches.next().await {
///             let batch = batch?;
///             println!("{} samples (final: {})", batch.len(), batch.is_final);
///             if batch.is_final {
///                 break;
///             }
///         }
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Request read access to workouts and routes
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataUnavailable` if the store cannot be reached in this
    /// session and `StoreError::AuthorizationDenied` if read access is refused.
    async fn authorize(&self) -> Result<()>;

    /// List workouts matching the filter, most recently ended first
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WorkoutQueryFailed` if the query fails.
    async fn list_workouts(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>>;

    /// Look up a single workout by identifier
    ///
    /// The default implementation scans an unfiltered listing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WorkoutNotFound` if no workout has this identifier.
    async fn workout(&self, id: &WorkoutId) -> Result<Workout> {
        let everything = WorkoutFilter::new(vec![
            ActivityType::Walking,
            ActivityType::Running,
            ActivityType::Cycling,
            ActivityType::Swimming,
            ActivityType::Other,
        ]);
        self.list_workouts(&everything)
            .await?
            .into_iter()
            .find(|w| &w.id == id)
            .ok_or_else(|| crate::domain::StoreError::WorkoutNotFound(id.to_string()).into())
    }

    /// List the route segments recorded for a workout, oldest first
    ///
    /// A workout without a recorded route yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SegmentQueryFailed` if the query fails.
    async fn list_route_segments(&self, workout: &Workout) -> Result<Vec<RouteSegment>>;

    /// Start paging through a segment's locations
    ///
    /// Batches may be produced on an independent task per subscription, so
    /// subscriptions for different segments progress concurrently.
    fn subscribe_location_batches(&self, segment: &RouteSegment) -> LocationBatchStream;
}
