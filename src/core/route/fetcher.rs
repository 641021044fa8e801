//! Route fetching: fan-out over route segments, fan-in to one ordered track
//!
//! Each segment is drained on its own tokio task into a local buffer. The
//! only shared state is an arrival counter: every delivered sample is stamped
//! with its position in the overall arrival order. The buffers are merged at
//! the join point and sorted once by timestamp, then arrival.

use crate::adapters::store::{HealthStore, LocationBatchStream};
use crate::domain::{LocationSample, Result, RouteSegmentId, StoreError, Workout};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Fetches the complete, time-ordered route of a workout
///
/// # Example
///
/// ```no_run
/// use gpxport::adapters::archive::ArchiveStore;
/// use gpxport::adapters::store::{HealthStore, WorkoutFilter};
/// use gpxport::core::route::RouteFetcher;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// # async fn example() -> gpxport::domain::Result<()> {
/// let store = Arc::new(ArchiveStore::new("health-archive.json", 500));
/// let fetcher = RouteFetcher::new(store.clone());
///
/// for workout in store.list_workouts(&WorkoutFilter::default()).await? {
///     let route = fetcher.fetch_route(&workout).await?;
///     println!("{}: {} points", workout.id, route.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RouteFetcher {
    store: Arc<dyn HealthStore>,
}

impl RouteFetcher {
    /// Create a fetcher reading from the given store
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    /// Fetch every location of the workout's route, sorted by timestamp
    ///
    /// A workout without route segments resolves to an empty route. Samples
    /// with equal timestamps keep the order in which they were delivered,
    /// across segments as well as within one, and samples duplicated across
    /// segments are all kept.
    ///
    /// # Errors
    ///
    /// Returns the segment listing error, or the first error reported by any
    /// segment's subscription. Segment tasks still running at that point are
    /// detached, not cancelled; their results are discarded.
    pub async fn fetch_route(&self, workout: &Workout) -> Result<Vec<LocationSample>> {
        let started = Instant::now();
        let segments = self.store.list_route_segments(workout).await?;

        if segments.is_empty() {
            tracing::debug!(workout_id = %workout.id, "Workout has no route segments");
            return Ok(Vec::new());
        }

        let segment_count = segments.len();
        tracing::debug!(
            workout_id = %workout.id,
            segments = segment_count,
            "Fetching route segments"
        );

        let arrivals = Arc::new(AtomicU64::new(0));
        let mut pending: FuturesUnordered<_> = segments
            .into_iter()
            .map(|segment| {
                let batches = self.store.subscribe_location_batches(&segment);
                let segment_id = segment.id;
                let handle: JoinHandle<Result<Vec<Arrival>>> = tokio::spawn(drain_segment(
                    segment_id.clone(),
                    batches,
                    Arc::clone(&arrivals),
                ));
                handle.map(move |joined| {
                    joined.unwrap_or_else(|e| {
                        Err(StoreError::location(
                            segment_id.as_str(),
                            format!("segment task failed: {e}"),
                        )
                        .into())
                    })
                })
            })
            .collect();

        let mut arrived: Vec<Arrival> = Vec::new();
        let mut completed = 0;
        while let Some(outcome) = pending.next().await {
            match outcome {
                Ok(samples) => {
                    completed += 1;
                    arrived.extend(samples);
                }
                Err(e) => {
                    // Returning here detaches the rest, so the failed segment
                    // is never counted and this cannot underflow.
                    let still_running = segment_count - completed - 1;
                    tracing::warn!(
                        workout_id = %workout.id,
                        completed,
                        still_running,
                        error = %e,
                        "Route segment failed"
                    );
                    return Err(e);
                }
            }
        }

        arrived.sort_unstable_by_key(|arrival| (arrival.sample.timestamp, arrival.seq));
        let route: Vec<LocationSample> = arrived.into_iter().map(|a| a.sample).collect();

        tracing::debug!(
            workout_id = %workout.id,
            segments = segment_count,
            points = route.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Fetched route"
        );
        Ok(route)
    }

    /// Fetch on a background task and hand the outcome to `on_complete`
    ///
    /// `on_complete` runs exactly once, on the spawned task.
    pub fn spawn_fetch<F>(&self, workout: Workout, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<LocationSample>>) + Send + 'static,
    {
        let fetcher = self.clone();
        tokio::spawn(async move {
            let outcome = fetcher.fetch_route(&workout).await;
            on_complete(outcome);
        })
    }
}

/// A delivered sample and its position in the fetch-wide arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
struct Arrival {
    seq: u64,
    sample: LocationSample,
}

/// Collect one segment's batches until the final one
///
/// Each batch reserves a contiguous run of arrival numbers from `arrivals`
/// when it is delivered.
async fn drain_segment(
    segment: RouteSegmentId,
    mut batches: LocationBatchStream,
    arrivals: Arc<AtomicU64>,
) -> Result<Vec<Arrival>> {
    let mut buffer = Vec::new();
    let mut deliveries = 0usize;

    while let Some(batch) = batches.next().await {
        let batch = batch?;
        deliveries += 1;
        let first = arrivals.fetch_add(batch.samples.len() as u64, Ordering::SeqCst);
        buffer.extend(
            batch
                .samples
                .into_iter()
                .zip(first..)
                .map(|(sample, seq)| Arrival { seq, sample }),
        );

        if batch.is_final {
            tracing::trace!(
                segment = %segment,
                deliveries,
                points = buffer.len(),
                "Route segment complete"
            );
            return Ok(buffer);
        }
    }

    Err(StoreError::location(segment.as_str(), "subscription ended before the final batch").into())
}
