//! File-backed health store
//!
//! Reads a JSON health archive once and serves workouts, route segments and
//! paged location batches from it.

use super::models::HealthArchive;
use crate::adapters::store::{HealthStore, LocationBatchStream, WorkoutFilter};
use crate::domain::{
    GpxportError, LocationBatch, LocationSample, Result, RouteSegment, RouteSegmentId,
    StoreError, Workout, WorkoutId,
};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Archive contents indexed for lookups
#[derive(Debug)]
struct LoadedArchive {
    /// Workouts in archive order, each with its segments
    workouts: Vec<(Workout, Vec<RouteSegment>)>,

    /// Locations per segment
    segments: HashMap<RouteSegmentId, Arc<[LocationSample]>>,
}

impl LoadedArchive {
    fn index(archive: HealthArchive) -> Result<Self> {
        let mut workouts = Vec::with_capacity(archive.workouts.len());
        let mut segments = HashMap::new();

        for archived in archive.workouts {
            let workout = archived.to_workout()?;
            let mut routes = Vec::with_capacity(archived.routes.len());
            for route in archived.routes {
                routes.push(route.to_segment());
                if segments
                    .insert(route.id.clone(), Arc::from(route.locations))
                    .is_some()
                {
                    return Err(GpxportError::Validation(format!(
                        "Duplicate route segment ID in archive: {}",
                        route.id
                    )));
                }
            }
            // Stable sort: undated segments lead, in archive order
            routes.sort_by_key(|s| s.start_date);
            workouts.push((workout, routes));
        }

        Ok(Self { workouts, segments })
    }
}

struct ArchiveInner {
    path: PathBuf,
    batch_size: usize,
    loaded: OnceCell<LoadedArchive>,
}

impl ArchiveInner {
    async fn load(&self) -> Result<&LoadedArchive> {
        self.loaded
            .get_or_try_init(|| async {
                let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
                    let message = format!("{}: {e}", self.path.display());
                    match e.kind() {
                        ErrorKind::PermissionDenied => StoreError::AuthorizationDenied(message),
                        _ => StoreError::DataUnavailable(message),
                    }
                })?;
                let archive: HealthArchive = serde_json::from_slice(&bytes)?;
                let loaded = LoadedArchive::index(archive)?;

                tracing::info!(
                    path = %self.path.display(),
                    workouts = loaded.workouts.len(),
                    segments = loaded.segments.len(),
                    "Loaded health archive"
                );
                Ok::<_, GpxportError>(loaded)
            })
            .await
    }
}

/// Health store backed by a JSON archive file
///
/// Location subscriptions page each segment in chunks of `batch_size`,
/// yielding to the runtime between chunks.
///
/// # Example
///
/// ```no_run
/// use gpxport::adapters::archive::ArchiveStore;
/// use gpxport::adapters::store::{HealthStore, WorkoutFilter};
///
/// # async fn example() -> gpxport::domain::Result<()> {
/// let store = ArchiveStore::new("health-archive.json", 500);
/// store.authorize().await?;
/// let workouts = store.list_workouts(&WorkoutFilter::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ArchiveStore {
    inner: Arc<ArchiveInner>,
}

impl ArchiveStore {
    /// Creates a store for the archive at `path`; nothing is read until first use
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            inner: Arc::new(ArchiveInner {
                path: path.into(),
                batch_size: batch_size.max(1),
                loaded: OnceCell::new(),
            }),
        }
    }

    /// Path of the archive file
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Locations delivered per batch
    pub fn batch_size(&self) -> usize {
        self.inner.batch_size
    }
}

enum Paging {
    Start,
    Serving {
        samples: Arc<[LocationSample]>,
        offset: usize,
    },
    Done,
}

#[async_trait]
impl HealthStore for ArchiveStore {
    async fn authorize(&self) -> Result<()> {
        self.inner.load().await?;
        Ok(())
    }

    async fn list_workouts(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>> {
        let loaded = self.inner.load().await?;
        let mut workouts: Vec<Workout> = loaded
            .workouts
            .iter()
            .map(|(w, _)| w)
            .filter(|w| filter.matches(w))
            .cloned()
            .collect();
        workouts.sort_by_key(|w| std::cmp::Reverse(w.end_date()));

        tracing::debug!(count = workouts.len(), "Listed workouts");
        Ok(workouts)
    }

    async fn workout(&self, id: &WorkoutId) -> Result<Workout> {
        let loaded = self.inner.load().await?;
        loaded
            .workouts
            .iter()
            .find(|(w, _)| &w.id == id)
            .map(|(w, _)| w.clone())
            .ok_or_else(|| StoreError::WorkoutNotFound(id.to_string()).into())
    }

    async fn list_route_segments(&self, workout: &Workout) -> Result<Vec<RouteSegment>> {
        let loaded = self.inner.load().await.map_err(|e| {
            GpxportError::from(StoreError::SegmentQueryFailed(e.to_string()))
        })?;
        loaded
            .workouts
            .iter()
            .find(|(w, _)| w.id == workout.id)
            .map(|(_, segments)| segments.clone())
            .ok_or_else(|| {
                StoreError::SegmentQueryFailed(format!("unknown workout {}", workout.id)).into()
            })
    }

    fn subscribe_location_batches(&self, segment: &RouteSegment) -> LocationBatchStream {
        let inner = Arc::clone(&self.inner);
        let segment_id = segment.id.clone();

        futures::stream::unfold(Paging::Start, move |state| {
            let inner = Arc::clone(&inner);
            let segment_id = segment_id.clone();
            async move {
                let (samples, offset) = match state {
                    Paging::Done => return None,
                    Paging::Serving { samples, offset } => {
                        tokio::task::yield_now().await;
                        (samples, offset)
                    }
                    Paging::Start => {
                        let lookup = match inner.load().await {
                            Ok(loaded) => loaded.segments.get(&segment_id).cloned().ok_or_else(
                                || StoreError::location(segment_id.as_str(), "unknown route segment"),
                            ),
                            Err(e) => Err(StoreError::location(segment_id.as_str(), e.to_string())),
                        };
                        match lookup {
                            Ok(samples) => (samples, 0),
                            Err(e) => return Some((Err(e.into()), Paging::Done)),
                        }
                    }
                };

                let end = (offset + inner.batch_size).min(samples.len());
                let chunk = samples[offset..end].to_vec();
                let is_final = end == samples.len();

                tracing::trace!(
                    segment = %segment_id,
                    offset,
                    count = chunk.len(),
                    is_final,
                    "Delivering location batch"
                );

                let next = if is_final {
                    Paging::Done
                } else {
                    Paging::Serving {
                        samples,
                        offset: end,
                    }
                };
                Some((Ok(LocationBatch { samples: chunk, is_final }), next))
            }
        })
        .boxed()
    }
}
