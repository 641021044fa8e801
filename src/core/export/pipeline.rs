//! Single-workout export: route fetch, GPX writing and sink handling

use super::sink::SinkProvider;
use crate::core::gpx::{DateFormats, GpxWriter};
use crate::core::route::RouteFetcher;
use crate::domain::{Result, Workout};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// A written GPX document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Where the document was written
    pub path: PathBuf,

    /// Number of track points in the document
    pub point_count: usize,
}

/// Exports one workout's route as a GPX document
///
/// The output sink is acquired once per export and released on every path.
/// On failure any partially written artifact is left as it is.
pub struct ExportPipeline<P: SinkProvider> {
    fetcher: RouteFetcher,
    provider: P,
    formats: DateFormats,
}

impl<P: SinkProvider> ExportPipeline<P> {
    /// Create a pipeline
    pub fn new(fetcher: RouteFetcher, provider: P, formats: DateFormats) -> Self {
        Self {
            fetcher,
            provider,
            formats,
        }
    }

    /// The sink provider artifacts are written through
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Date formatting used for titles and file names
    pub fn formats(&self) -> &DateFormats {
        &self.formats
    }

    /// Export the workout, logging any failure
    ///
    /// Returns `None` when no artifact was produced.
    pub async fn export(&self, workout: &Workout) -> Option<Artifact> {
        match self.try_export(workout).await {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::error!(
                    workout_id = %workout.id,
                    error = %e,
                    "Export failed, no artifact produced"
                );
                None
            }
        }
    }

    /// Export the workout
    ///
    /// The header is written before the route is fetched, so a failed fetch
    /// leaves a header-only document behind.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the sink cannot be acquired, written or
    /// released, and any error from fetching the route.
    pub async fn try_export(&self, workout: &Workout) -> Result<Artifact> {
        let started = Instant::now();
        let file_name = self.formats.file_name(workout);

        let mut sink = self.provider.acquire(&file_name)?;
        let path = sink.artifact().to_path_buf();

        tracing::debug!(
            workout_id = %workout.id,
            activity = %workout.activity_type,
            path = %path.display(),
            "Exporting workout"
        );

        let mut writer = GpxWriter::begin(&mut sink, workout, &self.formats)?;
        let route = self.fetcher.fetch_route(workout).await?;
        writer.write_points(&route)?;
        writer.finish()?;
        sink.release()?;

        tracing::info!(
            workout_id = %workout.id,
            path = %path.display(),
            points = route.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Exported workout"
        );

        Ok(Artifact {
            path,
            point_count: route.len(),
        })
    }
}
