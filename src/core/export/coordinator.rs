//! Export coordinator - main orchestrator for the export process
//!
//! This module coordinates the export workflow: authorizing against the
//! health store, choosing the workouts to export and running each one
//! through the [`ExportPipeline`].

use super::pipeline::ExportPipeline;
use super::sink::{FileSinkProvider, SinkProvider};
use super::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::adapters::archive::ArchiveStore;
use crate::adapters::store::{HealthStore, WorkoutFilter};
use crate::config::GpxportConfig;
use crate::core::gpx::DateFormats;
use crate::core::route::RouteFetcher;
use crate::domain::{GpxportError, Result, Workout, WorkoutId};
use std::sync::Arc;
use std::time::Instant;

/// Which workouts an export run covers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkoutSelection {
    /// Every listed workout
    #[default]
    All,
    /// The `n` most recently ended workouts
    Latest(usize),
    /// Specific workouts, in the given order
    Ids(Vec<WorkoutId>),
}

/// Export coordinator
pub struct ExportCoordinator<P: SinkProvider = FileSinkProvider> {
    store: Arc<dyn HealthStore>,
    pipeline: ExportPipeline<P>,
    filter: WorkoutFilter,
}

impl ExportCoordinator<FileSinkProvider> {
    /// Create a coordinator reading the configured archive and writing files
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the UTC offset is out of range.
    pub fn from_config(config: &GpxportConfig) -> Result<Self> {
        let store: Arc<dyn HealthStore> = Arc::new(ArchiveStore::new(
            &config.store.archive_path,
            config.store.batch_size,
        ));

        let formats = DateFormats::with_offset_minutes(config.export.utc_offset_minutes)
            .ok_or_else(|| {
                GpxportError::Configuration(format!(
                    "utc_offset_minutes out of range: {}",
                    config.export.utc_offset_minutes
                ))
            })?;

        let provider = match &config.export.output_dir {
            Some(dir) => FileSinkProvider::new(dir),
            None => FileSinkProvider::temp_dir(),
        };

        tracing::debug!(
            archive = %config.store.archive_path.display(),
            output_dir = %provider.directory().display(),
            utc_offset_minutes = config.export.utc_offset_minutes,
            "Creating export coordinator"
        );

        Ok(Self::new(store, provider, formats))
    }
}

impl<P: SinkProvider> ExportCoordinator<P> {
    /// Create a coordinator over a store and sink provider
    pub fn new(store: Arc<dyn HealthStore>, provider: P, formats: DateFormats) -> Self {
        let fetcher = RouteFetcher::new(Arc::clone(&store));
        Self {
            store,
            pipeline: ExportPipeline::new(fetcher, provider, formats),
            filter: WorkoutFilter::default(),
        }
    }

    /// The pipeline each workout is exported through
    pub fn pipeline(&self) -> &ExportPipeline<P> {
        &self.pipeline
    }

    /// Authorize and list exportable workouts, most recently ended first
    ///
    /// # Errors
    ///
    /// Returns a store error if authorization or the listing fails.
    pub async fn list_workouts(&self, limit: Option<usize>) -> Result<Vec<Workout>> {
        self.store.authorize().await?;
        let mut workouts = self.store.list_workouts(&self.filter).await?;
        if let Some(limit) = limit {
            workouts.truncate(limit);
        }
        Ok(workouts)
    }

    /// Execute the export
    ///
    /// Workouts are exported one after another. A workout that fails is
    /// recorded in the summary and the run continues.
    ///
    /// # Errors
    ///
    /// Returns a store error if authorization or the workout listing fails;
    /// nothing is exported in that case.
    pub async fn execute_export(&self, selection: &WorkoutSelection) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(selection = ?selection, "Starting export process");

        self.store.authorize().await?;
        let workouts = self.select(selection, &mut summary).await?;
        summary.total_workouts = workouts.len() + summary.failed_exports;

        if workouts.is_empty() {
            tracing::warn!("No workouts to export");
        }

        for workout in &workouts {
            match self.pipeline.try_export(workout).await {
                Ok(artifact) => summary.record_artifact(artifact),
                Err(e) => {
                    tracing::error!(
                        workout_id = %workout.id,
                        error = %e,
                        "Export failed, no artifact produced"
                    );
                    summary.record_failure(&workout.id, &e);
                }
            }
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    async fn select(
        &self,
        selection: &WorkoutSelection,
        summary: &mut ExportSummary,
    ) -> Result<Vec<Workout>> {
        match selection {
            WorkoutSelection::All => self.store.list_workouts(&self.filter).await,
            WorkoutSelection::Latest(n) => {
                let mut workouts = self.store.list_workouts(&self.filter).await?;
                workouts.truncate(*n);
                Ok(workouts)
            }
            WorkoutSelection::Ids(ids) => {
                let mut workouts = Vec::with_capacity(ids.len());
                for id in ids {
                    match self.store.workout(id).await {
                        Ok(workout) => workouts.push(workout),
                        Err(e) if e.is_access_failure() => return Err(e),
                        Err(e) => {
                            tracing::warn!(workout_id = %id, error = %e, "Skipping workout");
                            summary.failed_exports += 1;
                            summary.add_error(
                                ExportError::new(ExportErrorType::from(&e), e.to_string())
                                    .with_context(format!("workout_id={id}")),
                            );
                        }
                    }
                }
                Ok(workouts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GpxportConfig;

    #[test]
    fn test_default_selection_is_all() {
        assert_eq!(WorkoutSelection::default(), WorkoutSelection::All);
    }

    #[test]
    fn test_from_config_rejects_bad_offset() {
        let mut config = GpxportConfig::default();
        config.export.utc_offset_minutes = 24 * 60;
        let err = ExportCoordinator::from_config(&config).err().unwrap();
        assert!(matches!(err, GpxportError::Configuration(_)));
    }

    #[test]
    fn test_from_config_output_dir() {
        let mut config = GpxportConfig::default();
        config.export.output_dir = Some("/var/tmp/gpx".into());
        let coordinator = ExportCoordinator::from_config(&config).unwrap();
        assert_eq!(
            coordinator.pipeline().provider().directory(),
            std::path::Path::new("/var/tmp/gpx")
        );
    }
}
