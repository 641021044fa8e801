//! Export orchestration
//!
//! This module provides the export logic for gpxport, including:
//! - Output sinks with guaranteed release
//! - The single-workout export pipeline
//! - Export coordination and summary reporting

pub mod coordinator;
pub mod pipeline;
pub mod sink;
pub mod summary;

pub use coordinator::{ExportCoordinator, WorkoutSelection};
pub use pipeline::{Artifact, ExportPipeline};
pub use sink::{BufferSink, BufferSinkProvider, FileSinkProvider, ScopedSink, SinkProvider};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
