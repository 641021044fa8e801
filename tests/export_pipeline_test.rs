//! Single-workout export through file and buffer sinks

mod common;

use common::{last, parse_gpx, partial, workout, ScriptedStore, Step};
use gpxport::core::export::{BufferSinkProvider, ExportPipeline, FileSinkProvider, SinkProvider};
use gpxport::core::gpx::DateFormats;
use gpxport::core::route::RouteFetcher;
use gpxport::domain::{ActivityType, GpxportError, StoreError, Workout};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn pipeline<P: SinkProvider>(store: ScriptedStore, provider: P) -> ExportPipeline<P> {
    ExportPipeline::new(
        RouteFetcher::new(Arc::new(store)),
        provider,
        DateFormats::utc(),
    )
}

fn routed(w: &Workout) -> ScriptedStore {
    ScriptedStore::new().with_workout(
        w.clone(),
        vec![
            ("seg-a", vec![partial(&[0, 20]), last(&[40])]),
            ("seg-b", vec![last(&[10, 30])]),
        ],
    )
}

#[tokio::test]
async fn test_cycling_export_name_and_content() {
    let w = workout(ActivityType::Cycling);
    let pipeline = pipeline(routed(&w), BufferSinkProvider::new());

    let artifact = pipeline.try_export(&w).await.unwrap();
    assert_eq!(artifact.point_count, 5);
    assert_eq!(artifact.path.to_str(), Some("2024-05-01_07-30-00_Cycle.gpx"));

    let provider = pipeline.provider();
    assert_eq!(provider.names(), vec!["2024-05-01_07-30-00_Cycle.gpx"]);
    assert_eq!(provider.acquisitions("2024-05-01_07-30-00_Cycle.gpx"), 1);
    assert_eq!(provider.releases("2024-05-01_07-30-00_Cycle.gpx"), 1);

    let parsed = parse_gpx(&provider.contents("2024-05-01_07-30-00_Cycle.gpx").unwrap());
    let times: Vec<&str> = parsed.points.iter().map(|p| p.time.as_str()).collect();
    assert_eq!(
        times,
        vec![
            "2024-05-01T07:30:00Z",
            "2024-05-01T07:30:10Z",
            "2024-05-01T07:30:20Z",
            "2024-05-01T07:30:30Z",
            "2024-05-01T07:30:40Z",
        ]
    );
}

#[tokio::test]
async fn test_workout_without_route_exports_empty_track() {
    let w = workout(ActivityType::Walking);
    let pipeline = pipeline(
        ScriptedStore::new().with_workout(w.clone(), vec![]),
        BufferSinkProvider::new(),
    );

    let artifact = pipeline.try_export(&w).await.unwrap();
    assert_eq!(artifact.point_count, 0);

    let text = pipeline
        .provider()
        .contents("2024-05-01_07-30-00_Walk.gpx")
        .unwrap();
    assert!(text.contains("<trkseg></trkseg>"));
    assert_eq!(parse_gpx(&text).trkseg_count, 1);
}

#[tokio::test]
async fn test_failed_route_leaves_header_only_file() {
    let dir = TempDir::new().unwrap();
    let w = workout(ActivityType::Running);
    let store = ScriptedStore::new().with_workout(
        w.clone(),
        vec![("seg-a", vec![partial(&[1]), Step::Fail("gone".into())])],
    );
    let pipeline = pipeline(store, FileSinkProvider::new(dir.path()));

    let err = pipeline.try_export(&w).await.unwrap_err();
    assert!(matches!(
        err,
        GpxportError::Store(StoreError::LocationQueryFailed { .. })
    ));
    assert!(pipeline.export(&w).await.is_none());

    let path = dir.path().join("2024-05-01_07-30-00_Run.gpx");
    let text = fs::read_to_string(path).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.ends_with("<trkseg>"));
    assert!(!text.contains("<trkpt"));
}

#[tokio::test]
async fn test_existing_file_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("2024-05-01_07-30-00_Cycle.gpx");
    fs::write(&path, "stale content that is much longer than nothing at all".repeat(200)).unwrap();

    let w = workout(ActivityType::Cycling);
    let pipeline = pipeline(routed(&w), FileSinkProvider::new(dir.path()));
    let artifact = pipeline.try_export(&w).await.unwrap();

    assert_eq!(artifact.path, path);
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(parse_gpx(&text).points.len(), 5);
}

#[tokio::test]
async fn test_output_directory_created_on_demand() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("gpx").join("2024");
    let w = workout(ActivityType::Walking);
    let pipeline = pipeline(
        ScriptedStore::new().with_workout(w.clone(), vec![]),
        FileSinkProvider::new(&nested),
    );

    let artifact = pipeline.try_export(&w).await.unwrap();
    assert!(artifact.path.starts_with(&nested));
    assert!(artifact.path.exists());
}
