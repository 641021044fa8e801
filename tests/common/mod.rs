//! Shared fixtures for integration tests
//!
//! [`ScriptedStore`] is an in-memory health store whose location
//! subscriptions replay a fixed script of deliveries, failures and pauses,
//! so tests control how segments interleave.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use futures::StreamExt;
use gpxport::adapters::store::{HealthStore, LocationBatchStream, WorkoutFilter};
use gpxport::domain::{
    ActivityType, LocationBatch, LocationSample, Result, RouteSegment, RouteSegmentId, StoreError,
    Workout, WorkoutId,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One step of a segment's subscription
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver a batch
    Deliver(LocationBatch),
    /// Deliver an error item
    Fail(String),
    /// Wait before the next step
    Pause(Duration),
}

/// Non-final batch of samples at the given second offsets
pub fn partial(secs: &[i64]) -> Step {
    Step::Deliver(LocationBatch::partial(secs.iter().map(|s| sample_at(*s)).collect()))
}

/// Final batch of samples at the given second offsets
pub fn last(secs: &[i64]) -> Step {
    Step::Deliver(LocationBatch::last(secs.iter().map(|s| sample_at(*s)).collect()))
}

/// Pause for `ms` milliseconds
pub fn pause(ms: u64) -> Step {
    Step::Pause(Duration::from_millis(ms))
}

/// Fixed start instant used by fixtures
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap()
}

/// Sample `secs` seconds after [`base_time`], coordinates derived from `secs`
pub fn sample_at(secs: i64) -> LocationSample {
    LocationSample::new(
        51.0 + secs as f64 / 1000.0,
        -0.5 + secs as f64 / 1000.0,
        10.0 + secs as f64,
        base_time() + chrono::Duration::seconds(secs),
    )
}

/// Seconds since [`base_time`] of each sample
pub fn offsets(samples: &[LocationSample]) -> Vec<i64> {
    samples
        .iter()
        .map(|s| (s.timestamp - base_time()).num_seconds())
        .collect()
}

/// Workout starting at [`base_time`]
pub fn workout(activity_type: ActivityType) -> Workout {
    Workout::builder()
        .id(WorkoutId::random())
        .activity_type(activity_type)
        .start_date(base_time())
        .duration(Duration::from_secs(3_600))
        .build()
        .unwrap()
}

/// Scripted in-memory health store
#[derive(Default)]
pub struct ScriptedStore {
    workouts: Vec<Workout>,
    segments: HashMap<WorkoutId, Vec<RouteSegment>>,
    scripts: HashMap<RouteSegmentId, Vec<Step>>,
    segment_query_error: Option<String>,
    access_error: Option<fn(String) -> StoreError>,
    subscriptions: Arc<AtomicUsize>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout whose segments follow the given scripts, in order
    pub fn with_workout(mut self, workout: Workout, segments: Vec<(&str, Vec<Step>)>) -> Self {
        let mut listed = Vec::with_capacity(segments.len());
        for (id, steps) in segments {
            let id = RouteSegmentId::new(id).unwrap();
            listed.push(RouteSegment::new(id.clone()));
            self.scripts.insert(id, steps);
        }
        self.segments.insert(workout.id, listed);
        self.workouts.push(workout);
        self
    }

    /// Make every segment listing fail
    pub fn failing_segment_query(mut self, message: &str) -> Self {
        self.segment_query_error = Some(message.to_string());
        self
    }

    /// Make authorization fail with `DataUnavailable`
    pub fn unavailable(mut self) -> Self {
        self.access_error = Some(StoreError::DataUnavailable as fn(String) -> StoreError);
        self
    }

    /// Make authorization fail with `AuthorizationDenied`
    pub fn denied(mut self) -> Self {
        self.access_error = Some(StoreError::AuthorizationDenied as fn(String) -> StoreError);
        self
    }

    /// Number of location subscriptions started so far
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthStore for ScriptedStore {
    async fn authorize(&self) -> Result<()> {
        match self.access_error {
            Some(make) => Err(make("scripted".to_string()).into()),
            None => Ok(()),
        }
    }

    async fn list_workouts(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| filter.matches(w))
            .cloned()
            .collect();
        workouts.sort_by_key(|w| std::cmp::Reverse(w.end_date()));
        Ok(workouts)
    }

    async fn list_route_segments(&self, workout: &Workout) -> Result<Vec<RouteSegment>> {
        if let Some(message) = &self.segment_query_error {
            return Err(StoreError::SegmentQueryFailed(message.clone()).into());
        }
        Ok(self.segments.get(&workout.id).cloned().unwrap_or_default())
    }

    fn subscribe_location_batches(&self, segment: &RouteSegment) -> LocationBatchStream {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        let segment_id = segment.id.to_string();

        let Some(steps) = self.scripts.get(&segment.id).cloned() else {
            let unknown: Result<LocationBatch> =
                Err(StoreError::location(segment_id, "unknown segment").into());
            return futures::stream::iter([unknown]).boxed();
        };

        futures::stream::iter(steps)
            .filter_map(move |step| {
                let segment_id = segment_id.clone();
                async move {
                    let item: Option<Result<LocationBatch>> = match step {
                        Step::Deliver(batch) => Some(Ok(batch)),
                        Step::Fail(message) => {
                            Some(Err(StoreError::location(segment_id, message).into()))
                        }
                        Step::Pause(duration) => {
                            tokio::time::sleep(duration).await;
                            None
                        }
                    };
                    item
                }
            })
            .boxed()
    }
}

/// A track point read back from a document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: f64,
    pub time: String,
}

/// Structure of a GPX document as read back by an XML parser
#[derive(Debug, Default)]
pub struct ParsedGpx {
    pub gpx_count: usize,
    pub trk_count: usize,
    pub trkseg_count: usize,
    pub name: String,
    pub track_time: String,
    pub points: Vec<ParsedPoint>,
}

/// Parse a GPX document, panicking if it is not well-formed
pub fn parse_gpx(text: &str) -> ParsedGpx {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedGpx::default();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<ParsedPoint> = None;

    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                match name.as_str() {
                    "gpx" => parsed.gpx_count += 1,
                    "trk" => parsed.trk_count += 1,
                    "trkseg" => parsed.trkseg_count += 1,
                    "trkpt" => {
                        let attr = |key: &str| -> f64 {
                            e.try_get_attribute(key)
                                .unwrap()
                                .unwrap_or_else(|| panic!("trkpt without {key}"))
                                .unescape_value()
                                .unwrap()
                                .parse()
                                .unwrap()
                        };
                        current = Some(ParsedPoint {
                            lat: attr("lat"),
                            lon: attr("lon"),
                            ele: f64::NAN,
                            time: String::new(),
                        });
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::End(_) => {
                if path.pop().as_deref() == Some("trkpt") {
                    parsed.points.push(current.take().expect("open trkpt"));
                }
            }
            Event::CData(e) => {
                if path.last().map(String::as_str) == Some("name") {
                    parsed.name.push_str(std::str::from_utf8(&e).unwrap());
                }
            }
            Event::Text(e) => {
                let text = e.unescape().unwrap().into_owned();
                let parent = path.iter().rev().nth(1).map(String::as_str);
                match (path.last().map(String::as_str), parent) {
                    (Some("ele"), Some("trkpt")) => {
                        if let Some(point) = current.as_mut() {
                            point.ele = text.parse().unwrap();
                        }
                    }
                    (Some("time"), Some("trkpt")) => {
                        if let Some(point) = current.as_mut() {
                            point.time = text;
                        }
                    }
                    (Some("time"), Some("trk")) => parsed.track_time = text,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    assert!(path.is_empty(), "unclosed elements: {path:?}");
    parsed
}
