//! JSON health archive adapter
//!
//! A concrete [`HealthStore`](crate::adapters::store::HealthStore) reading
//! workouts and their recorded routes from an exported archive file.

pub mod models;
pub mod store;

pub use models::{ArchivedRoute, ArchivedWorkout, HealthArchive};
pub use store::ArchiveStore;
