//! Route aggregation across a workout's segments

pub mod fetcher;

pub use fetcher::RouteFetcher;
