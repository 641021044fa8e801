//! GPX 1.1 serialization
//!
//! [`format`] holds the pure text formatting (titles, file names, ISO-8601
//! timestamps) and [`writer`] streams a single-track document to any
//! [`std::io::Write`] sink.

pub mod format;
pub mod writer;

pub use format::{abbreviated_duration, iso8601, DateFormats};
pub use writer::{write_document, GpxWriter, GPX_CREATOR};
