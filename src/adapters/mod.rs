//! External integrations
//!
//! - [`store`] - The health data store capability consumed by the exporter
//! - [`archive`] - A store backed by a JSON health archive file

pub mod archive;
pub mod store;
