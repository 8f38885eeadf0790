//! Infrastructure module for external services.
//!
//! This module contains the collection source, its error type, and
//! configuration loading.

pub mod config;
pub mod error;
pub mod source;

pub use config::{BrowserConfig, ConfigError};
pub use error::FetchError;
pub use source::{CollectionSource, HttpCollectionSource, StubCollectionSource};
