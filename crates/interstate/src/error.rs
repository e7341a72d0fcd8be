//! Error types for interaction state configuration.
//!
//! Only configuration can fail. Animation races, duplicate events and
//! events for unknown animations are absorbed silently by the trackers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StateError>;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("invalid bubbling filter: {0}")]
    InvalidFilter(#[from] statecss::CssError),

    #[error("invalid view range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("invalid view step {0}: must be positive")]
    InvalidStep(i64),

    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),
}
