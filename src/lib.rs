//! splitlog - leveled logging to the console and a dated log file
//!
//! A [`LogRouter`] binds one sink per severity when it is initialized: discarded,
//! or a console stream teed into the run's log file. Logging calls never fail and
//! never re-check the level mask.

pub mod config;
pub mod error;
pub mod logging;

pub use error::RouterError;
pub use logging::{
    LogRouter, Severity, Terminator, LEVEL_ERROR, LEVEL_INFO, LEVEL_TRACE, LEVEL_WARNING,
};
