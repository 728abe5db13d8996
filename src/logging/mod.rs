//! Leveled logging for splitlog
//!
//! Routes records by severity to stdout/stderr and a per-run log file, with an
//! in-memory buffer for capture and a bridge for `tracing` events.

mod buffer;
mod file_writer;
mod level;
mod macros;
mod record;
mod router;
mod sink;
mod tracing_layer;

pub use buffer::LogBuffer;
pub use file_writer::{create_log_file, log_file_paths, LogFileInfo};
pub use level::{
    parse_level_mask, resolve_destinations, Destination, Severity, LEVEL_ERROR, LEVEL_INFO,
    LEVEL_TRACE, LEVEL_WARNING,
};
pub use record::{CallSite, RecordFormat};
pub use router::{LogRouter, ProcessExit, Terminator};
pub use sink::{Console, LineWriter, LogFile, Sink, StderrWriter, StdoutWriter};
pub use tracing_layer::RouterLayer;
