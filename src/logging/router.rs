//! Level-gated router fanning records out to the console and the log file
//!
//! Routing is decided once in [`LogRouter::initialize`]; afterwards every write goes
//! straight to the sink bound for its severity without looking at the level mask.
//!
//! Call `initialize` before sharing the router with other threads. Quiesce writers
//! before `stop` if their output must reach the file.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::{Local, Utc};

use crate::error::RouterError;

use super::file_writer::{create_log_file, LogFileInfo};
use super::level::{resolve_destinations, Severity};
use super::record::{CallSite, RecordFormat};
use super::sink::{Console, LogFile, Sink};

/// What `fatal` does after the record is written
pub trait Terminator: Send + Sync {
    /// Stop with the given exit code; never returns
    fn terminate(&self, code: i32) -> !;
}

/// Exit the process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}

/// Routes records for each severity to its bound sink
pub struct LogRouter {
    active_level: AtomicU32,
    sinks: [Sink; 4],
    file: Option<Arc<LogFile>>,
    file_info: Option<LogFileInfo>,
    console: Console,
    format: RecordFormat,
    terminator: Box<dyn Terminator>,
}

impl LogRouter {
    /// An uninitialized router writing to the real console
    ///
    /// Every severity is discarded until [`LogRouter::initialize`] succeeds.
    pub fn new() -> Self {
        Self::with_console(Console::standard())
    }

    /// An uninitialized router writing to the given console streams
    pub fn with_console(console: Console) -> Self {
        Self {
            active_level: AtomicU32::new(0),
            sinks: Default::default(),
            file: None,
            file_info: None,
            console,
            format: RecordFormat::default(),
            terminator: Box::new(ProcessExit),
        }
    }

    /// Replace what `fatal` does once the record is written
    pub fn with_terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    /// Choose which metadata precedes each message
    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    /// Open a fresh log file under `base_dir` and bind sinks for `level_mask`
    ///
    /// On error the router keeps whatever it was bound to before.
    ///
    /// File names have one-second resolution: a second `initialize` within the same
    /// UTC second reuses the path and truncates the earlier run's file.
    pub fn initialize(
        &mut self,
        level_mask: u32,
        base_dir: impl AsRef<Path>,
    ) -> Result<LogFileInfo, RouterError> {
        let (info, file) = create_log_file(base_dir.as_ref(), Utc::now())?;
        let file = Arc::new(LogFile::new(file));

        let destinations = resolve_destinations(level_mask);
        self.sinks = destinations.map(|d| Sink::bind(d, &self.console, Some(&file)));
        self.file = Some(file);
        self.file_info = Some(info.clone());
        self.active_level.store(level_mask, Ordering::Release);

        Ok(info)
    }

    /// Close the log file
    ///
    /// Sinks stay bound; teed sinks keep writing to their console half. Succeeds
    /// without doing anything when no file was ever opened.
    pub fn stop(&self) -> Result<(), RouterError> {
        match &self.file {
            Some(file) => file.close().map_err(|source| RouterError::FileClose { source }),
            None => Ok(()),
        }
    }

    /// The level mask passed to the last successful `initialize`
    pub fn active_level(&self) -> u32 {
        self.active_level.load(Ordering::Acquire)
    }

    /// Path of the current log file, if initialized
    pub fn log_file(&self) -> Option<&LogFileInfo> {
        self.file_info.as_ref()
    }

    /// Sink bound to a severity
    pub fn sink(&self, severity: Severity) -> &Sink {
        &self.sinks[severity.index()]
    }

    /// Format and write a record; failures are ignored
    #[track_caller]
    pub fn write(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.write_at(severity, Some(CallSite::caller()), args);
    }

    /// Like [`LogRouter::write`] with an explicit call site
    pub fn write_at(
        &self,
        severity: Severity,
        site: Option<CallSite<'_>>,
        args: fmt::Arguments<'_>,
    ) {
        let record = self.format.render(severity, Local::now(), site, args);
        let _ = self.sink(severity).write(record.as_bytes());
    }

    /// Write a trace record
    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.write_at(Severity::Trace, Some(CallSite::caller()), args);
    }

    /// Write an info record
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.write_at(Severity::Info, Some(CallSite::caller()), args);
    }

    /// Write a warning record
    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.write_at(Severity::Warning, Some(CallSite::caller()), args);
    }

    /// Write an error record
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.write_at(Severity::Error, Some(CallSite::caller()), args);
    }

    /// Write an error record, then terminate with exit code 1
    ///
    /// The log file is synced first; nothing else in the process is flushed.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.write_at(Severity::Error, Some(CallSite::caller()), args);
        if let Some(file) = &self.file {
            let _ = file.sync();
        }
        self.terminator.terminate(1)
    }
}

impl Default for LogRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRouter")
            .field("active_level", &self.active_level())
            .field("sinks", &self.sinks)
            .field("file_info", &self.file_info)
            .field("format", &self.format)
            .finish()
    }
}
