//! Output sinks: discard, a console stream, or a console stream teed to the log file

use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::level::Destination;

/// A destination that accepts finished records through a shared reference
pub trait LineWriter: Send + Sync {
    /// Write one complete record
    fn write_record(&self, buf: &[u8]) -> io::Result<()>;
}

/// Process standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutWriter;

impl LineWriter for StdoutWriter {
    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(buf)?;
        out.flush()
    }
}

/// Process standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrWriter;

impl LineWriter for StderrWriter {
    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(buf)
    }
}

/// The two console streams a router writes to
#[derive(Clone)]
pub struct Console {
    pub stdout: Arc<dyn LineWriter>,
    pub stderr: Arc<dyn LineWriter>,
}

impl Console {
    /// The process's real stdout and stderr
    pub fn standard() -> Self {
        Self {
            stdout: Arc::new(StdoutWriter),
            stderr: Arc::new(StderrWriter),
        }
    }

    /// Console backed by arbitrary writers (used for capture)
    pub fn new(stdout: Arc<dyn LineWriter>, stderr: Arc<dyn LineWriter>) -> Self {
        Self { stdout, stderr }
    }

    fn stream(&self, destination: Destination) -> Option<Arc<dyn LineWriter>> {
        match destination {
            Destination::Discard => None,
            Destination::Stdout => Some(Arc::clone(&self.stdout)),
            Destination::Stderr => Some(Arc::clone(&self.stderr)),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::standard()
    }
}

/// Log file shared by every teed sink
///
/// Closing takes the handle out, after which writes are silently skipped.
#[derive(Debug)]
pub struct LogFile {
    file: Mutex<Option<File>>,
}

impl LogFile {
    /// Wrap an open file for sharing between sinks
    pub fn new(file: File) -> Self {
        Self {
            file: Mutex::new(Some(file)),
        }
    }

    /// Whether the handle is still open
    pub fn is_open(&self) -> bool {
        self.file.lock().map(|f| f.is_some()).unwrap_or(false)
    }

    /// Sync pending data to disk without closing
    pub fn sync(&self) -> io::Result<()> {
        match self.file.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(file) => file.sync_all(),
                None => Ok(()),
            },
            Err(_) => Ok(()),
        }
    }

    /// Sync and drop the handle; a second call is a no-op
    pub fn close(&self) -> io::Result<()> {
        let file = match self.file.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match file {
            Some(file) => file.sync_all(),
            None => Ok(()),
        }
    }
}

impl LineWriter for LogFile {
    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        match self.file.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(file) => file.write_all(buf),
                None => Ok(()),
            },
            Err(_) => Err(io::Error::new(io::ErrorKind::Other, "log file lock poisoned")),
        }
    }
}

/// What a severity is bound to after initialization
#[derive(Clone, Default)]
pub enum Sink {
    /// Output is dropped; never fails
    #[default]
    Discard,
    /// A single console stream
    Console(Arc<dyn LineWriter>),
    /// Console stream duplicated to the log file
    Tee {
        file: Arc<LogFile>,
        console: Arc<dyn LineWriter>,
    },
}

impl Sink {
    /// Build the sink for a resolved destination
    ///
    /// Discarded destinations never touch the file.
    pub fn bind(destination: Destination, console: &Console, file: Option<&Arc<LogFile>>) -> Self {
        match (console.stream(destination), file) {
            (None, _) => Sink::Discard,
            (Some(stream), None) => Sink::Console(stream),
            (Some(stream), Some(file)) => Sink::Tee {
                file: Arc::clone(file),
                console: stream,
            },
        }
    }

    /// Whether output is dropped
    pub fn is_discard(&self) -> bool {
        matches!(self, Sink::Discard)
    }

    /// Whether output is also written to the log file
    pub fn is_teed(&self) -> bool {
        matches!(self, Sink::Tee { .. })
    }

    /// Write a record to every destination of this sink
    ///
    /// Both halves of a tee are always attempted; the file error wins if both fail.
    pub fn write(&self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Discard => Ok(()),
            Sink::Console(console) => console.write_record(buf),
            Sink::Tee { file, console } => {
                let file_result = file.write_record(buf);
                let console_result = console.write_record(buf);
                file_result.and(console_result)
            }
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Discard => f.write_str("Discard"),
            Sink::Console(_) => f.write_str("Console"),
            Sink::Tee { .. } => f.write_str("Tee"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogBuffer;
    use tempfile::TempDir;

    struct FailingWriter;

    impl LineWriter for FailingWriter {
        fn write_record(&self, _buf: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn capture_console() -> (Arc<LogBuffer>, Arc<LogBuffer>, Console) {
        let out = Arc::new(LogBuffer::new(100));
        let err = Arc::new(LogBuffer::new(100));
        let console = Console::new(out.clone(), err.clone());
        (out, err, console)
    }

    fn temp_log_file(dir: &TempDir) -> (std::path::PathBuf, Arc<LogFile>) {
        let path = dir.path().join("log.txt");
        let file = File::create(&path).unwrap();
        (path, Arc::new(LogFile::new(file)))
    }

    #[test]
    fn test_discard_never_fails() {
        assert!(Sink::Discard.write(b"anything\n").is_ok());
    }

    #[test]
    fn test_bind_discard_ignores_file() {
        let dir = TempDir::new().unwrap();
        let (_, file) = temp_log_file(&dir);
        let (_, _, console) = capture_console();
        let sink = Sink::bind(Destination::Discard, &console, Some(&file));
        assert!(sink.is_discard());
    }

    #[test]
    fn test_tee_writes_both_destinations() {
        let dir = TempDir::new().unwrap();
        let (path, file) = temp_log_file(&dir);
        let (out, err, console) = capture_console();

        let sink = Sink::bind(Destination::Stdout, &console, Some(&file));
        assert!(sink.is_teed());
        sink.write(b"hello\n").unwrap();

        assert_eq!(out.all_entries(), vec!["hello\n".to_string()]);
        assert!(err.is_empty());
        file.close().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }

    #[test]
    fn test_tee_reports_console_failure_after_writing_file() {
        let dir = TempDir::new().unwrap();
        let (path, file) = temp_log_file(&dir);
        let sink = Sink::Tee {
            file: file.clone(),
            console: Arc::new(FailingWriter),
        };

        assert!(sink.write(b"still on disk\n").is_err());
        file.close().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "still on disk\n");
    }

    #[test]
    fn test_tee_reports_file_failure_after_writing_console() {
        let dir = TempDir::new().unwrap();
        let (_, file) = temp_log_file(&dir);
        let (out, _, console) = capture_console();
        let sink = Sink::bind(Destination::Stdout, &console, Some(&file));

        // A writer that panicked while holding the lock leaves it poisoned
        let holder = Arc::clone(&file);
        let _ = std::thread::spawn(move || {
            let _guard = holder.file.lock().unwrap();
            panic!("writer died mid-record");
        })
        .join();

        let err = sink.write(b"console only\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(out.all_entries(), vec!["console only\n".to_string()]);
        assert!(file.close().is_ok());
    }

    #[test]
    fn test_bind_without_file_is_console_only() {
        let (out, err, console) = capture_console();
        let sink = Sink::bind(Destination::Stderr, &console, None);

        assert!(matches!(sink, Sink::Console(_)));
        assert!(!sink.is_teed());
        sink.write(b"ERROR: no file\n").unwrap();

        assert!(out.is_empty());
        assert_eq!(err.all_entries(), vec!["ERROR: no file\n".to_string()]);
    }

    #[test]
    fn test_closed_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let (path, file) = temp_log_file(&dir);
        let (out, _, console) = capture_console();
        let sink = Sink::bind(Destination::Stdout, &console, Some(&file));

        file.close().unwrap();
        assert!(!file.is_open());
        sink.write(b"after close\n").unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_close_twice_is_noop() {
        let dir = TempDir::new().unwrap();
        let (_, file) = temp_log_file(&dir);
        assert!(file.close().is_ok());
        assert!(file.close().is_ok());
    }
}
