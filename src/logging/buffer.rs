//! In-memory record buffer
//!
//! A thread-safe ring buffer that can stand in for a console stream, for embedding
//! the router in hosts without a terminal and for capturing output in tests.

use std::collections::VecDeque;
use std::io;
use std::sync::RwLock;

use super::sink::LineWriter;

/// Thread-safe ring buffer of captured records
#[derive(Debug)]
pub struct LogBuffer {
    /// Captured records, oldest first (capped at max_entries)
    entries: RwLock<VecDeque<String>>,
    /// Maximum records to keep
    max_entries: usize,
}

impl LogBuffer {
    /// Create a new buffer holding at most `max_entries` records
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries,
        }
    }

    /// Push a record, evicting the oldest when full
    pub fn push(&self, record: String) {
        if self.max_entries == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries {
                entries.pop_front();
            }
            entries.push_back(record);
        }
    }

    /// Get all records as a vector
    pub fn all_entries(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All records joined into one string
    pub fn contents(&self) -> String {
        self.entries
            .read()
            .map(|e| e.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of records containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.entries
            .read()
            .map(|e| e.iter().filter(|r| r.contains(needle)).count())
            .unwrap_or(0)
    }

    /// Get the number of records in the buffer
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every captured record
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl LineWriter for LogBuffer {
    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        self.push(String::from_utf8_lossy(buf).into_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_push_and_retrieve() {
        let buffer = LogBuffer::new(100);

        buffer.push("INFO: message 1\n".to_string());
        buffer.push("WARNING: warning 1\n".to_string());

        assert_eq!(buffer.len(), 2);
        let entries = buffer.all_entries();
        assert_eq!(entries[0], "INFO: message 1\n");
        assert_eq!(entries[1], "WARNING: warning 1\n");
        assert_eq!(buffer.contents(), "INFO: message 1\nWARNING: warning 1\n");
    }

    #[test]
    fn test_log_buffer_capacity() {
        let buffer = LogBuffer::new(3);

        for i in 0..5 {
            buffer.push(format!("msg {}", i));
        }

        assert_eq!(buffer.len(), 3);
        let entries = buffer.all_entries();
        assert_eq!(entries[0], "msg 2");
        assert_eq!(entries[1], "msg 3");
        assert_eq!(entries[2], "msg 4");
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let buffer = LogBuffer::new(0);
        buffer.push("dropped".to_string());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_write_record_and_count() {
        let buffer = LogBuffer::new(10);
        buffer.write_record(b"value=42\n").unwrap();
        buffer.write_record(b"value=7\n").unwrap();

        assert_eq!(buffer.count_containing("value=42"), 1);
        assert_eq!(buffer.count_containing("value="), 2);

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
