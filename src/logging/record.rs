//! Record layout: `PREFIX [date time ][file:line: ]message\n`

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};

use super::level::Severity;

/// Source location attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> CallSite<'a> {
    /// Call site at `file:line`
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of a `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> CallSite<'static> {
        let location = std::panic::Location::caller();
        CallSite {
            file: location.file(),
            line: location.line(),
        }
    }

    /// File name without its directories
    pub fn short_file(&self) -> &'a str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }
}

/// Which metadata goes in front of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    /// Local date and time
    pub timestamp: bool,
    /// `file:line` of the call site
    pub location: bool,
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            timestamp: true,
            location: true,
        }
    }
}

impl RecordFormat {
    /// Prefix and message only
    pub fn bare() -> Self {
        Self {
            timestamp: false,
            location: false,
        }
    }

    /// Render one record
    ///
    /// A newline is appended only when the message does not already end with one;
    /// trailing newlines in the message are kept as written.
    pub fn render(
        &self,
        severity: Severity,
        time: DateTime<Local>,
        site: Option<CallSite<'_>>,
        args: fmt::Arguments<'_>,
    ) -> String {
        let mut record = String::with_capacity(64);
        record.push_str(severity.prefix());

        if self.timestamp {
            let _ = write!(record, "{} ", time.format("%Y/%m/%d %H:%M:%S"));
        }
        if self.location {
            if let Some(site) = site {
                let _ = write!(record, "{}:{}: ", site.short_file(), site.line);
            }
        }

        let _ = record.write_fmt(args);
        if !record.ends_with('\n') {
            record.push('\n');
        }
        record
    }
}
