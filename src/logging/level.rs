//! Severities, level mask bits and the mask-to-destination policy

use crate::error::RouterError;

/// Everything: trace, info, warnings and errors
pub const LEVEL_TRACE: u32 = 1;

/// Info, warnings and errors
pub const LEVEL_INFO: u32 = 2;

/// Warnings and errors
pub const LEVEL_WARNING: u32 = 4;

/// Errors only
pub const LEVEL_ERROR: u32 = 8;

/// Classification of a single log call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 4] = [
        Severity::Trace,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Mask bit selecting this severity
    pub fn bit(&self) -> u32 {
        match self {
            Severity::Trace => LEVEL_TRACE,
            Severity::Info => LEVEL_INFO,
            Severity::Warning => LEVEL_WARNING,
            Severity::Error => LEVEL_ERROR,
        }
    }

    /// Prefix written at the start of every record
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE: ",
            Severity::Info => "INFO: ",
            Severity::Warning => "WARNING: ",
            Severity::Error => "ERROR: ",
        }
    }

    /// Slot of this severity in per-severity tables
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Trace,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

/// Where a severity's output goes before file fan-out is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Discard,
    Stdout,
    Stderr,
}

/// Resolve a level mask into one destination per severity
///
/// Bits cascade: a lower bit turns on console output for every severity above it,
/// so the mask acts as a verbosity floor rather than an exact filter. Bits above
/// `LEVEL_ERROR` are ignored.
pub fn resolve_destinations(mask: u32) -> [Destination; 4] {
    let mut trace = Destination::Discard;
    let mut info = Destination::Discard;
    let mut warning = Destination::Discard;
    let mut error = Destination::Discard;

    if mask & LEVEL_TRACE != 0 {
        trace = Destination::Stdout;
        info = Destination::Stdout;
        warning = Destination::Stdout;
        error = Destination::Stderr;
    }

    if mask & LEVEL_INFO != 0 {
        info = Destination::Stdout;
        warning = Destination::Stdout;
        error = Destination::Stderr;
    }

    if mask & LEVEL_WARNING != 0 {
        warning = Destination::Stdout;
        error = Destination::Stderr;
    }

    if mask & LEVEL_ERROR != 0 {
        error = Destination::Stderr;
    }

    [trace, info, warning, error]
}

/// Parse a level specification into a mask
///
/// Accepts a decimal mask (`"6"`) or level names joined by `,` or `|`
/// (`"warn|error"`). Names are case-insensitive.
pub fn parse_level_mask(spec: &str) -> Result<u32, RouterError> {
    let spec = spec.trim();
    if let Ok(mask) = spec.parse::<u32>() {
        return Ok(mask);
    }

    let mut mask = 0;
    for name in spec.split(|c: char| c == ',' || c == '|') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        mask |= match name.to_ascii_lowercase().as_str() {
            "trace" => LEVEL_TRACE,
            "info" => LEVEL_INFO,
            "warn" | "warning" => LEVEL_WARNING,
            "error" => LEVEL_ERROR,
            "off" | "none" => 0,
            _ => return Err(RouterError::InvalidLevel(name.to_string())),
        };
    }
    Ok(mask)
}
