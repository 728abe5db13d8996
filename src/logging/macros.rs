//! `format!`-style logging macros taking the router as first argument
//!
//! ```ignore
//! splitlog::info!(router, "listening on {}", addr);
//! ```

/// Write a trace record
#[macro_export]
macro_rules! trace {
    ($router:expr, $($arg:tt)+) => {
        $router.write($crate::logging::Severity::Trace, format_args!($($arg)+))
    };
}

/// Write an info record
#[macro_export]
macro_rules! info {
    ($router:expr, $($arg:tt)+) => {
        $router.write($crate::logging::Severity::Info, format_args!($($arg)+))
    };
}

/// Write a warning record
#[macro_export]
macro_rules! warning {
    ($router:expr, $($arg:tt)+) => {
        $router.write($crate::logging::Severity::Warning, format_args!($($arg)+))
    };
}

/// Write an error record
#[macro_export]
macro_rules! error {
    ($router:expr, $($arg:tt)+) => {
        $router.write($crate::logging::Severity::Error, format_args!($($arg)+))
    };
}

/// Write an error record and terminate
#[macro_export]
macro_rules! fatal {
    ($router:expr, $($arg:tt)+) => {
        $router.fatal(format_args!($($arg)+))
    };
}
