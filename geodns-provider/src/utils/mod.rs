//! Utility modules.

/// Log sanitization utilities to keep long rdata out of logs.
pub mod log_sanitizer;
