//! Keeps rdata out of logs in full.
//!
//! TXT/SPF rdata can run to kilobytes (DKIM keys, long SPF chains); log lines only
//! carry a prefix and the total size.

/// Maximum number of characters of a value kept in a log line.
const TRUNCATE_CHARS: usize = 128;

/// Truncate a string for logging, cutting on a character boundary.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(TRUNCATE_CHARS) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}... [{} bytes]", &s[..cut], s.len()),
    }
}

/// Positional rdata joined with spaces, truncated for logging.
pub fn rdata_for_log(rdata: &[String]) -> String {
    truncate_for_log(&rdata.join(" "))
}
