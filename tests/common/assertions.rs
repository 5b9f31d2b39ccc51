//! Domain-specific assertion macros for logvault harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! archive invariant was violated.

use logvault_core::LogType;

/// `true` when `name` is `{type}-{8 digits}-{6 digits}` followed by either
/// nothing or a `.` and a non-empty alphanumeric extension.
pub fn is_canonical_name(name: &str, log_type: LogType) -> bool {
    let Some(rest) = name.strip_prefix(&format!("{log_type}-")) else {
        return false;
    };
    let bytes = rest.as_bytes();
    if bytes.len() < 15 {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !digits(0..8) || bytes[8] != b'-' || !digits(9..15) {
        return false;
    }
    match &rest[15..] {
        "" => true,
        ext => {
            ext.len() > 1
                && ext.starts_with('.')
                && ext[1..].chars().all(|c| c.is_ascii_alphanumeric())
        }
    }
}

/// Assert that a stored name is canonical for the given type.
///
/// ```rust
/// assert_canonical_name!(stored.name, LogType::Mysql);
/// ```
#[macro_export]
macro_rules! assert_canonical_name {
    ($name:expr, $log_type:expr) => {{
        let name: &str = &$name;
        let log_type: logvault_core::LogType = $log_type;
        if !$crate::common::is_canonical_name(name, log_type) {
            panic!(
                "assert_canonical_name! failed:\n  name:     {:?}\n  expected: {}-YYYYMMDD-HHMMSS[.ext]",
                name, log_type
            );
        }
    }};
}

/// Assert that a listing for one type contains `name` exactly once.
#[macro_export]
macro_rules! assert_listed_once {
    ($entries:expr, $name:expr) => {{
        let entries: &[logvault_core::ArchiveEntry] = &$entries;
        let name: &str = &$name;
        let count = entries.iter().filter(|e| e.name == name).count();
        if count != 1 {
            panic!(
                "assert_listed_once! failed: {:?} appears {} times.\n  Listed: {:?}",
                name,
                count,
                entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>()
            );
        }
    }};
}
