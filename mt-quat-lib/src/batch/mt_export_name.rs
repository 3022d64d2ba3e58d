use std::sync::OnceLock;

use glob::{Pattern, PatternError};

/// Export naming scheme: one character, `_MT_`, anything, then `.txt`.
pub const MT_EXPORT_PATTERN: &str = "?_MT_*.txt";

fn mt_export_pattern() -> Result<&'static Pattern, &'static PatternError> {
    static PATTERN: OnceLock<Result<Pattern, PatternError>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Pattern::new(MT_EXPORT_PATTERN))
        .as_ref()
}

/// Whether a bare file name (no directory) follows `?_MT_*.txt`.
pub fn is_mt_export_name(name: &str) -> bool {
    mt_export_pattern().is_ok_and(|pattern| pattern.matches(name))
}
