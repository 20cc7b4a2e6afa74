//! Shared utility functions.

/// One-line preview of `text` for log messages.
///
/// Newlines and runs of whitespace collapse to single spaces. Text longer
/// than `max_bytes` is cut on a UTF-8 character boundary and gets a `...`
/// suffix.
pub fn log_preview(text: &str, max_bytes: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_bytes {
        return flat;
    }
    let mut end = max_bytes;
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(log_preview("explain Pin", 80), "explain Pin");
    }

    #[test]
    fn test_newlines_collapse() {
        assert_eq!(log_preview("FILE [a.rs]:\n  fn a() {}", 80), "FILE [a.rs]: fn a() {}");
    }

    #[test]
    fn test_long_text_gets_suffix() {
        assert_eq!(log_preview("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_cut_respects_char_boundary() {
        // each kana is 3 bytes; byte 4 falls inside the second one
        assert_eq!(log_preview("あのね", 4), "あ...");
    }

    #[test]
    fn test_blank_text() {
        assert_eq!(log_preview(" \n\t ", 10), "");
    }
}
