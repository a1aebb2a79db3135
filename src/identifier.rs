//! Embedded identifier extraction.
//!
//! Image references in the collection export point into per-record media
//! folders, e.g. `https://example.org/media/record_DE-MUS-062622_kenom_127409_media/back.jpg`.
//! The catalogue identifier is the text between the first `record_` and the
//! next `_media` that follows it.
//!
//! # Examples
//!
//! ```
//! use record_reducer::identifier::extract_id;
//!
//! let id = extract_id("prefix/record_ABC123_media/suffix")?;
//! assert_eq!(id, "ABC123");
//! # Ok::<(), record_reducer::ReduceError>(())
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ReduceError, Result};

/// Literal that opens the embedded identifier.
pub const ID_PREFIX: &str = "record_";

/// Literal that closes the embedded identifier.
pub const ID_SUFFIX: &str = "_media";

lazy_static! {
    // (?s) so identifiers spanning a newline still match
    static ref EMBEDDED_ID: Regex =
        Regex::new(r"(?s)record_(.*?)_media").expect("embedded id pattern is valid");
}

/// Extract the embedded identifier from a reference string.
///
/// Returns the shortest text between the first `record_` and the next
/// `_media`. An empty identifier (`record__media`) is returned as `""`.
///
/// # Errors
///
/// Returns [`ReduceError::Extraction`] without an index when `text` does not
/// contain the pattern.
pub fn extract_id(text: &str) -> Result<String> {
    EMBEDDED_ID
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ReduceError::Extraction {
            index: None,
            reason: format!("no `{ID_PREFIX}<id>{ID_SUFFIX}` in {text:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple() {
        assert_eq!(extract_id("prefix/record_ABC123_media/suffix").unwrap(), "ABC123");
        assert_eq!(extract_id("x/record_42_media/y").unwrap(), "42");
    }

    #[test]
    fn test_extract_realistic_reference() {
        let back = "https://www.kenom.de/media/record_DE-MUS-062622_kenom_127409_media/vs.jpg";
        assert_eq!(extract_id(back).unwrap(), "DE-MUS-062622_kenom_127409");
    }

    #[test]
    fn test_stops_at_first_media() {
        let back = "record_A_media/record_B_media/x_media";
        assert_eq!(extract_id(back).unwrap(), "A");
    }

    #[test]
    fn test_whole_string_is_pattern() {
        assert_eq!(extract_id("record_X_media").unwrap(), "X");
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(extract_id("a/record__media/b").unwrap(), "");
    }

    #[test]
    fn test_no_match() {
        let err = extract_id("no-match-here").unwrap_err();
        assert!(matches!(err, ReduceError::Extraction { index: None, .. }));
        assert!(err.to_string().contains("no-match-here"));
    }

    #[test]
    fn test_prefix_without_suffix() {
        assert!(extract_id("record_123/media").is_err());
        assert!(extract_id("123_media").is_err());
        assert!(extract_id("").is_err());
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(extract_id("record_Münze_1_media").unwrap(), "Münze_1");
    }
}
