//! HTTP Range header parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range requests and
//! non-byte units are ignored and answered with the full representation.

/// Byte range requested by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: usize,
    /// Last byte position, None means until end of file
    pub end: Option<usize>,
}

impl ByteRange {
    /// Resolve the inclusive end position against the file size
    #[inline]
    pub fn end_position(&self, file_size: usize) -> usize {
        self.end.unwrap_or_else(|| file_size.saturating_sub(1))
    }
}

/// Outcome of parsing a Range header
#[derive(Debug)]
pub enum RangeOutcome {
    /// Range can be served with 206 Partial Content
    Satisfiable(ByteRange),
    /// Start lies beyond the file, respond 416
    Unsatisfiable,
    /// No Range header, or one we do not handle: serve the full file
    Ignored,
}

/// Parse a Range header value against the file size
///
/// Accepted forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
///
/// # Examples
/// ```
/// use quickserve::http::range::{parse_range_header, RangeOutcome};
///
/// assert!(matches!(
///     parse_range_header(Some("bytes=0-99"), 1000),
///     RangeOutcome::Satisfiable(_)
/// ));
/// assert!(matches!(parse_range_header(None, 1000), RangeOutcome::Ignored));
/// ```
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Ignored;
    };

    // Single range only
    if spec.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // "-suffix": the last N bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        if suffix == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        // A suffix longer than the file covers the whole file
        return RangeOutcome::Satisfiable(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: Some(file_size.saturating_sub(1)),
        });
    }

    // "start-" or "start-end"
    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        None
    } else {
        match end_str.parse::<usize>() {
            // Clamp to the last byte of the file
            Ok(e) => Some(e.min(file_size.saturating_sub(1))),
            Err(_) => return RangeOutcome::Ignored,
        }
    };

    if end.is_some_and(|e| start > e) {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Satisfiable(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_range(header: &str, file_size: usize) -> ByteRange {
        match parse_range_header(Some(header), file_size) {
            RangeOutcome::Satisfiable(r) => r,
            other => panic!("expected Satisfiable for {header}, got {other:?}"),
        }
    }

    #[test]
    fn no_header_is_ignored() {
        assert!(matches!(parse_range_header(None, 100), RangeOutcome::Ignored));
    }

    #[test]
    fn fixed_range() {
        let r = expect_range("bytes=0-9", 100);
        assert_eq!(r.start, 0);
        assert_eq!(r.end, Some(9));
        assert_eq!(r.end_position(100), 9);
    }

    #[test]
    fn open_ended_range() {
        let r = expect_range("bytes=50-", 100);
        assert_eq!(r.start, 50);
        assert_eq!(r.end, None);
        assert_eq!(r.end_position(100), 99);
    }

    #[test]
    fn suffix_range() {
        let r = expect_range("bytes=-20", 100);
        assert_eq!(r.start, 80);
        assert_eq!(r.end, Some(99));
    }

    #[test]
    fn oversized_suffix_covers_whole_file() {
        let r = expect_range("bytes=-500", 100);
        assert_eq!(r.start, 0);
        assert_eq!(r.end, Some(99));
    }

    #[test]
    fn end_clamped_to_file_size() {
        let r = expect_range("bytes=90-500", 100);
        assert_eq!(r.start, 90);
        assert_eq!(r.end, Some(99));
    }

    #[test]
    fn start_beyond_file_is_unsatisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=-0"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn inverted_range_is_unsatisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=50-10"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn malformed_or_multi_range_is_ignored() {
        assert!(matches!(
            parse_range_header(Some("bytes=a-b"), 100),
            RangeOutcome::Ignored
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Ignored
        ));
        assert!(matches!(
            parse_range_header(Some("items=0-9"), 100),
            RangeOutcome::Ignored
        ));
    }
}
