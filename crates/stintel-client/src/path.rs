//! Endpoint paths, relative to the backend base URL.
//!
//! Path segments are percent-encoded with `encodeURIComponent` semantics:
//! everything except ASCII alphanumerics and `-_.!~*'()` is escaped.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const SEARCH_PATH: &str = "api/search";

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one path segment.
///
/// Segments made only of dots are escaped too, otherwise URL resolution
/// would treat `.` and `..` as relative path steps.
#[must_use]
pub fn encode_segment(raw: &str) -> String {
    if !raw.is_empty() && raw.chars().all(|c| c == '.') {
        return raw.replace('.', "%2E");
    }
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// `api/news/{company}/{industry}`
#[must_use]
pub fn news_path(company: &str, industry: &str) -> String {
    format!(
        "api/news/{}/{}",
        encode_segment(company),
        encode_segment(industry)
    )
}

/// `api/sentiment/{company}`
#[must_use]
pub fn sentiment_path(company: &str) -> String {
    format!("api/sentiment/{}", encode_segment(company))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_percent_20() {
        assert_eq!(encode_segment("Acme Corp"), "Acme%20Corp");
    }

    #[test]
    fn slashes_and_ampersands_are_escaped() {
        assert_eq!(encode_segment("AI/ML & Data"), "AI%2FML%20%26%20Data");
    }

    #[test]
    fn unreserved_marks_are_kept() {
        assert_eq!(encode_segment("Yahoo!-Inc.(US)"), "Yahoo!-Inc.(US)");
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode_segment("Café"), "Caf%C3%A9");
    }

    #[test]
    fn dot_segments_are_escaped() {
        assert_eq!(encode_segment("."), "%2E");
        assert_eq!(encode_segment(".."), "%2E%2E");
    }

    #[test]
    fn news_path_encodes_both_segments() {
        assert_eq!(
            news_path("Acme Corp", "Software"),
            "api/news/Acme%20Corp/Software"
        );
    }

    #[test]
    fn sentiment_path_encodes_company() {
        assert_eq!(sentiment_path("Globex Inc"), "api/sentiment/Globex%20Inc");
    }
}
