//! Manifest (`.res`) parsing.
//!
//! A manifest lists one resource path per line. Lines starting with `//` are
//! comments; lines of zero or one character are noise (often a lone brace).
//! Everything else is kept, trimmed, in file order. Paths are not
//! validated here; see [`crate::resource_path::ResourcePath::parse`].

/// Comment marker at the start of a manifest line.
const COMMENT_PREFIX: &str = "//";

/// Splits on `\n`, `\r\n` and a bare `\r`.
///
/// `\r\n` yields an extra empty piece, which every caller drops as blank.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == '\n' || c == '\r')
}

/// Parses manifest text into resource path strings.
pub fn parse_manifest(text: &str) -> Vec<String> {
    split_lines(text)
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .filter(|line| line.chars().count() > 1)
        .map(|line| line.trim().to_string())
        .collect()
}
