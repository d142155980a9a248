//! Segment-wise joining onto a base URL and an output directory.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use url::Url;

/// Appends `segments` to the path of `base`, percent-encoding each one.
///
/// A trailing empty segment on `base` (a trailing `/`) is dropped first, so
/// `http://h/cstrike` and `http://h/cstrike/` give the same result. Segments
/// that are already percent-encoded (`my%20song.wav`) are decoded first so
/// they go out encoded once, not twice.
pub(crate) fn join_url(base: &Url, segments: &[String]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments.iter().map(|s| decode_segment(s)));
    }
    url
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}

pub(crate) fn join_local(root: &Path, segments: &[String]) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(segments);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(s: &[&str]) -> Vec<String> {
        s.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn root_base() {
        let base = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(
            join_url(&base, &segs(&["maps", "de_dust2.bsp"])).as_str(),
            "http://127.0.0.1:8080/maps/de_dust2.bsp"
        );
    }

    #[test]
    fn trailing_slash_does_not_double() {
        let base = Url::parse("https://dl.example.com/cstrike/").unwrap();
        assert_eq!(
            join_url(&base, &segs(&["maps", "cs_office.res"])).as_str(),
            "https://dl.example.com/cstrike/maps/cs_office.res"
        );
    }

    #[test]
    fn special_characters_are_encoded() {
        let base = Url::parse("http://h/").unwrap();
        assert_eq!(
            join_url(&base, &segs(&["sound", "my song#1?.wav"])).as_str(),
            "http://h/sound/my%20song%231%3F.wav"
        );
    }

    #[test]
    fn already_encoded_segments_are_not_double_encoded() {
        let base = Url::parse("http://h/cstrike").unwrap();
        assert_eq!(
            join_url(&base, &segs(&["sound", "my%20song.wav"])).as_str(),
            "http://h/cstrike/sound/my%20song.wav"
        );
    }

    #[test]
    fn stray_percent_is_encoded() {
        let base = Url::parse("http://h/").unwrap();
        assert_eq!(
            join_url(&base, &segs(&["sound", "100%.wav"])).as_str(),
            "http://h/sound/100%25.wav"
        );
    }

    #[test]
    fn local_join() {
        let p = join_local(Path::new("/tmp/out"), &segs(&["maps", "x.bsp"]));
        assert_eq!(p, PathBuf::from("/tmp/out/maps/x.bsp"));
    }
}
