//! Resource path validation and normalization.

/// Why a resource path was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourcePathError {
    #[error("empty resource path")]
    Empty,
    #[error("absolute resource path {0:?}")]
    Absolute(String),
    #[error("parent-directory segment in resource path {0:?}")]
    ParentTraversal(String),
    #[error("control character in resource path {0:?}")]
    ControlChar(String),
}

/// Splits `raw` into normalized segments.
///
/// - `\` is treated as `/` (manifests written on Windows use it)
/// - leading separators are dropped, so `/sound/a.wav` is `sound/a.wav`
/// - empty and `.` segments are dropped
/// - a drive prefix (`C:`) is rejected as absolute
/// - any `..` segment is rejected
pub(crate) fn split_segments(raw: &str) -> Result<Vec<String>, ResourcePathError> {
    if raw.chars().any(|c| c.is_control()) {
        return Err(ResourcePathError::ControlChar(raw.to_string()));
    }

    let normalized = raw.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');
    if has_drive_prefix(normalized) {
        return Err(ResourcePathError::Absolute(raw.to_string()));
    }

    let mut segments = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ResourcePathError::ParentTraversal(raw.to_string())),
            s => segments.push(s.to_string()),
        }
    }

    if segments.is_empty() {
        return Err(ResourcePathError::Empty);
    }
    Ok(segments)
}

fn has_drive_prefix(path: &str) -> bool {
    let b = path.as_bytes();
    b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}
