//! Media library rules: accepted MIME types, media kinds, file names.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// MIME types accepted by the media library, with the extension a stored
/// upload of that type gets. The client's file name never picks the extension.
pub const ALLOWED_MEDIA_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
    ("image/svg+xml", "svg"),
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("application/pdf", "pdf"),
];

const MAX_FILE_NAME_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }

    /// Derive the kind from an accepted MIME type.
    pub fn from_mime(mime: &str) -> Result<Self, CoreError> {
        validate_mime_type(mime)?;
        Ok(match mime.split('/').next() {
            Some("image") => Self::Image,
            Some("video") => Self::Video,
            _ => Self::Document,
        })
    }
}

/// Reject MIME types outside [`ALLOWED_MEDIA_TYPES`].
pub fn validate_mime_type(mime: &str) -> Result<(), CoreError> {
    extension_for_mime(mime).map(|_| ())
}

/// Storage extension for an accepted MIME type.
pub fn extension_for_mime(mime: &str) -> Result<&'static str, CoreError> {
    ALLOWED_MEDIA_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            let allowed: Vec<&str> = ALLOWED_MEDIA_TYPES.iter().map(|(m, _)| *m).collect();
            CoreError::Validation(format!(
                "Unsupported media type '{mime}'. Allowed: {}",
                allowed.join(", ")
            ))
        })
}

/// Reduce a client-supplied file name to a safe basename.
///
/// Drops any directory components, replaces characters outside
/// `[A-Za-z0-9._-]` with `_`, and refuses names that end up empty or
/// consist only of dots.
pub fn sanitize_file_name(name: &str) -> Result<String, CoreError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_NAME_LENGTH)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        return Err(CoreError::Validation(format!(
            "Invalid file name '{name}'"
        )));
    }
    Ok(cleaned)
}
