//! Announcement publication window rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Validate an optional `starts_at`/`ends_at` window.
pub fn validate_window(
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end <= start {
            return Err(CoreError::Validation(
                "ends_at must be after starts_at".into(),
            ));
        }
    }
    Ok(())
}
