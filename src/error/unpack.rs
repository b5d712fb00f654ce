//! External unpacker errors

use std::path::Path;

use super::RebuildError;

/// Creates an unpacker not found error
pub fn not_found(path: &Path) -> RebuildError {
    RebuildError::UnpackerNotFound {
        path: path.display().to_string(),
    }
}

/// Creates an unpack failed error
pub fn failed(reason: impl Into<String>) -> RebuildError {
    RebuildError::UnpackFailed {
        reason: reason.into(),
    }
}
