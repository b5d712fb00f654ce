//! Install script errors

use std::path::Path;

use super::RebuildError;

/// Creates a script not found error
pub fn not_found(path: &Path) -> RebuildError {
    RebuildError::ScriptNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a script read failed error
pub fn read_failed(path: &Path, e: &std::io::Error) -> RebuildError {
    RebuildError::ScriptReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
