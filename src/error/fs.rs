//! File system errors

use std::path::Path;

use super::RebuildError;

/// Creates an extraction not found error
pub fn extraction_not_found(path: &Path) -> RebuildError {
    RebuildError::ExtractionNotFound {
        path: path.display().to_string(),
    }
}

/// Creates an extraction empty error
pub fn extraction_empty(path: &Path) -> RebuildError {
    RebuildError::ExtractionEmpty {
        path: path.display().to_string(),
    }
}

/// Creates an extraction walk failed error
pub fn walk_failed(path: &Path, reason: impl Into<String>) -> RebuildError {
    RebuildError::ExtractionWalkFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates a directory creation error
pub fn create_dir_failed(path: &Path, e: &std::io::Error) -> RebuildError {
    RebuildError::CreateDirFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates an installer not found error
pub fn installer_not_found(path: &Path) -> RebuildError {
    RebuildError::InstallerNotFound {
        path: path.display().to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> RebuildError {
    RebuildError::IoError {
        message: message.into(),
    }
}
