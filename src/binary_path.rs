// ── Running binary's own path ─────────────────────────────────────────────────
//
// Each call resolves into a call-local buffer and returns an owned `PathBuf`,
// so concurrent callers never share storage.

use std::path::PathBuf;

use crate::{
    config::IoConfig,
    error::{FsError, Result},
    platform::{Native, PathResolver, DEFAULT_PATH_CAPACITY},
};

/// Absolute path of the running executable.
pub fn binary_path() -> Result<PathBuf> {
    resolve(DEFAULT_PATH_CAPACITY)
}

/// `binary_path()` with the buffer capacity taken from `config`.
///
/// A capacity above `MAX_PATH_CAPACITY` is `FsError::ConfigRange`.
pub fn binary_path_with(config: &IoConfig) -> Result<PathBuf> {
    config.validate()?;
    resolve(config.path_capacity)
}

/// Absolute path of the running executable, or process abort.
///
/// For callers that cannot continue without knowing where they live.  The
/// failure is logged at `error` level and then `std::process::abort` is
/// called; this function never returns an error.
pub fn binary_path_or_abort() -> PathBuf {
    match binary_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::error!(error = %e, "cannot determine the running binary's path; aborting");
            std::process::abort();
        }
    }
}

/// Directory containing the running executable.
pub fn binary_directory() -> Result<PathBuf> {
    let path = binary_path()?;
    path.parent()
        .map(PathBuf::from)
        .ok_or(FsError::PathUnresolved {
            reason: "executable path has no parent directory",
        })
}

fn resolve(capacity: usize) -> Result<PathBuf> {
    let path = Native::executable_path(capacity)?;
    tracing::trace!(path = %path.display(), "resolved binary path");
    Ok(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
