// ── I/O configuration ─────────────────────────────────────────────────────────
//
// Reads `platfile.json` beside the running binary.
// No `unsafe`; pure safe Rust + serde_json.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    binary_path::binary_directory,
    error::{FsError, Result},
    platform::DEFAULT_PATH_CAPACITY,
};

/// Transfer size used by `copy_file` when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1_024;

/// Largest accepted `chunk_size`.
pub const MAX_CHUNK_SIZE: usize = 64 * 1_024 * 1_024;

/// Largest accepted `path_capacity`: the `\\?\` extended-path limit.
pub const MAX_PATH_CAPACITY: usize = 32_768;

/// File name looked up next to the running binary.
const CONFIG_FILE_NAME: &str = "platfile.json";

/// Tunables for the chunked helpers and self-path lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to `IoConfig::default()`
pub struct IoConfig {
    /// Bytes moved per `read_chunk`/`write_chunk` call in `copy_file`.
    /// `0` means `DEFAULT_CHUNK_SIZE`.
    pub chunk_size: usize,
    /// Capacity of the self-path buffer, in native path units
    /// (`WCHAR`s on Windows, bytes elsewhere).
    pub path_capacity: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            path_capacity: DEFAULT_PATH_CAPACITY,
        }
    }
}

impl IoConfig {
    /// Parse a JSON document, surfacing syntax, type and range errors.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its limit.
    ///
    /// Both values size heap buffers, so anything out of range is refused
    /// before an allocation is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(FsError::ConfigRange {
                field: "chunk_size",
                value: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        if self.path_capacity > MAX_PATH_CAPACITY {
            return Err(FsError::ConfigRange {
                field: "path_capacity",
                value: self.path_capacity,
                max: MAX_PATH_CAPACITY,
            });
        }
        Ok(())
    }

    /// `platfile.json` in the running binary's directory.
    pub fn config_path() -> Option<PathBuf> {
        binary_directory().ok().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Read and parse the config file.
    ///
    /// Returns `None` on any error: file missing, unreadable, or malformed.
    /// Callers continue with `IoConfig::default()`.
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// `load()` for an explicit file.
    pub fn load_from(path: &Path) -> Option<Self> {
        let data = fs::read_to_string(path).ok()?;
        match Self::from_json(&data) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Effective chunk size, never zero.
    pub fn chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
