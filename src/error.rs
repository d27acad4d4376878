// ── Central error type ────────────────────────────────────────────────────────
//
// Every recoverable operation in platfile returns `error::Result<T>`.  The only
// non-recoverable path is `binary_path_or_abort`, which never returns an error.

use std::path::PathBuf;

/// Every error that platfile can produce.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// A native OS call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Os {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// `GetLastError()` on Windows, `errno` elsewhere, captured right
        /// after the failing call.
        code: u32,
    },

    /// A standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes than requested were read (EOF included).
    #[error("short read: requested {requested} bytes, got {transferred}")]
    ShortRead { requested: usize, transferred: usize },

    /// Fewer bytes than requested were written.
    #[error("short write: requested {requested} bytes, wrote {written}")]
    ShortWrite { requested: usize, written: usize },

    /// The chunk does not fit the native call's 32-bit length.
    #[error("chunk of {len} bytes exceeds the native transfer limit")]
    ChunkTooLarge { len: usize },

    /// The path cannot be expressed in the platform-native form
    /// (interior NUL, for instance).
    #[error("path cannot be passed to the OS: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The OS reported success but produced no usable executable path.
    #[error("cannot resolve the running binary's path: {reason}")]
    PathUnresolved { reason: &'static str },

    /// Source and destination of a copy are the same file.
    #[error("refusing to copy {} onto itself", .0.display())]
    SameFile(PathBuf),

    /// The configuration file is not valid JSON for `IoConfig`.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value parsed but is outside its accepted range.
    #[error("invalid configuration: {field} = {value} exceeds {max}")]
    ConfigRange {
        field: &'static str,
        value: usize,
        max: usize,
    },
}

impl FsError {
    /// Build an `Os` error from the calling thread's last OS error.
    ///
    /// Must be called immediately after the failing native call, before
    /// anything else can overwrite `errno` / `GetLastError()`.
    pub(crate) fn last_os(function: &'static str) -> Self {
        let code = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        // Reinterpret bits: Win32 codes are DWORDs, errno values are small.
        Self::Os {
            function,
            code: code as u32,
        }
    }
}

// Map a windows-crate error (HRESULT) into an FsError naming the failing
// call, for use as `.map_err(FsError::win32("CreateFileW"))?`.
#[cfg(windows)]
impl FsError {
    pub(crate) fn win32(function: &'static str) -> impl FnOnce(windows::core::Error) -> Self {
        move |e| {
            // Win32 errors appear as 0x8007xxxx HRESULTs.
            Self::Os {
                function,
                code: e.code().0 as u32,
            }
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FsError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
