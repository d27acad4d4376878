// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface that the rest of the crate uses to talk
// to the OS.  No `unsafe` lives here; all FFI is confined to the `win32` and
// `posix` sub-modules and never leaks outward.
//
// Exactly one backend is compiled in and exported as `Native`.

use std::path::{Path, PathBuf};

use crate::error::Result;

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        pub(crate) mod win32;
        pub(crate) use self::win32::Win32 as Native;
    } else if #[cfg(unix)] {
        pub(crate) mod posix;
        pub(crate) use self::posix::Posix as Native;
    }
}

/// Default capacity of the self-path buffer, in native path units.
///
/// Windows counts `WCHAR`s and allows 32 767 for `\\?\` extended paths;
/// everywhere else this is the customary `PATH_MAX`.
#[cfg(windows)]
pub(crate) const DEFAULT_PATH_CAPACITY: usize = 32_768;
#[cfg(not(windows))]
pub(crate) const DEFAULT_PATH_CAPACITY: usize = 4_096;

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Locates the currently executing binary.
pub(crate) trait PathResolver {
    /// Absolute path of the running executable.
    ///
    /// `capacity` is the size of the scratch buffer in native units.  A path
    /// that does not fit is an error, never a silently truncated result.
    fn executable_path(capacity: usize) -> Result<PathBuf>;
}

/// Primitive file operations over an owned native handle.
///
/// Every `Raw` produced by `open_for_reading` / `create_for_writing` must be
/// passed to `close` exactly once; `file::FileHandle` upholds that.
pub(crate) trait FileIo {
    type Raw;

    fn open_for_reading(path: &Path) -> Result<Self::Raw>;
    fn create_for_writing(path: &Path) -> Result<Self::Raw>;

    /// Fill `buf` completely or fail with `ShortRead`.
    fn read_chunk(raw: &mut Self::Raw, buf: &mut [u8]) -> Result<()>;

    /// Write all of `buf` or fail with `ShortWrite`.
    fn write_chunk(raw: &mut Self::Raw, buf: &[u8]) -> Result<()>;

    /// Total length of the file.  Leaves the file position untouched.
    fn size(raw: &mut Self::Raw) -> Result<i64>;

    fn close(raw: Self::Raw) -> Result<()>;
}
