// ── POSIX platform implementation ─────────────────────────────────────────────
//
// One of exactly two modules in the crate where `unsafe` code is permitted
// (the other is `platform::win32`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment.
//
// Files are stdio `FILE*` streams; paths cross this boundary as
// NUL-terminated bytes.

#![allow(unsafe_code)]

use std::{ffi::CString, os::unix::ffi::OsStrExt, path::Path};

use crate::error::{FsError, Result};

mod file;
mod path;

/// Marker type selected as `platform::Native` on Unix.
pub(crate) struct Posix;

/// Encode `path` as a C string for libc calls.
fn to_cstring(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| FsError::InvalidPath(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cstring_keeps_bytes() {
        let c = to_cstring(Path::new("/tmp/a b.txt")).expect("encode");
        assert_eq!(c.as_bytes(), b"/tmp/a b.txt");
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = to_cstring(Path::new("a\0b")).unwrap_err();
        assert!(matches!(err, FsError::InvalidPath(_)));
    }
}
