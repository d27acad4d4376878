// ── Win32 platform implementation ─────────────────────────────────────────────
//
// One of exactly two modules in the crate where `unsafe` code is permitted
// (the other is `platform::posix`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Paths cross this boundary as NUL-terminated UTF-16.

#![allow(unsafe_code)]

use std::{os::windows::ffi::OsStrExt, path::Path};

use crate::error::{FsError, Result};

mod file;
mod path;

/// Marker type selected as `platform::Native` on Windows.
pub(crate) struct Win32;

/// Encode `path` as a NUL-terminated wide string for `*W` APIs.
fn to_wide(path: &Path) -> Result<Vec<u16>> {
    let wide: Vec<u16> = path.as_os_str().encode_wide().collect();
    if wide.contains(&0) {
        return Err(FsError::InvalidPath(path.to_path_buf()));
    }
    Ok(wide.into_iter().chain(std::iter::once(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_path_is_nul_terminated() {
        let w = to_wide(Path::new(r"C:\a.txt")).expect("encode");
        assert_eq!(w.last(), Some(&0));
        assert_eq!(w.len(), r"C:\a.txt".len() + 1);
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = to_wide(Path::new("a\0b")).unwrap_err();
        assert!(matches!(err, FsError::InvalidPath(_)));
    }
}
