use std::{ffi::OsStr, os::unix::ffi::OsStrExt, path::PathBuf};

use super::Posix;
use crate::{
    error::{FsError, Result},
    platform::PathResolver,
};

impl PathResolver for Posix {
    fn executable_path(capacity: usize) -> Result<PathBuf> {
        let bytes = query_self_path(capacity.max(2))?;
        let path = until_nul(&bytes);
        if path.is_empty() {
            return Err(FsError::PathUnresolved {
                reason: "the OS returned an empty executable path",
            });
        }
        Ok(PathBuf::from(OsStr::from_bytes(path)))
    }
}

/// Bytes up to, not including, the first NUL.
fn until_nul(buf: &[u8]) -> &[u8] {
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..len]
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "macos", target_os = "ios"))] {
        fn query_self_path(capacity: usize) -> Result<Vec<u8>> {
            let mut buf = vec![0u8; capacity];
            let mut bufsize = u32::try_from(capacity).unwrap_or(u32::MAX);

            // SAFETY: `buf` is writable for `bufsize` bytes and `bufsize`
            // outlives the call.  On success the result is NUL-terminated.
            let res = unsafe { libc::_NSGetExecutablePath(buf.as_mut_ptr().cast(), &mut bufsize) };

            // Non-zero means the buffer was too small; `bufsize` now holds
            // the required size, which we do not chase.
            if res != 0 {
                return Err(FsError::PathUnresolved {
                    reason: "executable path exceeds the path buffer",
                });
            }
            Ok(buf)
        }
    } else if #[cfg(target_os = "freebsd")] {
        fn query_self_path(capacity: usize) -> Result<Vec<u8>> {
            // Not every FreeBSD install mounts procfs, so ask the kernel.
            let mib = [
                libc::CTL_KERN,
                libc::KERN_PROC,
                libc::KERN_PROC_PATHNAME,
                -1,
            ];
            let mut buf = vec![0u8; capacity];
            let mut cb: libc::size_t = capacity;

            // SAFETY: `mib` holds four valid MIB entries; `buf` is writable
            // for `cb` bytes; no new value is being set.
            let res = unsafe {
                libc::sysctl(
                    mib.as_ptr(),
                    mib.len() as libc::c_uint,
                    buf.as_mut_ptr().cast(),
                    &mut cb,
                    std::ptr::null(),
                    0,
                )
            };

            if res != 0 {
                return Err(FsError::last_os("sysctl"));
            }
            Ok(buf)
        }
    } else {
        fn query_self_path(capacity: usize) -> Result<Vec<u8>> {
            // readlink does not terminate its result: start from zeros and
            // leave the last byte alone so the buffer is always a C string.
            let mut buf = vec![0u8; capacity];
            let link = c"/proc/self/exe";

            // SAFETY: `link` is a NUL-terminated literal; `buf` is writable
            // for `capacity - 1` bytes (capacity >= 2 is guaranteed above).
            let res = unsafe {
                libc::readlink(link.as_ptr(), buf.as_mut_ptr().cast(), capacity - 1)
            };

            if res == -1 {
                return Err(FsError::last_os("readlink"));
            }
            // Filling the whole request means the target may have been cut off.
            if res as usize >= capacity - 1 {
                return Err(FsError::PathUnresolved {
                    reason: "executable path exceeds the path buffer",
                });
            }
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn until_nul_stops_at_first_zero() {
        assert_eq!(until_nul(b"/bin/app\0\0junk"), b"/bin/app");
    }

    #[test]
    fn until_nul_without_terminator_takes_all() {
        assert_eq!(until_nul(b"/bin/app"), b"/bin/app");
    }

    #[test]
    fn tiny_buffer_is_an_error_not_a_truncated_path() {
        let err = Posix::executable_path(4).unwrap_err();
        assert!(matches!(
            err,
            FsError::PathUnresolved { .. } | FsError::Os { .. }
        ));
    }
}
