use std::{ffi::OsString, os::windows::ffi::OsStringExt, path::PathBuf};

use windows::Win32::{Foundation::HMODULE, System::LibraryLoader::GetModuleFileNameW};

use super::Win32;
use crate::{
    error::{FsError, Result},
    platform::PathResolver,
};

impl PathResolver for Win32 {
    fn executable_path(capacity: usize) -> Result<PathBuf> {
        let mut buf = vec![0u16; capacity.max(1)];

        // SAFETY: a null HMODULE names the executable of the current process.
        // `buf` is a live, writable slice; the windows crate passes its length
        // as nSize so the call never writes past the end.
        let len = unsafe { GetModuleFileNameW(HMODULE::default(), &mut buf) } as usize;

        if len == 0 {
            return Err(FsError::last_os("GetModuleFileNameW"));
        }
        // A full buffer means the name was truncated (ERROR_INSUFFICIENT_BUFFER).
        if len >= buf.len() {
            return Err(FsError::PathUnresolved {
                reason: "module file name exceeds the path buffer",
            });
        }

        Ok(PathBuf::from(OsString::from_wide(&buf[..len])))
    }
}
