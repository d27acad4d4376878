use std::path::Path;

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE},
        Storage::FileSystem::{
            CreateFileW, GetFileSize, ReadFile, WriteFile, CREATE_ALWAYS,
            FILE_ATTRIBUTE_NORMAL, FILE_FLAGS_AND_ATTRIBUTES, FILE_SHARE_MODE,
            FILE_SHARE_WRITE, INVALID_FILE_SIZE, OPEN_EXISTING,
        },
    },
};

use super::{to_wide, Win32};
use crate::{
    error::{FsError, Result},
    platform::FileIo,
};

/// `ReadFile` / `WriteFile` take a DWORD byte count.
fn dword_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| FsError::ChunkTooLarge { len })
}

impl FileIo for Win32 {
    type Raw = HANDLE;

    fn open_for_reading(path: &Path) -> Result<HANDLE> {
        let wide = to_wide(path)?;
        // SAFETY: `wide` is NUL-terminated and outlives the call.  No security
        // attributes and no template handle are passed.
        let handle = unsafe {
            CreateFileW(
                PCWSTR(wide.as_ptr()),
                GENERIC_READ.0,
                FILE_SHARE_MODE(0),
                None,
                OPEN_EXISTING,
                FILE_ATTRIBUTE_NORMAL,
                HANDLE::default(),
            )
        }
        .map_err(FsError::win32("CreateFileW"))?;
        Ok(handle)
    }

    fn create_for_writing(path: &Path) -> Result<HANDLE> {
        let wide = to_wide(path)?;
        // SAFETY: same invariants as open_for_reading above.
        let handle = unsafe {
            CreateFileW(
                PCWSTR(wide.as_ptr()),
                GENERIC_WRITE.0,
                FILE_SHARE_WRITE,
                None,
                CREATE_ALWAYS,
                FILE_FLAGS_AND_ATTRIBUTES(0),
                HANDLE::default(),
            )
        }
        .map_err(FsError::win32("CreateFileW"))?;
        Ok(handle)
    }

    fn read_chunk(raw: &mut HANDLE, buf: &mut [u8]) -> Result<()> {
        let requested = buf.len();
        dword_len(requested)?;
        let mut transferred = 0u32;

        // SAFETY: `raw` is an open handle owned by the caller.  `buf` is a
        // live, writable slice whose length the windows crate passes as
        // nNumberOfBytesToRead; `transferred` outlives the synchronous call.
        unsafe { ReadFile(*raw, Some(buf), Some(&mut transferred as *mut u32), None) }
            .map_err(FsError::win32("ReadFile"))?;

        if transferred as usize != requested {
            return Err(FsError::ShortRead {
                requested,
                transferred: transferred as usize,
            });
        }
        Ok(())
    }

    fn write_chunk(raw: &mut HANDLE, buf: &[u8]) -> Result<()> {
        let requested = buf.len();
        dword_len(requested)?;
        let mut written = 0u32;

        // SAFETY: same invariants as read_chunk; `buf` is only read.
        unsafe { WriteFile(*raw, Some(buf), Some(&mut written as *mut u32), None) }
            .map_err(FsError::win32("WriteFile"))?;

        if written as usize != requested {
            return Err(FsError::ShortWrite {
                requested,
                written: written as usize,
            });
        }
        Ok(())
    }

    /// Low 32 bits only: files of 4 GiB or more report a wrapped size.
    /// Accepted limitation of this backend.
    fn size(raw: &mut HANDLE) -> Result<i64> {
        // SAFETY: `raw` is an open handle.  Passing no high-word pointer is
        // allowed; GetFileSize does not move the file pointer.
        let size = unsafe { GetFileSize(*raw, None) };
        if size == INVALID_FILE_SIZE {
            return Err(FsError::last_os("GetFileSize"));
        }
        Ok(i64::from(size))
    }

    fn close(raw: HANDLE) -> Result<()> {
        // SAFETY: `raw` is consumed here; the caller never uses it again.
        unsafe { CloseHandle(raw) }.map_err(FsError::win32("CloseHandle"))?;
        Ok(())
    }
}
