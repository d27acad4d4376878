// ── Owned file handle ─────────────────────────────────────────────────────────
//
// Safe wrapper over `platform::Native`'s raw handle.  No `unsafe` here.
//
// Ownership carries the open/close contract: `close` consumes the handle, so
// it cannot be used afterwards, and a handle that is merely dropped is closed
// by `Drop`.

use std::path::Path;

use crate::{
    error::Result,
    platform::{FileIo, Native},
};

type Raw = <Native as FileIo>::Raw;

/// An open file, owned by exactly one caller until `close` or drop.
///
/// Not `Send`: the native handle stays on the thread that opened it.
#[derive(Debug)]
pub struct FileHandle {
    // `None` only after `close` has taken the handle out.
    raw: Option<Raw>,
}

impl FileHandle {
    /// Open an existing file for reading.
    ///
    /// Fails (recoverably) if `path` does not exist or cannot be accessed.
    pub fn open_for_reading(path: &Path) -> Result<Self> {
        match Native::open_for_reading(path) {
            Ok(raw) => Ok(Self { raw: Some(raw) }),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "open for reading failed");
                Err(e)
            }
        }
    }

    /// Create `path`, truncating it if it already exists, and open it for
    /// writing.
    pub fn create_for_writing(path: &Path) -> Result<Self> {
        match Native::create_for_writing(path) {
            Ok(raw) => Ok(Self { raw: Some(raw) }),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "create for writing failed");
                Err(e)
            }
        }
    }

    /// Fill `buf` completely from the current position.
    ///
    /// Any short read, EOF included, is `FsError::ShortRead`.  There is no
    /// partial success and no retry.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        Native::read_chunk(self.raw_mut(), buf).inspect_err(|e| {
            tracing::debug!(len, error = %e, "read chunk failed");
        })
    }

    /// Write all of `buf` at the current position.
    pub fn write_chunk(&mut self, buf: &[u8]) -> Result<()> {
        let len = buf.len();
        Native::write_chunk(self.raw_mut(), buf).inspect_err(|e| {
            tracing::debug!(len, error = %e, "write chunk failed");
        })
    }

    /// Total length of the file in bytes.
    ///
    /// The read/write position is the same after the call as before it.
    /// On Windows only the low 32 bits of the size are reported, so files of
    /// 4 GiB or more come back wrapped.
    pub fn size(&mut self) -> Result<i64> {
        Native::size(self.raw_mut())
    }

    /// `size()` with the `-1 on failure` convention.
    pub fn size_or_sentinel(&mut self) -> i64 {
        self.size().unwrap_or(-1)
    }

    /// Release the handle, reporting a failing close.
    pub fn close(mut self) -> Result<()> {
        match self.raw.take() {
            Some(raw) => Native::close(raw),
            None => Ok(()),
        }
    }

    fn raw_mut(&mut self) -> &mut Raw {
        // `raw` is only emptied by `close`, which consumes `self`.
        match self.raw.as_mut() {
            Some(raw) => raw,
            None => unreachable!("FileHandle used after close"),
        }
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            if let Err(e) = Native::close(raw) {
                tracing::warn!(error = %e, "closing dropped file handle failed");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsError;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn write_close_reopen_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("payload.bin");
        let data = sample(10_000);

        let mut out = FileHandle::create_for_writing(&path).expect("create");
        for chunk in data.chunks(3_000) {
            out.write_chunk(chunk).expect("write");
        }
        out.close().expect("close writer");

        let mut input = FileHandle::open_for_reading(&path).expect("open");
        assert_eq!(input.size().expect("size"), data.len() as i64);
        let mut back = vec![0u8; data.len()];
        input.read_chunk(&mut back).expect("read");
        assert_eq!(back, data);
        input.close().expect("close reader");
    }

    #[test]
    fn read_past_eof_fails_with_counts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("short.bin");
        std::fs::write(&path, b"hello").expect("seed");

        let mut input = FileHandle::open_for_reading(&path).expect("open");
        let mut buf = [0u8; 8];
        let err = input.read_chunk(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            FsError::ShortRead {
                requested: 8,
                transferred: 5
            }
        ));
    }

    #[test]
    fn size_keeps_write_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pos.bin");

        let mut out = FileHandle::create_for_writing(&path).expect("create");
        out.write_chunk(b"abcd").expect("write head");
        assert_eq!(out.size().expect("size"), 4);
        out.write_chunk(b"efgh").expect("write tail");
        out.close().expect("close");

        assert_eq!(std::fs::read(&path).expect("read back"), b"abcdefgh");
    }

    #[test]
    fn size_keeps_read_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pos.bin");
        std::fs::write(&path, b"0123456789").expect("seed");

        let mut input = FileHandle::open_for_reading(&path).expect("open");
        let mut head = [0u8; 3];
        input.read_chunk(&mut head).expect("read head");
        assert_eq!(input.size().expect("size"), 10);
        let mut rest = [0u8; 7];
        input.read_chunk(&mut rest).expect("read rest");
        assert_eq!(&head, b"012");
        assert_eq!(&rest, b"3456789");
    }

    #[test]
    fn open_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FileHandle::open_for_reading(&dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, FsError::Os { .. }));
    }

    #[test]
    fn os_errors_name_the_failing_call() {
        let dir = tempfile::tempdir().expect("tempdir");
        let expected = if cfg!(windows) { "CreateFileW" } else { "fopen" };

        let err = FileHandle::open_for_reading(&dir.path().join("nope.bin")).unwrap_err();
        assert!(
            matches!(err, FsError::Os { function, .. } if function == expected),
            "unexpected error: {err}"
        );

        let err = FileHandle::create_for_writing(&dir.path().join("no-dir").join("x.bin")).unwrap_err();
        assert!(
            matches!(err, FsError::Os { function, .. } if function == expected),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn create_in_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no-such-dir").join("out.bin");
        assert!(FileHandle::create_for_writing(&path).is_err());
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("old.bin");
        std::fs::write(&path, b"previous contents").expect("seed");

        let mut out = FileHandle::create_for_writing(&path).expect("create");
        out.write_chunk(b"new").expect("write");
        out.close().expect("close");

        assert_eq!(std::fs::read(&path).expect("read back"), b"new");
    }

    #[test]
    fn empty_chunks_succeed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.bin");

        let mut out = FileHandle::create_for_writing(&path).expect("create");
        out.write_chunk(&[]).expect("empty write");
        out.close().expect("close");

        let mut input = FileHandle::open_for_reading(&path).expect("open");
        assert_eq!(input.size_or_sentinel(), 0);
        input.read_chunk(&mut []).expect("empty read");
        input.close().expect("close");
    }

    #[test]
    fn dropped_handle_releases_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dropped.bin");
        {
            let mut out = FileHandle::create_for_writing(&path).expect("create");
            out.write_chunk(b"flushed on drop").expect("write");
        }
        assert_eq!(std::fs::read(&path).expect("read back"), b"flushed on drop");
    }
}
