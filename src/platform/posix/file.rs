use std::{path::Path, ptr::NonNull};

use super::{to_cstring, Posix};
use crate::{
    error::{FsError, Result},
    platform::FileIo,
};

/// An open stdio stream.  Never null; closed exactly once via `FileIo::close`.
#[derive(Debug)]
pub(crate) struct Stream(NonNull<libc::FILE>);

impl Stream {
    fn as_ptr(&self) -> *mut libc::FILE {
        self.0.as_ptr()
    }
}

fn fopen(path: &Path, mode: &std::ffi::CStr) -> Result<Stream> {
    let c_path = to_cstring(path)?;
    // SAFETY: both arguments are NUL-terminated and outlive the call.
    let file = unsafe { libc::fopen(c_path.as_ptr(), mode.as_ptr()) };
    NonNull::new(file)
        .map(Stream)
        .ok_or_else(|| FsError::last_os("fopen"))
}

fn seek(stream: &Stream, offset: libc::off_t, whence: libc::c_int) -> Result<()> {
    // SAFETY: `stream` is an open FILE*.
    if unsafe { libc::fseeko(stream.as_ptr(), offset, whence) } != 0 {
        return Err(FsError::last_os("fseeko"));
    }
    Ok(())
}

fn tell(stream: &Stream) -> Result<libc::off_t> {
    // SAFETY: `stream` is an open FILE*.
    let pos = unsafe { libc::ftello(stream.as_ptr()) };
    if pos < 0 {
        return Err(FsError::last_os("ftello"));
    }
    Ok(pos)
}

impl FileIo for Posix {
    type Raw = Stream;

    fn open_for_reading(path: &Path) -> Result<Stream> {
        fopen(path, c"rb")
    }

    fn create_for_writing(path: &Path) -> Result<Stream> {
        fopen(path, c"wb")
    }

    fn read_chunk(raw: &mut Stream, buf: &mut [u8]) -> Result<()> {
        let requested = buf.len();
        // SAFETY: `buf` is writable for `requested` bytes; `raw` is open.
        let transferred =
            unsafe { libc::fread(buf.as_mut_ptr().cast(), 1, requested, raw.as_ptr()) };

        if transferred != requested {
            return Err(FsError::ShortRead {
                requested,
                transferred,
            });
        }
        Ok(())
    }

    fn write_chunk(raw: &mut Stream, buf: &[u8]) -> Result<()> {
        let requested = buf.len();
        // SAFETY: `buf` is readable for `requested` bytes; `raw` is open.
        let written = unsafe { libc::fwrite(buf.as_ptr().cast(), 1, requested, raw.as_ptr()) };

        if written != requested {
            return Err(FsError::ShortWrite { requested, written });
        }
        Ok(())
    }

    fn size(raw: &mut Stream) -> Result<i64> {
        let original = tell(raw)?;
        seek(raw, 0, libc::SEEK_END)?;
        let end = tell(raw);
        // Restore even when the end position could not be read.
        seek(raw, original, libc::SEEK_SET)?;
        Ok(i64::from(end?))
    }

    fn close(raw: Stream) -> Result<()> {
        // SAFETY: `raw` is consumed; the stream is released exactly once and
        // never touched again, whatever fclose returns.
        if unsafe { libc::fclose(raw.as_ptr()) } != 0 {
            return Err(FsError::last_os("fclose"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};

    use crate::file::FileHandle;

    #[test]
    fn size_of_unseekable_stream_is_sentinel() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fifo = dir.path().join("pipe");
        let c_fifo = CString::new(fifo.as_os_str().as_bytes()).expect("cstring");
        // SAFETY: `c_fifo` is NUL-terminated and outlives the call.
        assert_eq!(unsafe { libc::mkfifo(c_fifo.as_ptr(), 0o600) }, 0, "mkfifo");

        // Opening either end of a FIFO blocks until the other end is opened.
        let writer_path = fifo.clone();
        let writer = std::thread::spawn(move || {
            std::fs::OpenOptions::new()
                .write(true)
                .open(writer_path)
                .expect("open fifo for writing")
        });

        let mut input = FileHandle::open_for_reading(&fifo).expect("open fifo for reading");
        assert!(input.size().is_err());
        assert_eq!(input.size_or_sentinel(), -1);

        drop(writer.join().expect("writer thread"));
        input.close().expect("close");
    }
}
