// ── Chunked whole-file copy ───────────────────────────────────────────────────
//
// Built only from the `FileHandle` primitives; nothing platform-specific.

use std::{fs, path::Path};

use crate::{
    config::IoConfig,
    error::{FsError, Result},
    file::FileHandle,
};

/// Copy `src` to `dst` (created or truncated) in `config.chunk_size()` pieces.
///
/// Returns the number of bytes copied.  Copying a file onto itself is
/// `FsError::SameFile` and leaves it untouched.  Otherwise the first failing
/// primitive stops the copy and its error is returned; `dst` may then hold
/// a prefix.
pub fn copy_file(src: &Path, dst: &Path, config: &IoConfig) -> Result<u64> {
    config.validate()?;

    // Creating `dst` truncates it, so this check must come first.
    let src_real = fs::canonicalize(src)?;
    if fs::canonicalize(dst).is_ok_and(|dst_real| dst_real == src_real) {
        return Err(FsError::SameFile(src_real));
    }

    let mut input = FileHandle::open_for_reading(src)?;

    let total = u64::try_from(input.size()?).unwrap_or(0);
    let mut output = FileHandle::create_for_writing(dst)?;

    // Never allocate more than the file needs.
    let buf_len = usize::try_from(total).map_or(config.chunk_size(), |t| t.min(config.chunk_size()));
    let mut buf = vec![0u8; buf_len];
    let mut remaining = total;

    while remaining > 0 {
        let n = remaining.min(buf.len() as u64) as usize;
        input.read_chunk(&mut buf[..n])?;
        output.write_chunk(&buf[..n])?;
        remaining -= n as u64;
    }

    input.close()?;
    output.close()?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), bytes = total, "copied file");
    Ok(total)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
