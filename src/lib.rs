// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 FFI
//   • `platform::posix` – libc FFI
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Minimal cross-platform file primitives.
//!
//! Locates the running executable and offers open / read / write / size /
//! close over an owned [`FileHandle`], so a host runtime never has to branch
//! on the operating system itself.
//!
//! Failure policy is two-tier: [`binary_path_or_abort`] aborts the process
//! when the executable cannot be located, every other operation returns
//! [`Result`].

mod binary_path;
mod config;
mod copy;
mod error;
mod file;
mod platform;

pub use binary_path::{binary_directory, binary_path, binary_path_or_abort, binary_path_with};
pub use config::{IoConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MAX_PATH_CAPACITY};
pub use copy::copy_file;
pub use error::{FsError, Result};
pub use file::FileHandle;
