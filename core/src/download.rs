//! Staged writes for downloaded files.
//!
//! The body is streamed into a temporary file next to the destination and
//! only renamed over it once every byte is on disk. If anything fails the
//! temporary file is dropped (and deleted) and the destination keeps its
//! previous contents.

use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{CrowdinError, Result, TransportError};

const CHUNK_SIZE: usize = 64 * 1024;

/// Copy `body` into `destination`, returning the number of bytes written.
///
/// Read failures are transport errors; write failures are local I/O errors.
pub(crate) fn write_atomically(destination: &Path, body: &mut dyn Read) -> Result<u64> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)
        .map_err(|e| CrowdinError::io("create temporary file in", parent, e))?;

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransportError::body(e).into()),
        };
        staged
            .write_all(&buf[..n])
            .map_err(|e| CrowdinError::io("write", staged.path().to_path_buf(), e))?;
        written += n as u64;
    }

    staged
        .as_file()
        .sync_all()
        .map_err(|e| CrowdinError::io("sync", staged.path().to_path_buf(), e))?;
    staged
        .persist(destination)
        .map_err(|e| CrowdinError::io("rename download to", destination, e.error))?;
    Ok(written)
}
