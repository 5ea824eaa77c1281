//! File plumbing shared by the assembler, the descriptor generator and the
//! verifier: reading descriptors and payloads, and all-or-nothing writes.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use imx_codify_core::header::decode_descriptor_bytes;
use imx_codify_core::{DESCRIPTOR_LEN, HeaderBytes};

use crate::error::CodifyError;

/// Suffix of the sibling file an output is staged in before it is renamed
/// into place.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Read the first [`DESCRIPTOR_LEN`] characters of a descriptor file and
/// decode them into header bytes.
pub fn read_descriptor(path: &Path) -> Result<HeaderBytes, CodifyError> {
    let file = File::open(path).map_err(|e| CodifyError::header_read(path, e))?;
    let mut text = Vec::with_capacity(DESCRIPTOR_LEN);
    file.take(DESCRIPTOR_LEN as u64)
        .read_to_end(&mut text)
        .map_err(|e| CodifyError::header_read(path, e))?;

    if text.len() < DESCRIPTOR_LEN {
        return Err(CodifyError::header_read(
            path,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "expected {} hex characters, file holds {}",
                    DESCRIPTOR_LEN,
                    text.len()
                ),
            ),
        ));
    }

    log::debug!("Descriptor text: {}", String::from_utf8_lossy(&text));
    decode_descriptor_bytes(&text).map_err(|e| CodifyError::decode(path, e))
}

/// Read a payload binary, dropping its first `skip` bytes.
///
/// The returned buffer holds exactly `file_size - skip` bytes. A file
/// shorter than `skip` is a [`CodifyError::PayloadRead`] with an
/// `UnexpectedEof` cause.
pub fn read_payload(path: &Path, skip: u64) -> Result<Vec<u8>, CodifyError> {
    let mut file = File::open(path).map_err(|e| CodifyError::payload_open(path, e))?;
    let file_size = file
        .seek(SeekFrom::End(0))
        .map_err(|e| CodifyError::payload_read(path, e))?;

    if file_size < skip {
        return Err(CodifyError::payload_read(
            path,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file holds {file_size} bytes, need at least {skip} to skip"),
            ),
        ));
    }

    file.seek(SeekFrom::Start(skip))
        .map_err(|e| CodifyError::payload_read(path, e))?;
    let mut payload = Vec::with_capacity((file_size - skip) as usize);
    file.read_to_end(&mut payload)
        .map_err(|e| CodifyError::payload_read(path, e))?;

    log::debug!(
        "Read {} payload bytes from {} (skipped {})",
        payload.len(),
        path.display(),
        skip
    );
    Ok(payload)
}

/// Path of the staging file used while `path` is being written.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Write a file so that `path` either receives the complete contents or is
/// left untouched.
///
/// Contents go to a `.part` sibling first, are flushed and synced, then
/// renamed over `path`. On any failure the staging file is removed. An
/// existing `path` is resolved first, so a symlink keeps pointing at the
/// freshly written file.
pub fn write_atomically<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = partial_path(&target);
    let result = stage_and_rename(&tmp, &target, write);
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("Could not remove {}: {}", tmp.display(), e);
            }
        }
    }
    result
}

fn stage_and_rename<F>(tmp: &Path, path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut writer = BufWriter::new(File::create(tmp)?);
    write(&mut writer)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}

#[cfg(test)]
#[path = "tests/files_tests.rs"]
mod tests;
