use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::note::{FILENAME_MAX, NOTE_EXT};

/// Smallest valid file: opened flag byte plus the terminating newline.
pub const HEADER_MIN: usize = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed config header in {path}: {reason}")]
    MalformedHeader { path: String, reason: &'static str },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A note as read back from disk: the header flag and the raw body.
#[derive(Debug, Clone)]
pub struct StoredNote {
    pub opened: bool,
    pub body: Vec<u8>,
}

/// Parse the one-line config header. Returns the opened flag and the
/// header length including the newline.
pub fn parse_header(bytes: &[u8]) -> Result<(bool, usize), &'static str> {
    let nl = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or("no newline terminating the config header")?;
    if nl + 1 < HEADER_MIN {
        return Err("missing opened flag before the newline");
    }
    if nl + 1 == bytes.len() {
        return Err("header occupies the entire file");
    }
    Ok((bytes[0] != 0, nl + 1))
}

pub fn load(path: &Path) -> Result<StoredNote, StoreError> {
    let bytes = fs::read(path)?;
    let (opened, header_len) =
        parse_header(&bytes).map_err(|reason| StoreError::MalformedHeader {
            path: path.display().to_string(),
            reason,
        })?;
    Ok(StoredNote { opened, body: bytes[header_len..].to_vec() })
}

/// Enumerate `*.hnote` files in `dir`, in directory order. Overlong
/// filenames, unreadable files, and malformed headers are skipped and
/// scanning continues.
pub fn scan(dir: &Path) -> io::Result<Vec<(String, StoredNote)>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("skipping unreadable directory entry: {err}");
                continue;
            }
        };
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(NOTE_EXT) {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if filename.len() > FILENAME_MAX {
            debug!("skipping {filename}: name exceeds {FILENAME_MAX} bytes");
            continue;
        }
        match load(&path) {
            Ok(stored) => found.push((filename.to_string(), stored)),
            Err(err @ StoreError::MalformedHeader { .. }) => {
                warn!("{err}; skipping");
            }
            Err(StoreError::Io(err)) => {
                debug!("skipping {filename}: {err}");
            }
        }
    }
    Ok(found)
}

/// Write the config header and body, discarding any prior contents.
/// Bodies of length <= 1 are treated as empty and never persisted; note
/// the cutoff sits at one byte, not zero.
pub fn save(path: &Path, opened: bool, body: &[u8]) -> io::Result<bool> {
    if body.len() <= 1 {
        return Ok(false);
    }
    let mut content = Vec::with_capacity(body.len() + HEADER_MIN);
    content.push(opened as u8);
    content.push(b'\n');
    content.extend_from_slice(body);
    fs::write(path, content)?;
    Ok(true)
}

/// Best-effort file removal; a missing file is not an error.
pub fn remove(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!("could not delete {}: {err}", path.display()),
    }
}
