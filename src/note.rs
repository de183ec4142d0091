use chrono::Local;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::editor::EditorSurface;

/// Longest preview kept for the visible list, in bytes.
pub const PREVIEW_MAX: usize = 32;
/// Note filenames longer than this are skipped during a directory scan.
pub const FILENAME_MAX: usize = 32;
pub const NOTE_EXT: &str = "hnote";
/// Placeholder shown for notes whose body is empty.
pub const EMPTY_PREVIEW: &str = "Empty Note";

/// Process-local note identifier, assigned from a monotonic counter.
pub type NoteId = u32;

/// In-memory representation of one note: metadata, cached preview, and
/// the editor surface while the note is open.
#[derive(Debug, Clone)]
pub struct NoteRecord {
    pub id: NoteId,
    pub filename: String,
    pub preview: String,
    pub opened: bool,
    pub changes: bool,
    pub editor: Option<EditorSurface>,
}

impl NoteRecord {
    /// Filename without the `.hnote` extension, the user-facing name.
    pub fn stem(&self) -> &str {
        self.filename
            .strip_suffix(&format!(".{NOTE_EXT}"))
            .unwrap_or(&self.filename)
    }
}

pub fn notes_dir() -> PathBuf {
    if let Ok(dir) = env::var("HOSE_NOTES_DIR") {
        return PathBuf::from(dir);
    }
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join("hose"),
        // No home directory; keep notes next to wherever we were launched.
        Err(_) => PathBuf::from("."),
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn note_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}

/// Generate a fresh `<timestamp>.hnote` filename that collides neither
/// with files already in `dir` nor with `reserved` names. Fresh notes
/// stay off disk until their first flush, so the caller must reserve the
/// filenames of live records.
pub fn generate_filename(
    dir: &Path,
    reserved: &HashSet<String>,
) -> io::Result<String> {
    let base = Local::now().timestamp().to_string();
    for suffix in 0..5000 {
        let name = if suffix == 0 {
            format!("{base}.{NOTE_EXT}")
        } else {
            format!("{base}-{suffix}.{NOTE_EXT}")
        };
        if name.len() > FILENAME_MAX {
            break;
        }
        if !reserved.contains(&name) && !note_path(dir, &name).exists() {
            return Ok(name);
        }
    }
    Err(io::Error::other("could not generate a unique note filename"))
}

/// Derive the list preview from a note body: the first `PREVIEW_MAX`
/// bytes, or the canonical placeholder when the body is empty.
pub fn derive_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }
    let cut = body.len().min(PREVIEW_MAX);
    String::from_utf8_lossy(&body[..cut]).into_owned()
}
