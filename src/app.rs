use log::debug;
use std::io;
use std::path::{Path, PathBuf};

use crate::editor::EditorSurface;
use crate::list::ListProjection;
use crate::note::{self, NoteId, NoteRecord};
use crate::registry::Registry;
use crate::store;

/// Application state: the note registry, its list projection, and the
/// notes directory. Constructed once at startup and passed to every
/// handler; nothing note-related lives in globals.
#[derive(Debug)]
pub struct App {
    dir: PathBuf,
    registry: Registry,
    list: ListProjection,
    next_id: NoteId,
}

impl App {
    /// Scan the notes directory and populate the registry and list.
    /// Notes whose header flag says they were open at last save get
    /// their editor surface reattached immediately.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        note::ensure_dir(&dir)?;
        let mut app = Self {
            dir,
            registry: Registry::new(),
            list: ListProjection::new(),
            next_id: 0,
        };
        for (filename, stored) in store::scan(&app.dir)? {
            let id = app.alloc_id();
            let preview = note::derive_preview(&stored.body);
            let editor = stored.opened.then(|| {
                EditorSurface::with_text(String::from_utf8_lossy(&stored.body))
            });
            app.registry.insert(NoteRecord {
                id,
                filename,
                preview: preview.clone(),
                opened: stored.opened,
                changes: false,
                editor,
            });
            app.list.append(id, &preview);
        }
        Ok(app)
    }

    fn alloc_id(&mut self) -> NoteId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a new note: fresh filename, empty editor surface, dirty
    /// from the start. Nothing touches disk until a flush with a
    /// nontrivial body.
    pub fn create(&mut self) -> io::Result<NoteId> {
        let reserved =
            self.registry.iter().map(|n| n.filename.clone()).collect();
        let filename = note::generate_filename(&self.dir, &reserved)?;
        let id = self.alloc_id();
        let preview = note::EMPTY_PREVIEW.to_string();
        self.registry.insert(NoteRecord {
            id,
            filename,
            preview: preview.clone(),
            opened: true,
            changes: true,
            editor: Some(EditorSurface::new()),
        });
        self.list.append(id, &preview);
        Ok(id)
    }

    /// Attach an editor surface to an existing note, loading its body
    /// from disk. Unknown ids and already-open notes are no-ops, as is
    /// a note whose file has gone unreadable.
    pub fn open_note(&mut self, id: NoteId) {
        let dir = self.dir.clone();
        let Some(rec) = self.registry.get_mut(id) else { return };
        if rec.opened {
            return;
        }
        let stored = match store::load(&note::note_path(&dir, &rec.filename)) {
            Ok(stored) => stored,
            Err(err) => {
                debug!("cannot open {}: {err}", rec.filename);
                return;
            }
        };
        rec.editor = Some(EditorSurface::with_text(String::from_utf8_lossy(
            &stored.body,
        )));
        rec.opened = true;
        rec.changes = false;
    }

    /// Replace the open note's text: marks it dirty, re-derives the
    /// preview, and resyncs the list row. No-op when the id is unknown
    /// or the note has no surface.
    pub fn edit(&mut self, id: NoteId, text: &str) {
        let Some(rec) = self.registry.get_mut(id) else { return };
        let Some(editor) = rec.editor.as_mut() else { return };
        editor.set_text(text);
        rec.changes = true;
        rec.preview = note::derive_preview(editor.text().as_bytes());
        let preview = rec.preview.clone();
        self.list.refresh(id, &preview);
    }

    /// Close the editor surface: flush the body if dirty (with the
    /// opened flag cleared, so the note stays closed across restarts),
    /// then tear the surface down.
    pub fn close(&mut self, id: NoteId) -> io::Result<()> {
        let dir = self.dir.clone();
        let Some(rec) = self.registry.get_mut(id) else { return Ok(()) };
        if !rec.opened {
            return Ok(());
        }
        rec.opened = false;
        if rec.changes {
            if let Some(editor) = rec.editor.as_ref() {
                store::save(
                    &note::note_path(&dir, &rec.filename),
                    false,
                    editor.text().as_bytes(),
                )?;
            }
        }
        rec.changes = false;
        rec.editor = None;
        Ok(())
    }

    /// Delete unconditionally: disk file, registry record, and list row.
    /// Skips the dirty flush entirely. Unknown ids are a no-op.
    pub fn delete(&mut self, id: NoteId) {
        let Some(rec) = self.registry.remove(id) else { return };
        store::remove(&note::note_path(&self.dir, &rec.filename));
        self.list.remove(id);
    }

    /// Shutdown flush: write every dirty note with its current opened
    /// flag, so still-open notes come back open on the next start.
    pub fn flush_all(&mut self) -> io::Result<()> {
        let dir = self.dir.clone();
        for rec in self.registry.iter_mut() {
            if !rec.changes {
                continue;
            }
            if let Some(editor) = rec.editor.as_ref() {
                store::save(
                    &note::note_path(&dir, &rec.filename),
                    rec.opened,
                    editor.text().as_bytes(),
                )?;
            }
            rec.changes = false;
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn find(&self, id: NoteId) -> Option<&NoteRecord> {
        self.registry.get(id)
    }

    pub fn find_by_stem(&self, stem: &str) -> Option<&NoteRecord> {
        self.registry.iter().find(|rec| rec.stem() == stem)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn list(&self) -> &ListProjection {
        &self.list
    }
}
