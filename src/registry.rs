use crate::note::{NoteId, NoteRecord};

/// In-memory collection of live notes. Insertion appends; deletion is an
/// O(1) swap-remove, so slot positions are not stable across removals.
/// The API is id-keyed throughout; positions are never exposed.
#[derive(Debug, Default)]
pub struct Registry {
    notes: Vec<NoteRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record and hand back its id. Uniqueness of ids is the
    /// caller's responsibility (a monotonic counter in practice).
    pub fn insert(&mut self, note: NoteRecord) -> NoteId {
        let id = note.id;
        self.notes.push(note);
        id
    }

    pub fn get(&self, id: NoteId) -> Option<&NoteRecord> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut NoteRecord> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Remove by id, filling the hole with the last record.
    pub fn remove(&mut self, id: NoteId) -> Option<NoteRecord> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.swap_remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.notes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NoteRecord> {
        self.notes.iter_mut()
    }

    pub fn ids(&self) -> Vec<NoteId> {
        self.notes.iter().map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: NoteId, filename: &str) -> NoteRecord {
        NoteRecord {
            id,
            filename: filename.to_string(),
            preview: String::new(),
            opened: false,
            changes: false,
            editor: None,
        }
    }

    #[test]
    fn insert_and_lookup_by_id() {
        let mut reg = Registry::new();
        reg.insert(record(0, "a.hnote"));
        reg.insert(record(1, "b.hnote"));
        assert_eq!(reg.get(1).unwrap().filename, "b.hnote");
        assert!(reg.get(7).is_none());
    }

    #[test]
    fn remove_swaps_last_into_slot_and_survivors_stay_reachable() {
        let mut reg = Registry::new();
        reg.insert(record(0, "a.hnote"));
        reg.insert(record(1, "b.hnote"));
        reg.insert(record(2, "c.hnote"));

        let gone = reg.remove(0).unwrap();
        assert_eq!(gone.filename, "a.hnote");
        assert_eq!(reg.len(), 2);

        // Every survivor is still found by id after the swap.
        assert_eq!(reg.get(1).unwrap().filename, "b.hnote");
        assert_eq!(reg.get(2).unwrap().filename, "c.hnote");
        assert!(reg.get(0).is_none());
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let mut reg = Registry::new();
        reg.insert(record(0, "a.hnote"));
        assert!(reg.remove(99).is_none());
        assert_eq!(reg.len(), 1);
    }
}
