use crate::note::NoteId;

/// One visible row: a preview string tagged with its owning note's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NoteId,
    pub preview: String,
}

/// Ordered projection of the registry into a visible list. Every row is
/// tagged with its note's id, and all mutations locate rows by that tag.
#[derive(Debug, Default)]
pub struct ListProjection {
    rows: Vec<Row>,
}

impl ListProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// New notes append at the end of the list.
    pub fn append(&mut self, id: NoteId, preview: &str) {
        self.rows.push(Row { id, preview: preview.to_string() });
    }

    /// Remove the row tagged with `id`. Returns whether one was found.
    pub fn remove(&mut self, id: NoteId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the preview of the row tagged with `id`, keeping its
    /// position and tag.
    pub fn refresh(&mut self, id: NoteId, preview: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.rows.remove(index);
                self.rows
                    .insert(index, Row { id, preview: preview.to_string() });
                true
            }
            None => false,
        }
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn ids(&self) -> Vec<NoteId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut list = ListProjection::new();
        list.append(0, "first");
        list.append(1, "second");
        assert_eq!(list.ids(), vec![0, 1]);
    }

    #[test]
    fn refresh_keeps_position_and_tag() {
        let mut list = ListProjection::new();
        list.append(0, "first");
        list.append(1, "second");
        list.append(2, "third");

        assert!(list.refresh(1, "second, edited"));
        assert_eq!(list.ids(), vec![0, 1, 2]);
        assert_eq!(list.rows()[1].preview, "second, edited");
    }

    #[test]
    fn remove_by_id() {
        let mut list = ListProjection::new();
        list.append(0, "first");
        list.append(1, "second");
        assert!(list.remove(0));
        assert_eq!(list.ids(), vec![1]);
        assert!(!list.remove(0));
    }

    #[test]
    fn refresh_missing_id_reports_false() {
        let mut list = ListProjection::new();
        assert!(!list.refresh(3, "nothing here"));
    }
}
