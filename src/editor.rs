/// Text-edit surface attached to an open note. Owns the live buffer and
/// exists only between open and close.
#[derive(Debug, Clone, Default)]
pub struct EditorSurface {
    buffer: String,
}

impl EditorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { buffer: text.into() }
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
