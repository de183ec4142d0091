use terminal_size::{Width, terminal_size};
use yansi::Paint;

/// Fallback width when we are not attached to a terminal.
const DEFAULT_WIDTH: usize = 100;

/// Colors for list output, honoring NO_COLOR.
pub struct FormatContext {
    pub use_color: bool,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("NO_COLOR").is_err())
    }

    /// Note names render muted so previews carry the visual weight.
    pub fn format_name(&self, name: &str) -> String {
        if self.use_color {
            Paint::rgb(name, 108, 112, 134).to_string()
        } else {
            name.to_string()
        }
    }

    pub fn format_open_marker(&self, opened: bool) -> String {
        if !opened {
            return " ".to_string();
        }
        if self.use_color {
            Paint::rgb("*", 148, 226, 213).bold().to_string()
        } else {
            "*".to_string()
        }
    }
}

/// Trim `text` so a row with `reserved` leading columns fits the
/// terminal, marking the cut with an ellipsis.
pub fn clip_to_width(text: &str, reserved: usize) -> String {
    let width = match terminal_size() {
        Some((Width(w), _)) => w as usize,
        None => DEFAULT_WIDTH,
    };
    let available = width.saturating_sub(reserved).max(1);
    if text.chars().count() <= available {
        return text.to_string();
    }
    let mut out: String =
        text.chars().take(available.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_context_passes_text_through() {
        let ctx = FormatContext::new(false);
        assert_eq!(ctx.format_name("1724500000"), "1724500000");
        assert_eq!(ctx.format_open_marker(true), "*");
        assert_eq!(ctx.format_open_marker(false), " ");
    }

    #[test]
    fn colored_context_wraps_in_ansi() {
        let ctx = FormatContext::new(true);
        let name = ctx.format_name("abc");
        assert!(name.contains("abc"));
        assert!(name.len() > "abc".len());
    }

    #[test]
    fn clip_marks_truncation() {
        let short = clip_to_width("short", 0);
        assert_eq!(short, "short");
        // A reserved width bigger than any terminal forces the clip.
        let clipped = clip_to_width("abcdefgh", 10_000);
        assert!(clipped.ends_with('…'));
    }
}
