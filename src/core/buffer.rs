/// Script buffer — the editor's text and selection.

use std::ops::Range;

use crate::schema::format::{FormatElement, FALLBACK_TEMPLATE};

/// The live script text plus the current selection, in byte offsets.
///
/// Offsets always sit on char boundaries and `selection.start <=
/// selection.end <= text.len()`. A collapsed selection is the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuffer {
    text: String,
    selection: Range<usize>,
}

impl ScriptBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
        }
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    /// Replace the whole text; the cursor moves to the end.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let end = self.text.len();
        self.selection = end..end;
    }

    pub fn clear(&mut self) {
        self.replace_text(String::new());
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    /// Set the selection, clamping both ends into the text and back onto
    /// char boundaries. The ends may be given in either order.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let a = self.clamp_offset(start);
        let b = self.clamp_offset(end);
        self.selection = a.min(b)..a.max(b);
    }

    /// Replace the selection with `insert` and collapse the cursor after it.
    pub fn insert_at_cursor(&mut self, insert: &str) {
        let Range { start, end } = self.selection.clone();
        self.text.replace_range(start..end, insert);
        let cursor = start + insert.len();
        self.selection = cursor..cursor;
    }

    /// Insert the template for a screenplay element at the cursor.
    pub fn insert_format(&mut self, element: FormatElement) {
        self.insert_at_cursor(element.template());
    }

    /// Insert the template for an element given by name. Unknown names
    /// insert a bare line break.
    pub fn insert_format_named(&mut self, name: &str) {
        let template = FormatElement::from_name(name)
            .map(|element| element.template())
            .unwrap_or(FALLBACK_TEMPLATE);
        self.insert_at_cursor(template);
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
