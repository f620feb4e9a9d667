//! Storage models.

use crate::Theme;

/// Everything persisted between sessions.
///
/// Each value is optional: absent values fall back to the configured
/// defaults when read through [`Preferences`](crate::Preferences).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Reading font size, as last saved (not yet clamped)
    pub font_size: Option<u32>,
    pub theme: Option<Theme>,
    /// Slug of the book last read
    pub last_book: Option<String>,
    /// Slug of the chapter last read, within `last_book`
    pub last_chapter: Option<String>,
}
impl Snapshot {
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_last_position(mut self, book: impl Into<String>, chapter: impl Into<String>) -> Self {
        self.last_book = Some(book.into());
        self.last_chapter = Some(chapter.into());
        self
    }
}
