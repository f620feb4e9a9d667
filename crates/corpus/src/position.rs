//! Reading position (the cursor) and its collaborators.

use std::sync::Arc;

use crate::models::{Book, Chapter, Verse};

/// The chapter currently being read, with its verses materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub book: Book,
    pub chapter: Chapter,
    /// Verses of `chapter`, in ascending `id` order.
    pub verses: Vec<Verse>,
}
impl Position {
    /// `(book slug, chapter slug)` pair identifying this position.
    pub fn slugs(&self) -> (&str, &str) {
        (&self.book.slug, &self.chapter.slug)
    }
}

/// Last reading position as remembered by a [`PositionStore`].
///
/// Either half may be missing, for example on first launch or when only
/// part of the state could be read back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastPosition {
    pub book: Option<String>,
    pub chapter: Option<String>,
}
impl LastPosition {
    pub fn new(book: impl Into<String>, chapter: impl Into<String>) -> Self {
        Self {
            book: Some(book.into()),
            chapter: Some(chapter.into()),
        }
    }
}

/// Remembers where the reader left off.
///
/// The corpus never depends on persistence succeeding: implementations deal
/// with (log and swallow) their own failures, which is why neither method
/// returns a `Result`.
pub trait PositionStore {
    fn save_last_position(&self, book_slug: &str, chapter_slug: &str);
    fn load_last_position(&self) -> LastPosition;
}

/// Shared handle to a position store.
pub type StoreHandle = Arc<dyn PositionStore + Send + Sync>;

/// Handle returned by [`Corpus::subscribe`](crate::Corpus::subscribe), used
/// to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
