use super::{Book, Chapter, Verse};

/// One row of the raw corpus, as handed over by a loader.
///
/// Rows are denormalized: every verse repeats the book and chapter it
/// belongs to. [`Index::build`](crate::Index::build) folds them back into
/// books and chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub book: Book,
    pub chapter: Chapter,
    pub verse: Verse,
}
impl VerseRecord {
    pub fn new(book: Book, chapter: Chapter, verse: Verse) -> Self {
        Self { book, chapter, verse }
    }

    /// Name of the first required field that is empty, if any.
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        if self.book.slug.is_empty() {
            Some("book.slug")
        } else if self.chapter.slug.is_empty() {
            Some("chapter.slug")
        } else if self.verse.slug.is_empty() {
            Some("verse.slug")
        } else {
            None
        }
    }
}
impl From<(Book, Chapter, Verse)> for VerseRecord {
    fn from((book, chapter, verse): (Book, Chapter, Verse)) -> Self {
        Self::new(book, chapter, verse)
    }
}
