//! Derived lookup structures over an ingested corpus.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};
use crate::models::{Book, Chapter, Verse, VerseRecord};
use crate::navigation::Direction;
use crate::position::Position;

/// Chapters of a single book, aligned with their verses.
#[derive(Debug, Clone, Default)]
struct Volume {
    chapters: Vec<Chapter>,
    /// `verses[i]` holds the verses of `chapters[i]`.
    verses: Vec<Vec<Verse>>,
    positions: HashMap<String, usize>,
}
impl Volume {
    /// Files a verse under its chapter, registering the chapter on first
    /// sight. Returns `false` if the chapter slug is already known with a
    /// different definition (the first one is kept).
    fn insert(&mut self, chapter: Chapter, verse: Verse) -> bool {
        let (position, consistent) = match self.positions.get(chapter.slug.as_str()) {
            Some(&position) => (position, self.chapters[position] == chapter),
            None => {
                let position = self.chapters.len();
                self.positions.insert(chapter.slug.clone(), position);
                self.chapters.push(chapter);
                self.verses.push(Vec::new());
                (position, true)
            },
        };
        self.verses[position].push(verse);
        consistent
    }

    fn sort(self) -> Self {
        let mut pairs: Vec<(Chapter, Vec<Verse>)> = self.chapters.into_iter().zip(self.verses).collect();
        // Stable sorts: ties keep the order in which they were first seen.
        pairs.sort_by_key(|(chapter, _)| chapter.id);
        for (_, verses) in pairs.iter_mut() {
            verses.sort_by_key(|verse| verse.id);
        }
        let (chapters, verses): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        let positions = chapters.iter().enumerate().map(|(i, c)| (c.slug.clone(), i)).collect();
        Self {
            chapters,
            verses,
            positions,
        }
    }
}

/// Immutable, fully-built lookup tables for one ingested corpus.
///
/// Books are deduplicated by slug and chapters by slug within their book.
/// When the same slug shows up with a different definition, the **first**
/// definition wins. Books, chapters and verses are each ordered by ascending
/// `id`, independent of input order.
///
/// Every book in an index has at least one chapter, because books are only
/// ever discovered through a record that carries one.
#[derive(Debug, Clone, Default)]
pub struct Index {
    books: Vec<Book>,
    /// `volumes[i]` holds the chapters of `books[i]`.
    volumes: Vec<Volume>,
    positions: HashMap<String, usize>,
    verse_count: usize,
}
impl Index {
    /// Build the index from raw, denormalized records in a single pass.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingField`] if any record has an empty book,
    /// chapter or verse slug. Nothing is built in that case.
    #[instrument(skip_all, fields(records, books, chapters))]
    pub fn build(records: impl IntoIterator<Item = VerseRecord>) -> Result<Self> {
        let mut books: Vec<Book> = Vec::new();
        let mut volumes: Vec<Volume> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut verse_count = 0;

        for (record, row) in records.into_iter().enumerate() {
            if let Some(field) = row.missing_field() {
                exn::bail!(ErrorKind::MissingField { record, field });
            }
            let VerseRecord { book, chapter, verse } = row;
            let position = match positions.get(book.slug.as_str()) {
                Some(&position) => {
                    if books[position] != book {
                        debug!(slug = %book.slug, record, "conflicting book definition, keeping first seen");
                    }
                    position
                },
                None => {
                    let position = books.len();
                    positions.insert(book.slug.clone(), position);
                    books.push(book);
                    volumes.push(Volume::default());
                    position
                },
            };
            let chapter_slug = chapter.slug.clone();
            if !volumes[position].insert(chapter, verse) {
                debug!(
                    book = %books[position].slug,
                    chapter = %chapter_slug,
                    record,
                    "conflicting chapter definition, keeping first seen"
                );
            }
            verse_count += 1;
        }

        let mut shelves: Vec<(Book, Volume)> = books.into_iter().zip(volumes).collect();
        shelves.sort_by_key(|(book, _)| book.id);
        let (books, volumes): (Vec<Book>, Vec<Volume>) =
            shelves.into_iter().map(|(book, volume)| (book, volume.sort())).unzip();
        let positions = books.iter().enumerate().map(|(i, b)| (b.slug.clone(), i)).collect();

        let span = tracing::Span::current();
        span.record("records", verse_count);
        span.record("books", books.len());
        span.record("chapters", volumes.iter().map(|v| v.chapters.len()).sum::<usize>());
        Ok(Self {
            books,
            volumes,
            positions,
            verse_count,
        })
    }

    /// All books, in canonical order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, slug: &str) -> Option<&Book> {
        self.positions.get(slug).map(|&b| &self.books[b])
    }

    /// Chapters of a book in order, or an empty slice for an unknown book.
    pub fn chapters(&self, book_slug: &str) -> &[Chapter] {
        self.volume(book_slug).map(|v| v.chapters.as_slice()).unwrap_or_default()
    }

    pub fn chapter(&self, book_slug: &str, chapter_slug: &str) -> Option<&Chapter> {
        self.locate(book_slug, chapter_slug).map(|(b, c)| &self.volumes[b].chapters[c])
    }

    /// Verses of a chapter in order, or an empty slice when either slug is
    /// unknown.
    pub fn verses(&self, book_slug: &str, chapter_slug: &str) -> &[Verse] {
        self.locate(book_slug, chapter_slug).map(|(b, c)| self.volumes[b].verses[c].as_slice()).unwrap_or_default()
    }

    /// Total number of ingested verses.
    pub fn verse_count(&self) -> usize {
        self.verse_count
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Every `(book, chapter)` pair, in reading order: chapters ascending
    /// within a book, books ascending.
    pub fn reading_order(&self) -> impl Iterator<Item = (&Book, &Chapter)> {
        self.books.iter().zip(&self.volumes).flat_map(|(book, volume)| volume.chapters.iter().map(move |c| (book, c)))
    }

    /// The chapter adjacent to `(book_slug, chapter_slug)` in reading order,
    /// crossing into the neighbouring book when needed.
    ///
    /// Returns `None` at either end of the corpus, or when the starting
    /// point isn't part of the index.
    pub fn neighbour(&self, book_slug: &str, chapter_slug: &str, direction: Direction) -> Option<(&Book, &Chapter)> {
        let (b, c) = self.locate(book_slug, chapter_slug)?;
        let chapters = &self.volumes[b].chapters;
        match direction {
            Direction::Next if c + 1 < chapters.len() => Some((&self.books[b], &chapters[c + 1])),
            Direction::Next => {
                let next = b + 1;
                let first = self.volumes.get(next)?.chapters.first()?;
                Some((&self.books[next], first))
            },
            Direction::Previous if c > 0 => Some((&self.books[b], &chapters[c - 1])),
            Direction::Previous => {
                let previous = b.checked_sub(1)?;
                let last = self.volumes[previous].chapters.last()?;
                Some((&self.books[previous], last))
            },
        }
    }

    /// Materializes a cursor for the given slugs, if they resolve.
    pub(crate) fn position(&self, book_slug: &str, chapter_slug: &str) -> Option<Position> {
        let (b, c) = self.locate(book_slug, chapter_slug)?;
        Some(Position {
            book: self.books[b].clone(),
            chapter: self.volumes[b].chapters[c].clone(),
            verses: self.volumes[b].verses[c].clone(),
        })
    }

    fn volume(&self, book_slug: &str) -> Option<&Volume> {
        self.positions.get(book_slug).map(|&b| &self.volumes[b])
    }

    fn locate(&self, book_slug: &str, chapter_slug: &str) -> Option<(usize, usize)> {
        let b = *self.positions.get(book_slug)?;
        let c = *self.volumes[b].positions.get(chapter_slug)?;
        Some((b, c))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    pub(crate) fn record(book: (u32, &str, &str), chapter: (u32, &str), verse: (u32, &str)) -> VerseRecord {
        let (id, text) = verse;
        VerseRecord::new(book.into(), chapter.into(), Verse::new(id, id.to_string(), text))
    }

    /// Two books: `a` with chapters 1 and 2, `b` with chapter 1. Fed in
    /// scrambled order on purpose.
    #[fixture]
    pub(crate) fn records() -> Vec<VerseRecord> {
        let a = (1, "a", "Alpha");
        let b = (2, "b", "Beta");
        vec![
            record(b, (1, "1"), (2, "b1v2")),
            record(a, (2, "2"), (1, "a2v1")),
            record(a, (1, "1"), (2, "a1v2")),
            record(b, (1, "1"), (1, "b1v1")),
            record(a, (1, "1"), (1, "a1v1")),
        ]
    }

    fn slugs<'a>(pair: Option<(&'a Book, &'a Chapter)>) -> Option<(&'a str, &'a str)> {
        pair.map(|(b, c)| (b.slug.as_str(), c.slug.as_str()))
    }

    #[rstest]
    fn test_books_sorted_and_unique(records: Vec<VerseRecord>) {
        let index = Index::build(records).unwrap();
        let books: Vec<_> = index.books().iter().map(|b| (b.id, b.slug.as_str())).collect();
        assert_eq!(books, vec![(1, "a"), (2, "b")]);
        assert_eq!(index.verse_count(), 5);
    }

    #[rstest]
    fn test_chapters_sorted(records: Vec<VerseRecord>) {
        let index = Index::build(records).unwrap();
        let chapters: Vec<_> = index.chapters("a").iter().map(|c| c.id).collect();
        assert_eq!(chapters, vec![1, 2]);
    }

    #[rstest]
    fn test_verses_sorted(records: Vec<VerseRecord>) {
        let index = Index::build(records).unwrap();
        let verses: Vec<_> = index.verses("b", "1").iter().map(|v| v.text.as_str()).collect();
        assert_eq!(verses, vec!["b1v1", "b1v2"]);
    }

    #[rstest]
    #[case("unknown", "1")]
    #[case("a", "99")]
    #[case("", "")]
    fn test_unknown_slugs_are_empty(records: Vec<VerseRecord>, #[case] book: &str, #[case] chapter: &str) {
        let index = Index::build(records).unwrap();
        assert!(index.verses(book, chapter).is_empty());
        assert!(index.chapter(book, chapter).is_none());
    }

    #[rstest]
    fn test_unknown_book_has_no_chapters(records: Vec<VerseRecord>) {
        let index = Index::build(records).unwrap();
        assert!(index.chapters("unknown-slug").is_empty());
        assert!(index.book("unknown-slug").is_none());
    }

    #[test]
    fn test_first_seen_book_wins() {
        let index = Index::build(vec![
            record((1, "gen", "Genesis"), (1, "1"), (1, "first")),
            record((1, "gen", "GenesisX"), (1, "1"), (2, "second")),
            record((7, "gen", "Genesis"), (2, "2"), (1, "third")),
        ])
        .unwrap();
        assert_eq!(index.books().len(), 1);
        assert_eq!(index.books()[0], Book::new(1, "gen", "Genesis"));
        // Verses still follow their slugs, whichever definition came with them.
        assert_eq!(index.verses("gen", "1").len(), 2);
        assert_eq!(index.verses("gen", "2").len(), 1);
    }

    #[test]
    fn test_first_seen_chapter_wins() {
        let index = Index::build(vec![
            record((1, "gen", "Genesis"), (3, "c"), (1, "first")),
            record((1, "gen", "Genesis"), (1, "c"), (2, "second")),
        ])
        .unwrap();
        assert_eq!(index.chapters("gen"), &[Chapter::new(3, "c")]);
    }

    #[test]
    fn test_equal_ids_keep_input_order() {
        let index = Index::build(vec![
            record((5, "y", "Y"), (1, "1"), (1, "y")),
            record((5, "x", "X"), (1, "1"), (1, "x")),
        ])
        .unwrap();
        let books: Vec<_> = index.books().iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(books, vec!["y", "x"]);
    }

    #[test]
    fn test_empty_corpus() {
        let index = Index::build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.books().is_empty());
        assert!(index.chapters("a").is_empty());
        assert!(index.verses("a", "1").is_empty());
        assert_eq!(index.reading_order().count(), 0);
    }

    #[rstest]
    #[case(record((1, "", "A"), (1, "1"), (1, "x")), "book.slug")]
    #[case(record((1, "a", "A"), (1, ""), (1, "x")), "chapter.slug")]
    #[case(VerseRecord::new(Book::new(1, "a", "A"), Chapter::new(1, "1"), Verse::new(1, "", "x")), "verse.slug")]
    fn test_missing_field(records: Vec<VerseRecord>, #[case] bad: VerseRecord, #[case] field: &'static str) {
        let mut input = records;
        input.push(bad);
        let err = Index::build(input).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField { record: 5, field });
    }

    #[rstest]
    #[case("a", "2", Direction::Next, Some(("b", "1")))]
    #[case("a", "1", Direction::Next, Some(("a", "2")))]
    #[case("b", "1", Direction::Previous, Some(("a", "2")))]
    #[case("a", "2", Direction::Previous, Some(("a", "1")))]
    #[case("a", "1", Direction::Previous, None)]
    #[case("b", "1", Direction::Next, None)]
    #[case("unknown", "1", Direction::Next, None)]
    fn test_neighbour(
        records: Vec<VerseRecord>,
        #[case] book: &str,
        #[case] chapter: &str,
        #[case] direction: Direction,
        #[case] expected: Option<(&str, &str)>,
    ) {
        let index = Index::build(records).unwrap();
        assert_eq!(slugs(index.neighbour(book, chapter, direction)), expected);
    }

    #[rstest]
    fn test_walking_forward_follows_reading_order(records: Vec<VerseRecord>) {
        let index = Index::build(records).unwrap();
        let expected: Vec<_> = index.reading_order().map(|(b, c)| (b.slug.clone(), c.slug.clone())).collect();
        let mut walked = vec![(String::from("a"), String::from("1"))];
        while let Some((book, chapter)) = walked.last().and_then(|(b, c)| index.neighbour(b, c, Direction::Next)) {
            walked.push((book.slug.clone(), chapter.slug.clone()));
        }
        assert_eq!(walked, expected);
        assert_eq!(walked.len(), 3);
    }
}
