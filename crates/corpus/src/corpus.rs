//! The reading corpus: an [`Index`] plus the reader's cursor.

use exn::OptionExt;
use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};
use crate::index::Index;
use crate::models::{Book, Chapter, Verse, VerseRecord};
use crate::navigation::Direction;
use crate::position::{LastPosition, ListenerId, Position, StoreHandle};
use crate::wire::parse_records;

type Listener = Box<dyn FnMut(&Position)>;

/// A bundled text, indexed for browsing, with a single reading cursor.
///
/// The corpus is owned by one orchestrating caller that serializes all calls
/// to it; it does no I/O of its own and never blocks. Persistence of the
/// reading position is delegated to an optional [`PositionStore`], and
/// presentation layers learn about cursor moves through listeners
/// registered with [`subscribe`](Self::subscribe).
///
/// The cursor starts *unset*. [`set_position`](Self::set_position) (and the
/// helpers built on it) is the only way to move it.
///
/// # Examples
///
/// ```
/// use lectio_corpus::{Corpus, Direction, models::{Book, Chapter, Verse, VerseRecord}};
///
/// let genesis = Book::new(1, "genesis", "Genesis");
/// let mut corpus = Corpus::new();
/// corpus.ingest(vec![
///     VerseRecord::new(genesis.clone(), Chapter::new(1, "1"), Verse::new(1, "1", "In the beginning...")),
///     VerseRecord::new(genesis.clone(), Chapter::new(2, "2"), Verse::new(1, "1", "Thus the heavens...")),
/// ]).unwrap();
///
/// let position = corpus.set_position_by_slug("genesis", "1").unwrap();
/// assert_eq!(position.verses.len(), 1);
/// assert!(corpus.can_advance(Direction::Next));
/// assert!(!corpus.can_advance(Direction::Previous));
/// ```
///
/// [`PositionStore`]: crate::PositionStore
#[derive(Default)]
pub struct Corpus {
    index: Index,
    cursor: Option<Position>,
    store: Option<StoreHandle>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}
impl Corpus {
    /// An empty corpus that doesn't remember positions.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty corpus that saves every position it moves to in `store`.
    pub fn with_store(store: StoreHandle) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    /// Replace the whole corpus with freshly ingested records.
    ///
    /// The new index is built completely before it replaces the current one,
    /// so a failed ingestion leaves the previous corpus (and cursor) exactly
    /// as it was.
    ///
    /// If the cursor was set and its book and chapter slugs still exist in the
    /// new corpus, it stays there (re-read from the new data); otherwise it
    /// becomes unset. Re-ingestion neither saves the position nor notifies
    /// listeners, callers can poll [`position`](Self::position) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingField`] if a record lacks a slug.
    #[instrument(skip_all)]
    pub fn ingest(&mut self, records: impl IntoIterator<Item = VerseRecord>) -> Result<()> {
        let index = Index::build(records)?;
        self.cursor = self.cursor.take().and_then(|previous| {
            let (book, chapter) = previous.slugs();
            let kept = index.position(book, chapter);
            if kept.is_none() {
                debug!(book, chapter, "previous position no longer exists, cursor reset");
            }
            kept
        });
        self.index = index;
        Ok(())
    }

    /// Parse a JSON corpus (see [`parse_records`]) and ingest it.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedInput`] or [`ErrorKind::MissingField`];
    /// the previous corpus is kept in both cases.
    #[instrument(skip(self, json), fields(json_size = json.len()))]
    pub fn ingest_json(&mut self, json: &str) -> Result<()> {
        self.ingest(parse_records(json)?)
    }

    /// The underlying lookup tables.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// All books in canonical order; empty before ingestion.
    pub fn books(&self) -> &[Book] {
        self.index.books()
    }

    pub fn book(&self, slug: &str) -> Option<&Book> {
        self.index.book(slug)
    }

    /// Chapters of a book; empty for an unknown book.
    pub fn chapters(&self, book_slug: &str) -> &[Chapter] {
        self.index.chapters(book_slug)
    }

    pub fn chapter(&self, book_slug: &str, chapter_slug: &str) -> Option<&Chapter> {
        self.index.chapter(book_slug, chapter_slug)
    }

    /// Verses of a chapter; empty when either slug is unknown.
    pub fn verses(&self, book_slug: &str, chapter_slug: &str) -> &[Verse] {
        self.index.verses(book_slug, chapter_slug)
    }

    /// Every `(book, chapter)` pair in reading order.
    pub fn reading_order(&self) -> impl Iterator<Item = (&Book, &Chapter)> {
        self.index.reading_order()
    }

    /// The cursor, or `None` while unset.
    pub fn position(&self) -> Option<&Position> {
        self.cursor.as_ref()
    }

    /// Move the cursor to `book`/`chapter`.
    ///
    /// Both must be values handed out by this corpus: a pair that isn't part
    /// of the current index means the caller is out of sync, and is rejected
    /// instead of being silently ignored. On success, the position is saved
    /// to the store and every listener is notified exactly once, before this
    /// method returns.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidPosition`] if the pair isn't in the index.
    pub fn set_position(&mut self, book: &Book, chapter: &Chapter) -> Result<&Position> {
        let known = self.index.book(&book.slug).is_some_and(|b| b == book)
            && self.index.chapter(&book.slug, &chapter.slug).is_some_and(|c| c == chapter);
        if !known {
            exn::bail!(ErrorKind::InvalidPosition {
                book: book.slug.clone(),
                chapter: chapter.slug.clone(),
            });
        }
        self.move_to(&book.slug, &chapter.slug)
    }

    /// Like [`set_position`](Self::set_position), addressed by slugs.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidPosition`] if the slugs don't resolve.
    pub fn set_position_by_slug(&mut self, book_slug: &str, chapter_slug: &str) -> Result<&Position> {
        self.move_to(book_slug, chapter_slug)
    }

    /// The chapter next to the cursor in reading order, without moving.
    ///
    /// Crosses book boundaries: after the last chapter of a book comes the
    /// first chapter of the next one, and before the first chapter comes the
    /// last chapter of the previous book. `None` at either end of the corpus
    /// and while the cursor is unset; neither is an error.
    pub fn advance(&self, direction: Direction) -> Option<(Book, Chapter)> {
        let (book, chapter) = self.cursor.as_ref()?.slugs();
        self.index.neighbour(book, chapter, direction).map(|(b, c)| (b.clone(), c.clone()))
    }

    /// Whether [`advance`](Self::advance) would return a chapter.
    pub fn can_advance(&self, direction: Direction) -> bool {
        self.cursor.as_ref().is_some_and(|p| self.index.neighbour(&p.book.slug, &p.chapter.slug, direction).is_some())
    }

    /// Move the cursor one chapter in `direction`.
    ///
    /// Returns `Ok(None)`, leaving the cursor untouched, at the end of the
    /// corpus.
    ///
    /// # Errors
    ///
    /// Never fails in practice: the target always comes from the index.
    pub fn navigate(&mut self, direction: Direction) -> Result<Option<&Position>> {
        let Some((book, chapter)) = self.advance(direction) else {
            return Ok(None);
        };
        self.move_to(&book.slug, &chapter.slug).map(Some)
    }

    /// Put the cursor back where the reader left off.
    ///
    /// Uses the last position from the store when it still exists in the
    /// corpus, otherwise the first chapter of the first book. Returns `None`
    /// only for an empty corpus.
    #[instrument(skip(self))]
    pub fn restore(&mut self) -> Option<&Position> {
        let last = self.store.as_ref().map(|store| store.load_last_position()).unwrap_or_default();
        let (book, chapter) = match last {
            LastPosition {
                book: Some(book),
                chapter: Some(chapter),
            } if self.index.chapter(&book, &chapter).is_some() => (book, chapter),
            _ => {
                let (book, chapter) = self.index.reading_order().next()?;
                debug!(book = %book.slug, chapter = %chapter.slug, "no usable last position, starting at the beginning");
                (book.slug.clone(), chapter.slug.clone())
            },
        };
        self.move_to(&book, &chapter).ok()
    }

    /// Register a listener called with the new position after every cursor
    /// move.
    pub fn subscribe(&mut self, listener: impl FnMut(&Position) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Single mutation point of the cursor.
    #[instrument(level = "debug", skip(self))]
    fn move_to(&mut self, book_slug: &str, chapter_slug: &str) -> Result<&Position> {
        let position = self.index.position(book_slug, chapter_slug).ok_or_raise(|| ErrorKind::InvalidPosition {
            book: book_slug.to_string(),
            chapter: chapter_slug.to_string(),
        })?;
        let position: &Position = self.cursor.insert(position);
        if let Some(store) = &self.store {
            store.save_last_position(&position.book.slug, &position.chapter.slug);
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(position);
        }
        Ok(position)
    }
}
