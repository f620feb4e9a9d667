//! JSON wire format of a bundled corpus.
//!
//! A corpus file is an array of denormalized rows:
//!
//! ```json
//! [
//!   {
//!     "book": {"id": 1, "name": "Genesis", "slug": "genesis"},
//!     "chapter": {"id": 1, "slug": "1"},
//!     "verse": {"id": 1, "slug": "1", "text": "In the beginning..."}
//!   }
//! ]
//! ```
//!
//! Every field is required.

use exn::{OptionExt, ResultExt};
use facet_json::from_str as from_json;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::models::{Book, Chapter, Verse, VerseRecord};

// Ids are decoded wider than the models and strings as optional, so that
// negative, oversized and `null` values are rejected instead of being
// wrapped or defaulted.

#[derive(facet::Facet)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct BookProxy {
    id: i64,
    name: Option<String>,
    slug: Option<String>,
}
impl TryFrom<BookProxy> for Book {
    type Error = Error;
    fn try_from(book: BookProxy) -> Result<Self> {
        Ok(Self {
            id: id(book.id, "book.id")?,
            slug: required(book.slug, "book.slug")?,
            name: required(book.name, "book.name")?,
        })
    }
}

#[derive(facet::Facet)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct ChapterProxy {
    id: i64,
    slug: Option<String>,
}
impl TryFrom<ChapterProxy> for Chapter {
    type Error = Error;
    fn try_from(chapter: ChapterProxy) -> Result<Self> {
        Ok(Self {
            id: id(chapter.id, "chapter.id")?,
            slug: required(chapter.slug, "chapter.slug")?,
        })
    }
}

#[derive(facet::Facet)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct VerseProxy {
    id: i64,
    slug: Option<String>,
    text: Option<String>,
}
impl TryFrom<VerseProxy> for Verse {
    type Error = Error;
    fn try_from(verse: VerseProxy) -> Result<Self> {
        Ok(Self {
            id: id(verse.id, "verse.id")?,
            slug: required(verse.slug, "verse.slug")?,
            text: required(verse.text, "verse.text")?,
        })
    }
}

#[derive(facet::Facet)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct RecordProxy {
    book: BookProxy,
    chapter: ChapterProxy,
    verse: VerseProxy,
}
impl TryFrom<RecordProxy> for VerseRecord {
    type Error = Error;
    fn try_from(record: RecordProxy) -> Result<Self> {
        Ok(Self {
            book: record.book.try_into()?,
            chapter: record.chapter.try_into()?,
            verse: record.verse.try_into()?,
        })
    }
}

fn id(value: i64, field: &'static str) -> Result<u32> {
    u32::try_from(value).or_raise(|| ErrorKind::MalformedInput(format!("{field} out of range: {value}")))
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value.ok_or_raise(|| ErrorKind::MalformedInput(format!("{field} is null")))
}

/// Decode a JSON corpus into verse records.
///
/// # Errors
///
/// Returns [`ErrorKind::MalformedInput`] if the document isn't a JSON array
/// of complete rows (missing or `null` fields, wrong types, ids that don't
/// fit an unsigned 32-bit integer, invalid JSON).
#[instrument(skip(json), fields(json_size = json.len()))]
pub fn parse_records(json: &str) -> Result<Vec<VerseRecord>> {
    let rows = from_json::<Vec<RecordProxy>>(json)
        .or_raise(|| ErrorKind::MalformedInput("expected an array of book/chapter/verse rows".to_string()))?;
    rows.into_iter()
        .enumerate()
        .map(|(record, row)| {
            VerseRecord::try_from(row).or_raise(|| ErrorKind::MalformedInput(format!("invalid record {record}")))
        })
        .collect()
}
