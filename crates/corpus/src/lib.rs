//! Indexing and chapter navigation for a bundled, read-only text.
//!
//! A corpus arrives as a flat list of denormalized [`VerseRecord`]s (every
//! verse repeats its book and chapter). [`Index::build`] folds them into
//! sorted, deduplicated books and chapters with their verses precomputed,
//! and [`Corpus`] layers a single reading cursor on top, with
//! next/previous navigation that flows from one book into the next.
//!
//! [`VerseRecord`]: crate::models::VerseRecord

mod corpus;
pub mod error;
mod index;
pub mod models;
mod navigation;
mod position;
mod wire;

pub use crate::corpus::Corpus;
pub use crate::index::Index;
pub use crate::navigation::Direction;
pub use crate::position::{LastPosition, ListenerId, Position, PositionStore, StoreHandle};
pub use crate::wire::parse_records;
