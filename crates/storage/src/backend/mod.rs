//! Preference backend trait and implementations.
//!
//! A backend only knows how to load and save a whole [`Snapshot`]. Merging
//! individual values, clamping and falling back to defaults all happen in
//! [`Preferences`](crate::Preferences).

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::local::LocalBackend;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockBackend;
use crate::Snapshot;
use crate::error::Result;

/// Unified interface for preference backends.
///
/// Operations are synchronous: snapshots are a handful of bytes and the
/// reader shell calls them from its single thread.
///
/// # Examples
///
/// ```
/// use lectio_storage::{Snapshot, backend::PreferenceBackend, error::Result};
///
/// fn remember_chapter(backend: &dyn PreferenceBackend, book: &str, chapter: &str) -> Result<()> {
///     let snapshot = backend.load()?.with_last_position(book, chapter);
///     backend.save(&snapshot)
/// }
/// ```
pub trait PreferenceBackend: Send + Sync {
    /// Name of the configured backend, used for logging only.
    fn name(&self) -> &str;

    /// Read the stored snapshot.
    ///
    /// A backend that has never been written to returns an empty
    /// [`Snapshot`], not an error.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
