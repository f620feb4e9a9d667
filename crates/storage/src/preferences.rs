//! Reader preferences on top of a [`PreferenceBackend`].

use crate::{BackendHandle, FontSizeLimits, Snapshot, Theme};
use lectio_corpus::{LastPosition, PositionStore};
use tracing::{instrument, warn};

/// Font size, theme and last read position.
///
/// Storage failures never reach the caller: they are logged at `warn` level
/// and reads fall back to the configured defaults. Font sizes are clamped to
/// [`FontSizeLimits`] both when saved and when read back, so a hand-edited
/// preferences file can't push the reader outside the supported range.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lectio_storage::{FontSizeLimits, Preferences, Theme, backend::LocalBackend};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let dir = tempfile::tempdir()?;
/// let backend = LocalBackend::new("local", dir.path().join("preferences.json"))?;
/// let preferences = Preferences::new(Arc::new(backend)).with_default_theme(Theme::Dark);
///
/// assert_eq!(preferences.font_size(), FontSizeLimits::default().default);
/// assert_eq!(preferences.set_font_size(100), 36);
/// assert_eq!(preferences.toggle_theme(), Theme::Light);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Preferences {
    backend: BackendHandle,
    font_size: FontSizeLimits,
    default_theme: Theme,
}
impl Preferences {
    pub fn new(backend: BackendHandle) -> Self {
        Self {
            backend,
            font_size: FontSizeLimits::default(),
            default_theme: Theme::default(),
        }
    }

    pub fn with_font_size_limits(mut self, limits: FontSizeLimits) -> Self {
        self.font_size = limits;
        self
    }

    /// Theme used until the reader picks one.
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    pub fn font_size_limits(&self) -> &FontSizeLimits {
        &self.font_size
    }

    /// Saved font size (clamped), or the default.
    pub fn font_size(&self) -> u32 {
        self.snapshot().font_size.map(|size| self.font_size.clamp(size)).unwrap_or(self.font_size.default)
    }

    /// Clamp and save a font size. Returns the size actually in effect.
    #[instrument(skip(self))]
    pub fn set_font_size(&self, size: u32) -> u32 {
        let size = self.font_size.clamp(size);
        self.update(|snapshot| snapshot.font_size = Some(size));
        size
    }

    /// One step larger, up to the maximum.
    pub fn increase_font_size(&self) -> u32 {
        self.set_font_size(self.font_size.increase(self.font_size()))
    }

    /// One step smaller, down to the minimum.
    pub fn decrease_font_size(&self) -> u32 {
        self.set_font_size(self.font_size.decrease(self.font_size()))
    }

    pub fn reset_font_size(&self) -> u32 {
        self.set_font_size(self.font_size.default)
    }

    pub fn can_increase_font_size(&self) -> bool {
        self.font_size.can_increase(self.font_size())
    }

    pub fn can_decrease_font_size(&self) -> bool {
        self.font_size.can_decrease(self.font_size())
    }

    /// Saved theme, or the default.
    pub fn theme(&self) -> Theme {
        self.snapshot().theme.unwrap_or(self.default_theme)
    }

    #[instrument(skip(self))]
    pub fn set_theme(&self, theme: Theme) {
        self.update(|snapshot| snapshot.theme = Some(theme));
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme().toggled();
        self.set_theme(theme);
        theme
    }

    fn snapshot(&self) -> Snapshot {
        match self.backend.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(backend = self.backend.name(), error = ?err, "could not read preferences, using defaults");
                Snapshot::default()
            },
        }
    }

    /// Read-modify-write of the whole snapshot. An unreadable snapshot is
    /// replaced, so a corrupt file heals on the next save.
    fn update(&self, change: impl FnOnce(&mut Snapshot)) {
        let mut snapshot = self.snapshot();
        change(&mut snapshot);
        if let Err(err) = self.backend.save(&snapshot) {
            warn!(backend = self.backend.name(), error = ?err, "could not save preferences");
        }
    }
}

impl PositionStore for Preferences {
    #[instrument(skip(self))]
    fn save_last_position(&self, book_slug: &str, chapter_slug: &str) {
        self.update(|snapshot| {
            snapshot.last_book = Some(book_slug.to_string());
            snapshot.last_chapter = Some(chapter_slug.to_string());
        });
    }

    fn load_last_position(&self) -> LastPosition {
        let snapshot = self.snapshot();
        LastPosition {
            book: snapshot.last_book,
            chapter: snapshot.last_chapter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LocalBackend, MockBackend};
    use lectio_corpus::{Corpus, Direction};
    use rstest::rstest;
    use std::sync::Arc;

    fn preferences(snapshot: Snapshot) -> (Arc<MockBackend>, Preferences) {
        let backend = Arc::new(MockBackend::with_snapshot(snapshot));
        (backend.clone(), Preferences::new(backend))
    }

    #[rstest]
    #[case::nothing_saved(Snapshot::default(), 16)]
    #[case::saved(Snapshot::default().with_font_size(20), 20)]
    #[case::saved_too_small(Snapshot::default().with_font_size(2), 12)]
    #[case::saved_too_large(Snapshot::default().with_font_size(72), 36)]
    fn test_font_size(#[case] snapshot: Snapshot, #[case] expected: u32) {
        let (_, preferences) = preferences(snapshot);
        assert_eq!(preferences.font_size(), expected);
    }

    #[test]
    fn test_set_font_size_is_clamped_before_saving() {
        let (backend, preferences) = preferences(Snapshot::default());
        assert_eq!(preferences.set_font_size(40), 36);
        assert_eq!(backend.snapshot().font_size, Some(36));
    }

    #[test]
    fn test_font_size_steps() {
        let (_, preferences) = preferences(Snapshot::default().with_font_size(34));
        assert_eq!(preferences.increase_font_size(), 36);
        assert!(!preferences.can_increase_font_size());
        assert_eq!(preferences.increase_font_size(), 36);
        assert_eq!(preferences.decrease_font_size(), 34);
        assert!(preferences.can_decrease_font_size());
        assert_eq!(preferences.reset_font_size(), 16);
    }

    #[test]
    fn test_custom_limits() {
        let (_, preferences) = preferences(Snapshot::default());
        let preferences = preferences.with_font_size_limits(FontSizeLimits::new(10, 20, 14, 5));
        assert_eq!(preferences.font_size(), 14);
        assert_eq!(preferences.increase_font_size(), 19);
        assert_eq!(preferences.increase_font_size(), 20);
    }

    #[test]
    fn test_theme_defaults_and_toggles() {
        let (backend, preferences) = preferences(Snapshot::default());
        let preferences = preferences.with_default_theme(Theme::Dark);
        assert_eq!(preferences.theme(), Theme::Dark);
        assert_eq!(preferences.toggle_theme(), Theme::Light);
        assert_eq!(preferences.theme(), Theme::Light);
        assert_eq!(backend.snapshot().theme, Some(Theme::Light));
    }

    #[test]
    fn test_updates_keep_other_values() {
        let (backend, preferences) = preferences(Snapshot::default().with_theme(Theme::Dark));
        preferences.set_font_size(22);
        preferences.save_last_position("john", "3");
        assert_eq!(
            backend.snapshot(),
            Snapshot::default().with_theme(Theme::Dark).with_font_size(22).with_last_position("john", "3")
        );
    }

    #[test]
    fn test_failures_are_swallowed() {
        let preferences = Preferences::new(Arc::new(MockBackend::default().failing()));
        assert_eq!(preferences.font_size(), 16);
        assert_eq!(preferences.set_font_size(20), 20);
        assert_eq!(preferences.theme(), Theme::Light);
        preferences.save_last_position("john", "3");
        assert_eq!(preferences.load_last_position(), LastPosition::default());
    }

    #[test]
    fn test_unknown_stored_theme_only_resets_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"font_size":20,"theme":"sepia","last_book":"john","last_chapter":"3"}"#).unwrap();
        let preferences = Preferences::new(Arc::new(LocalBackend::new("local", &path).unwrap()));

        assert_eq!(preferences.theme(), Theme::Light);
        assert_eq!(preferences.font_size(), 20);
        assert_eq!(preferences.load_last_position(), LastPosition::new("john", "3"));

        preferences.set_theme(Theme::Dark);
        assert_eq!(preferences.font_size(), 20);
        assert_eq!(preferences.load_last_position(), LastPosition::new("john", "3"));
    }

    const JOHN: &str = r#"[
        {"book":{"id":1,"name":"John","slug":"john"},"chapter":{"id":1,"slug":"1"},"verse":{"id":1,"slug":"1","text":"In the beginning was the Word"}},
        {"book":{"id":1,"name":"John","slug":"john"},"chapter":{"id":2,"slug":"2"},"verse":{"id":1,"slug":"1","text":"And the third day"}}
    ]"#;

    #[test]
    fn test_corpus_position_round_trips_through_preferences() {
        let (backend, preferences) = preferences(Snapshot::default());
        let mut corpus = Corpus::with_store(Arc::new(preferences.clone()));
        corpus.ingest_json(JOHN).unwrap();
        assert_eq!(corpus.restore().unwrap().slugs(), ("john", "1"));
        corpus.navigate(Direction::Next).unwrap();
        assert_eq!(backend.snapshot().last_chapter.as_deref(), Some("2"));

        // A fresh session picks up where the last one ended.
        let mut next_session = Corpus::with_store(Arc::new(preferences));
        next_session.ingest_json(JOHN).unwrap();
        assert_eq!(next_session.restore().unwrap().slugs(), ("john", "2"));
    }
}
