//! Local filesystem preference backend.
//!
//! Preferences are kept in a single small JSON document. Writes go to a
//! temporary file in the same directory which is then renamed over the
//! target, so a crash mid-write never leaves a truncated file behind.

use crate::error::{ErrorKind, Result};
use crate::{PreferenceBackend, Snapshot, Theme};
use exn::ResultExt;
use facet_json::{from_str as from_json, to_string as to_json};
use std::fs::{self, create_dir_all as sync_create_dir};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{instrument, warn};

#[derive(facet::Facet)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct SnapshotProxy {
    #[facet(default, skip_serializing_if = Option::is_none)]
    font_size: Option<i64>,
    #[facet(default, skip_serializing_if = Option::is_none)]
    theme: Option<String>,
    #[facet(default, skip_serializing_if = Option::is_none)]
    last_book: Option<String>,
    #[facet(default, skip_serializing_if = Option::is_none)]
    last_chapter: Option<String>,
}
impl From<&Snapshot> for SnapshotProxy {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            font_size: snapshot.font_size.map(i64::from),
            theme: snapshot.theme.map(|t| t.as_str().to_string()),
            last_book: snapshot.last_book.clone(),
            last_chapter: snapshot.last_chapter.clone(),
        }
    }
}
/// Values are decoded one by one: an unusable value is dropped (and later
/// falls back to its default) without discarding the others.
impl From<SnapshotProxy> for Snapshot {
    fn from(proxy: SnapshotProxy) -> Self {
        let font_size = proxy.font_size.and_then(|size| match u32::try_from(size) {
            Ok(size) => Some(size),
            Err(_) => {
                warn!(font_size = size, "ignoring stored font size");
                None
            },
        });
        let theme = proxy.theme.and_then(|theme| match theme.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(_) => {
                warn!(%theme, "ignoring stored theme");
                None
            },
        });
        Self {
            font_size,
            theme,
            last_book: proxy.last_book,
            last_chapter: proxy.last_chapter,
        }
    }
}

/// Local filesystem preference backend.
///
/// # Examples
///
/// ```no_run
/// use lectio_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("local", "/home/reader/.local/share/lectio/preferences.json")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    /// Absolute path of the preferences document
    path: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// The parent directory is created if it doesn't exist yet; the file
    /// itself is only created on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, or points at a
    /// directory.
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_absolute() || path.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(path));
        }
        let Some(parent) = path.parent() else {
            exn::bail!(ErrorKind::InvalidPath(path));
        };
        if !parent.exists() {
            sync_create_dir(parent).map_err(|e| Self::map_io_error(e, parent))?;
        }
        Ok(Self { name: name.into(), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl PreferenceBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(backend = %self.name, path = %self.path.display()))]
    fn load(&self) -> Result<Snapshot> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            // Nothing saved yet.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Snapshot::default()),
            Err(err) => exn::bail!(Self::map_io_error(err, &self.path)),
        };
        let proxy = from_json::<SnapshotProxy>(&json).or_raise(|| ErrorKind::InvalidData("preferences file"))?;
        Ok(Snapshot::from(proxy))
    }

    #[instrument(skip(self, snapshot), fields(backend = %self.name, path = %self.path.display()))]
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = to_json(&SnapshotProxy::from(snapshot)).or_raise(|| ErrorKind::InvalidData("preferences"))?;
        // Constructor guarantees an absolute file path, so there's always a parent.
        let parent = self.path.parent().unwrap_or(Path::new("/"));
        let mut file = NamedTempFile::new_in(parent).map_err(|e| Self::map_io_error(e, parent))?;
        file.write_all(json.as_bytes()).map_err(|e| Self::map_io_error(e, file.path()))?;
        file.persist(&self.path).map_err(|e| Self::map_io_error(e.error, &self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn backend(dir: &TempDir) -> LocalBackend {
        LocalBackend::new("local", dir.path().join("state").join("preferences.json")).unwrap()
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir);
        assert!(dir.path().join("state").is_dir());
        assert!(!backend.path().exists());
    }

    #[test]
    fn test_missing_file_is_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(backend(&dir).load().unwrap(), Snapshot::default());
    }

    #[test]
    fn test_saved_snapshot_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir);
        let snapshot = Snapshot::default().with_font_size(20).with_theme(Theme::Dark).with_last_position("john", "3");
        backend.save(&snapshot).unwrap();
        assert_eq!(backend.load().unwrap(), snapshot);
        // Overwrites rather than appends.
        backend.save(&Snapshot::default()).unwrap();
        assert_eq!(backend.load().unwrap(), Snapshot::default());
    }

    #[test]
    fn test_rejects_relative_path() {
        let err = LocalBackend::new("local", "relative/preferences.json").err().unwrap();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalBackend::new("local", dir.path()).err().unwrap();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[rstest]
    #[case(std::io::ErrorKind::PermissionDenied, false)]
    #[case(std::io::ErrorKind::Other, true)]
    fn test_io_errors_are_classified(#[case] kind: std::io::ErrorKind, #[case] retryable: bool) {
        let path = Path::new("/state/preferences.json");
        let mapped = LocalBackend::map_io_error(std::io::Error::from(kind), path);
        match kind {
            std::io::ErrorKind::PermissionDenied => assert!(matches!(&mapped, ErrorKind::PermissionDenied(p) if p == path)),
            _ => assert!(matches!(&mapped, ErrorKind::Io(_))),
        }
        assert_eq!(mapped.is_retryable(), retryable);
    }

    #[test]
    fn test_corrupt_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir);
        fs::write(backend.path(), "{ definitely not json").unwrap();
        let err = backend.load().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidData(_)));
    }

    #[rstest]
    #[case::unknown_theme(r#"{"font_size":20,"theme":"sepia","last_book":"john","last_chapter":"3"}"#, Some(20), None)]
    #[case::negative_font_size(r#"{"font_size":-4,"theme":"dark","last_book":"john","last_chapter":"3"}"#, None, Some(Theme::Dark))]
    fn test_unusable_value_keeps_the_others(
        #[case] json: &str,
        #[case] font_size: Option<u32>,
        #[case] theme: Option<Theme>,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir);
        fs::write(backend.path(), json).unwrap();
        let snapshot = backend.load().unwrap();
        assert_eq!(snapshot.font_size, font_size);
        assert_eq!(snapshot.theme, theme);
        assert_eq!(snapshot.last_book.as_deref(), Some("john"));
        assert_eq!(snapshot.last_chapter.as_deref(), Some("3"));
    }
}
