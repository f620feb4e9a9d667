//! In-memory preference backend for testing.

use crate::error::{ErrorKind, Result};
use crate::{PreferenceBackend, Snapshot};
use std::sync::RwLock;

/// In-memory preference backend for testing.
///
/// The snapshot lives behind a [`RwLock`], so all trait methods can operate
/// on `&self` without external synchronisation. A backend built with
/// [`failing()`](Self::failing) errors on every call, for exercising the
/// fallback paths of [`Preferences`](crate::Preferences).
pub struct MockBackend {
    name: String,
    storage: RwLock<Snapshot>,
    failing: bool,
}

impl MockBackend {
    /// Create a mock backend holding `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(snapshot),
            failing: false,
        }
    }

    /// Change the name of the mock backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every load and save fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Current contents, bypassing the failure switch.
    pub fn snapshot(&self) -> Snapshot {
        self.storage.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        Self::with_snapshot(Snapshot::default())
    }
}

impl PreferenceBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Snapshot> {
        if self.failing {
            exn::bail!(ErrorKind::BackendError("mock backend configured to fail".to_string()));
        }
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.failing {
            exn::bail!(ErrorKind::BackendError("mock backend configured to fail".to_string()));
        }
        *self.storage.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot.clone();
        Ok(())
    }
}
