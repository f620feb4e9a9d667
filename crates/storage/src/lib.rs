//! Persistence of reader preferences.
//!
//! A [`PreferenceBackend`] loads and saves a [`Snapshot`]; [`Preferences`]
//! layers clamping, defaults and error fallback on top and doubles as the
//! [`PositionStore`](lectio_corpus::PositionStore) of a reading session.

pub mod backend;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
mod font;
mod models;
mod preferences;
mod theme;

pub use crate::backend::PreferenceBackend;
pub use crate::font::FontSizeLimits;
pub use crate::models::Snapshot;
pub use crate::preferences::Preferences;
pub use crate::theme::Theme;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn PreferenceBackend + Send + Sync>;
