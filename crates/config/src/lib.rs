//! Configuration loading and validation.
//!
//! Sources are layered with [`figment`], later ones winning:
//!
//! 1. built-in defaults,
//! 2. a config file: the one passed explicitly, or `config.toml` in the
//!    platform config directory if it exists,
//! 3. environment variables prefixed `LECTIO_`, with `__` between nested
//!    keys (`LECTIO_FONT_SIZE__MAX=40`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use lectio_storage::{FontSizeLimits, Theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const ENV_PREFIX: &str = "LECTIO_";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Corpus JSON to read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus: Option<PathBuf>,
    /// Preferences file; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PathBuf>,
    pub font_size: FontSizeLimits,
    /// Theme used until the reader picks one
    pub theme: Theme,
}

impl Config {
    /// Load configuration from every source.
    ///
    /// # Errors
    ///
    /// Fails if `file` is given but missing or of an unknown format, if any
    /// source doesn't deserialize, or if the result doesn't validate.
    #[instrument("loading configuration")]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let figment = Self::defaults();
        let figment = match file {
            Some(path) => Self::merge_file(figment, path)?,
            None => match Self::default_file().filter(|path| path.is_file()) {
                Some(path) => {
                    debug!(path = %path.display(), "using default config file");
                    figment.merge(Toml::file(path))
                },
                None => figment,
            },
        };
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// `config.toml` in the platform config directory.
    pub fn default_file() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Configured preferences file, or `preferences.json` in the platform
    /// data directory.
    pub fn state_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.state {
            return Ok(path.clone());
        }
        let dirs = Self::project_dirs().ok_or_raise(|| ErrorKind::NoHomeDirectory)?;
        Ok(dirs.data_dir().join(STATE_FILE))
    }

    /// Check values that deserialize fine but can't work together.
    pub fn validate(&self) -> Result<()> {
        let FontSizeLimits { min, max, default, step } = self.font_size;
        if min == 0 {
            exn::bail!(ErrorKind::Invalid("font_size.min must be greater than zero".to_string()));
        }
        if step == 0 {
            exn::bail!(ErrorKind::Invalid("font_size.step must be greater than zero".to_string()));
        }
        if !(min <= default && default <= max) {
            exn::bail!(ErrorKind::Invalid(format!(
                "font_size.default ({default}) must lie within [{min}, {max}]"
            )));
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "lectio")
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        })
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }
}
