//! Config Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration sources could not be merged or deserialized
    #[display("could not load configuration")]
    Load,
    /// An explicitly requested config file does not exist
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Config file extension isn't one of the supported formats
    #[display("unsupported config format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// Values loaded fine but contradict each other
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
    /// No platform directory to fall back on for unset paths
    #[display("could not determine a home directory")]
    NoHomeDirectory,
}

impl ErrorKind {
    pub fn is_retryable(&self) -> bool {
        false
    }
}
