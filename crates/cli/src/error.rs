//! CLI Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not open preferences")]
    Storage,
    #[display("no corpus configured; pass --corpus or set `corpus` in the config file")]
    NoCorpus,
    #[display("could not read corpus: {}", _0.display())]
    ReadCorpus(#[error(not(source))] PathBuf),
    #[display("could not load corpus")]
    Corpus,
    #[display("corpus contains no chapters")]
    EmptyCorpus,
    #[display("unknown book: {_0}")]
    UnknownBook(#[error(not(source))] String),
    #[display("invalid argument")]
    Argument,
    #[display("could not write output")]
    Output,
}

