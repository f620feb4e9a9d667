use std::fmt::{Display, Formatter, Result as FmtResult};

/// A book of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book {
    /// Canonical position of the book within the corpus
    pub id: u32,
    /// Stable key, unique across the corpus
    pub slug: String,
    /// Display name
    pub name: String,
}
impl Book {
    pub fn new(id: u32, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
        }
    }
}
impl<S: Into<String>, N: Into<String>> From<(u32, S, N)> for Book {
    fn from((id, slug, name): (u32, S, N)) -> Self {
        Self::new(id, slug, name)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}
