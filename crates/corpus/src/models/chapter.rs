use std::fmt::{Display, Formatter, Result as FmtResult};

/// A chapter within a book.
///
/// Chapter slugs are only unique within their book ("1" exists in almost
/// every book), so a chapter is always addressed together with its book.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chapter {
    /// Position of the chapter within its book
    pub id: u32,
    /// Stable key, unique within the owning book
    pub slug: String,
}
impl Chapter {
    pub fn new(id: u32, slug: impl Into<String>) -> Self {
        Self { id, slug: slug.into() }
    }
}
impl<S: Into<String>> From<(u32, S)> for Chapter {
    fn from((id, slug): (u32, S)) -> Self {
        Self::new(id, slug)
    }
}

impl Display for Chapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.id)
    }
}
