use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single verse of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Verse {
    /// Position of the verse within its chapter
    pub id: u32,
    pub slug: String,
    pub text: String,
}
impl Verse {
    pub fn new(id: u32, slug: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            text: text.into(),
        }
    }
}

impl Display for Verse {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.id, self.text)
    }
}
