mod book;
mod chapter;
mod record;
mod verse;

pub use self::book::Book;
pub use self::chapter::Chapter;
pub use self::record::VerseRecord;
pub use self::verse::Verse;
