//! One reading session: a corpus whose position is kept in the preferences.

use crate::Command;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use lectio_config::Config;
use lectio_corpus::{Corpus, Direction, Position};
use lectio_storage::Preferences;
use lectio_storage::backend::LocalBackend;
use lectio_storage::cli::{FontAdjustment, ThemeChoice};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

pub(crate) struct Session {
    corpus: Corpus,
    preferences: Preferences,
}

impl Session {
    pub(crate) fn new(preferences: Preferences) -> Self {
        let mut corpus = Corpus::with_store(Arc::new(preferences.clone()));
        corpus.subscribe(|position| {
            let (book, chapter) = position.slugs();
            debug!(book, chapter, verses = position.verses.len(), "position changed");
        });
        Self { corpus, preferences }
    }

    /// Preferences stored in the configured state file.
    pub(crate) fn open(config: &Config) -> Result<Self> {
        let state = config.state_path().or_raise(|| ErrorKind::Config)?;
        let state = std::path::absolute(&state).or_raise(|| ErrorKind::Storage)?;
        let backend = LocalBackend::new("local", state).or_raise(|| ErrorKind::Storage)?;
        let preferences = Preferences::new(Arc::new(backend))
            .with_font_size_limits(config.font_size)
            .with_default_theme(config.theme);
        Ok(Self::new(preferences))
    }

    #[instrument(skip(self))]
    pub(crate) fn load_corpus(&mut self, path: &Path) -> Result<()> {
        let json = std::fs::read_to_string(path).or_raise(|| ErrorKind::ReadCorpus(path.to_path_buf()))?;
        self.ingest_json(&json)
    }

    pub(crate) fn ingest_json(&mut self, json: &str) -> Result<()> {
        self.corpus.ingest_json(json).or_raise(|| ErrorKind::Corpus)
    }

    pub(crate) fn run(&mut self, command: &Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Books => {
                for book in self.corpus.books() {
                    writeln!(out, "{}\t{}", book.slug, book.name).or_raise(|| ErrorKind::Output)?;
                }
            },
            Command::Chapters { book } => {
                let chapters = self.corpus.chapters(book);
                if chapters.is_empty() {
                    exn::bail!(ErrorKind::UnknownBook(book.clone()));
                }
                for chapter in chapters {
                    writeln!(out, "{}", chapter.slug).or_raise(|| ErrorKind::Output)?;
                }
            },
            Command::Read { book: None, .. } => {
                let position = self.corpus.restore().ok_or_raise(|| ErrorKind::EmptyCorpus)?;
                write_position(out, position)?;
            },
            Command::Read {
                book: Some(book),
                chapter,
            } => {
                let chapter = match chapter {
                    Some(chapter) => chapter.clone(),
                    None => self.first_chapter(book)?,
                };
                let position = self.corpus.set_position_by_slug(book, &chapter).or_raise(|| ErrorKind::Argument)?;
                write_position(out, position)?;
            },
            Command::Next => self.step(Direction::Next, out)?,
            Command::Previous => self.step(Direction::Previous, out)?,
            Command::Step { direction } => {
                let direction = direction.parse::<Direction>().or_raise(|| ErrorKind::Argument)?;
                self.step(direction, out)?
            },
            Command::Font { adjustment } => {
                let adjustment = FontAdjustment::try_from(adjustment.clone()).or_raise(|| ErrorKind::Argument)?;
                let size = adjustment.apply(&self.preferences);
                let limits = self.preferences.font_size_limits();
                writeln!(out, "{size} ({}-{})", limits.min, limits.max).or_raise(|| ErrorKind::Output)?;
            },
            Command::Theme { choice } => {
                let choice = ThemeChoice::try_from(choice.clone()).or_raise(|| ErrorKind::Argument)?;
                writeln!(out, "{}", choice.apply(&self.preferences)).or_raise(|| ErrorKind::Output)?;
            },
        }
        Ok(())
    }

    fn first_chapter(&self, book: &str) -> Result<String> {
        let chapter = self.corpus.chapters(book).first().ok_or_raise(|| ErrorKind::UnknownBook(book.to_string()))?;
        Ok(chapter.slug.clone())
    }

    fn step(&mut self, direction: Direction, out: &mut impl Write) -> Result<()> {
        if self.corpus.restore().is_none() {
            exn::bail!(ErrorKind::EmptyCorpus);
        }
        match self.corpus.navigate(direction).or_raise(|| ErrorKind::Corpus)? {
            Some(position) => write_position(out, position),
            None => {
                debug!(%direction, "no chapter in that direction");
                let edge = match direction {
                    Direction::Next => "end",
                    Direction::Previous => "beginning",
                };
                writeln!(out, "Already at the {edge} of the corpus.").or_raise(|| ErrorKind::Output)
            },
        }
    }
}

fn write_position(out: &mut impl Write, position: &Position) -> Result<()> {
    let Position { book, chapter, verses } = position;
    writeln!(out, "{book} {chapter}\n").or_raise(|| ErrorKind::Output)?;
    for verse in verses {
        writeln!(out, "{verse}").or_raise(|| ErrorKind::Output)?;
    }
    Ok(())
}
