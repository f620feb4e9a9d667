use clap::{Parser, Subcommand};
use exn::{OptionExt, ResultExt};
use lectio_config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

mod error;
mod logging;
mod session;

use crate::error::{ErrorKind, Result};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "lectio")]
#[command(about = "Read a scripture corpus chapter by chapter")]
#[command(version)]
struct Cli {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus JSON, overriding the configured one
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// List books in reading order
    Books,
    /// List the chapters of a book
    Chapters {
        /// Book slug
        book: String,
    },
    /// Print a chapter; without arguments, the one last read
    Read {
        /// Book slug
        book: Option<String>,
        /// Chapter slug; defaults to the first chapter of the book
        chapter: Option<String>,
    },
    /// Move to the following chapter, crossing into the next book
    Next,
    /// Move to the preceding chapter, crossing into the previous book
    Previous,
    /// Move one chapter in the given direction
    Step {
        /// next (n, forward) or previous (p, prev, back)
        direction: String,
    },
    /// Show or change the reading font size
    Font {
        /// increase, decrease, reset, or a size
        adjustment: Option<String>,
    },
    /// Show or change the theme
    Theme {
        /// toggle, light or dark
        choice: Option<String>,
    },
}
impl Command {
    pub(crate) fn needs_corpus(&self) -> bool {
        !matches!(self, Self::Font { .. } | Self::Theme { .. })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(corpus) = cli.corpus {
        config.corpus = Some(corpus);
    }
    let mut session = Session::open(&config)?;
    if cli.command.needs_corpus() {
        let path = config.corpus.as_deref().ok_or_raise(|| ErrorKind::NoCorpus)?;
        session.load_corpus(path)?;
    }
    session.run(&cli.command, &mut std::io::stdout().lock())
}
