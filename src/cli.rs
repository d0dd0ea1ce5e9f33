use crate::output::OutputFormat;
use crate::search::{HighlightMode, SearchMode};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Corpus cache file (PoetryDB JSON); downloaded from PoetryDB if missing
    #[clap(long, value_parser, global = true)]
    pub corpus: Option<PathBuf>,

    /// Never download; seed a missing cache from the bundled poems
    #[clap(long, value_parser, default_value_t = false, global = true)]
    pub offline: bool,

    /// Config file to read and update
    #[clap(long, value_parser, global = true)]
    pub config: Option<PathBuf>,

    #[clap(long, value_parser, default_value_t = false, global = true)]
    pub verbose: bool,

    #[clap(long, value_parser, global = true)]
    pub log: Option<PathBuf>,

    #[clap(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive shell (default)
    Interactive,
    /// Run a single query and exit
    Search {
        #[clap(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Overrides the configured search mode
        #[clap(long, value_enum)]
        mode: Option<SearchMode>,

        /// Overrides the configured highlight mode
        #[clap(long, value_enum)]
        hl_mode: Option<HighlightMode>,

        #[clap(long, value_parser, default_value_t = false)]
        no_highlight: bool,

        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Omit the query timing from the summary line
        #[clap(long, value_parser, default_value_t = false)]
        no_timing: bool,
    },
    /// Print shell completions
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => is_terminal::is_terminal(&std::io::stdout()),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
        }
    }
}
