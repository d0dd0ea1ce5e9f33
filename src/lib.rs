pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fetch;
pub mod interactive;
pub mod logging;
pub mod output;
pub mod search;

pub use crate::config::Config;
pub use crate::corpus::{Corpus, CorpusSource, Document};
pub use crate::error::{Result, VersegrepError};
pub use crate::fetch::Fetcher;
pub use crate::interactive::Shell;
pub use crate::search::{
    HighlightMode, LineMatch, SearchMode, SearchResult, Span, find_spans, render, search,
    search_for,
};
pub use clap::Parser;
pub use cli::{Cli, ColorChoice, Commands};
