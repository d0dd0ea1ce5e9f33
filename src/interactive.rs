use crate::config::Config;
use crate::corpus::Document;
use crate::output::{HighlightStyle, print_results};
use crate::search::{HighlightMode, SearchMode, search};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

pub const BANNER: &str = r"
 _  _ ___ ___  ___ ___  __ _ _ _ ___ _ __
| || / -_) '_|(_-</ -_)/ _` | '_/ -_) '_ \
 \_/ \___|_|  /__/\___|\__, |_| \___| .__/
                       |___/        |_|
";

pub const HELP: &str = "Commands:
  :help                      Show this help
  :quit                      Exit
  :highlight on|off          Toggle match highlighting
  :search-mode AND|OR        Require all words (AND) or any word (OR)
  :hl-mode DEFAULT|GREEN     Choose the highlight style
Anything else is a search query; words are matched case-insensitively.";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Quit,
    Help,
    Highlight(bool),
    SearchMode(SearchMode),
    HlMode(HighlightMode),
    Usage(&'static str),
    Unknown,
    Query(String),
}

impl Command {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Command::Empty;
        }
        if !raw.starts_with(':') {
            return Command::Query(raw.to_string());
        }

        let parts: Vec<&str> = raw.split_whitespace().collect();
        match parts.as_slice() {
            [":quit"] => Command::Quit,
            [":help"] => Command::Help,
            [cmd, ..] if cmd.starts_with(":highlight") => match parts.as_slice() {
                [_, arg] if arg.eq_ignore_ascii_case("on") => Command::Highlight(true),
                [_, arg] if arg.eq_ignore_ascii_case("off") => Command::Highlight(false),
                _ => Command::Usage("Usage: :highlight on|off"),
            },
            [cmd, ..] if cmd.starts_with(":search-mode") => match parts.as_slice() {
                [_, arg] => arg
                    .parse::<SearchMode>()
                    .map(Command::SearchMode)
                    .unwrap_or(Command::Usage("Usage: :search-mode AND|OR")),
                _ => Command::Usage("Usage: :search-mode AND|OR"),
            },
            [cmd, ..] if cmd.starts_with(":hl-mode") => match parts.as_slice() {
                [_, arg] => arg
                    .parse::<HighlightMode>()
                    .map(Command::HlMode)
                    .unwrap_or(Command::Usage("Usage: :hl-mode DEFAULT|GREEN")),
                _ => Command::Usage("Usage: :hl-mode DEFAULT|GREEN"),
            },
            _ => Command::Unknown,
        }
    }
}

/// Read-eval-print loop over a fixed document collection.
pub struct Shell<'a> {
    documents: &'a [Document],
    config: Config,
    config_path: Option<PathBuf>,
    allow_highlight: bool,
}

impl<'a> Shell<'a> {
    pub fn new(documents: &'a [Document], config: Config) -> Self {
        Self {
            documents,
            config,
            config_path: None,
            allow_highlight: true,
        }
    }

    /// Persist setting changes to `path`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// With `false`, output is never highlighted whatever the `highlight` setting says.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.allow_highlight = enabled;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn style(&self) -> HighlightStyle {
        (self.allow_highlight && self.config.highlight).then_some(self.config.hl_mode)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        info!("Starting interactive session over {} documents", self.documents.len());
        let mut lines = input.lines();

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out, "\nBye.")?;
                break;
            };

            if !self.handle(&line?, out)? {
                break;
            }
        }

        Ok(())
    }

    /// Executes one line of input; returns `false` when the session ends.
    pub fn handle<W: Write>(&mut self, raw: &str, out: &mut W) -> io::Result<bool> {
        match Command::parse(raw) {
            Command::Empty => {}
            Command::Quit => {
                writeln!(out, "Bye.")?;
                return Ok(false);
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Highlight(on) => {
                self.config.highlight = on;
                writeln!(out, "Highlighting {}", if on { "ON" } else { "OFF" })?;
                self.save_config(out)?;
            }
            Command::SearchMode(mode) => {
                self.config.search_mode = mode;
                writeln!(out, "Search mode set to {mode}")?;
                self.save_config(out)?;
            }
            Command::HlMode(mode) => {
                self.config.hl_mode = mode;
                writeln!(out, "Highlight mode set to {mode}")?;
                self.save_config(out)?;
            }
            Command::Usage(usage) => writeln!(out, "{usage}")?,
            Command::Unknown => writeln!(out, "Unknown command. Type :help for commands.")?,
            Command::Query(query) => self.run_query(&query, out)?,
        }
        Ok(true)
    }

    fn run_query<W: Write>(&self, query: &str, out: &mut W) -> io::Result<()> {
        let start = Instant::now();
        let results = search(self.documents, query, self.config.search_mode);
        let elapsed = start.elapsed();
        info!(
            "Query {query:?} ({}) took {:.2?}",
            self.config.search_mode, elapsed
        );

        print_results(out, query, &results, self.style(), Some(elapsed))
    }

    fn save_config<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        if let Err(e) = self.config.save(path) {
            warn!("{e}");
            writeln!(out, "Writing {} failed.", path.display())?;
        }
        Ok(())
    }
}
