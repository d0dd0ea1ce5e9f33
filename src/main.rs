use clap::CommandFactory;
use colored::*;
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use versegrep::config::Config;
use versegrep::corpus::{self, Corpus, CorpusSource};
use versegrep::error::Result as VersegrepResult;
use versegrep::interactive::{BANNER, Shell};
use versegrep::logging;
use versegrep::output::{self, OutputFormat};
use versegrep::{Cli, Commands, Fetcher, Parser, search};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> VersegrepResult<()> {
    logging::init(cli.verbose, cli.log.as_deref())?;

    let color = cli.color.enabled();
    if !color {
        colored::control::set_override(false);
    }

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    match cli.command.as_ref().unwrap_or(&Commands::Interactive) {
        Commands::Interactive => {
            println!("{BANNER}");
            let config_path = config_path(cli);
            let config = load_config(&config_path);

            let (corpus, load_time) = load_corpus(cli)?;
            println!("{}", corpus.source.notice());
            println!(
                "Loading documents took: {:.3} [ms]",
                load_time.as_secs_f64() * 1000.0
            );
            println!("Loaded {} documents.", corpus.len());

            let mut shell = Shell::new(&corpus.documents, config)
                .with_config_path(config_path)
                .with_color(color);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell.run(stdin.lock(), &mut stdout)?;
        }
        Commands::Search {
            query,
            mode,
            hl_mode,
            no_highlight,
            format,
            no_timing,
        } => {
            let mut config = load_config_quiet(&config_path(cli));
            if let Some(mode) = mode {
                config.search_mode = *mode;
            }
            if let Some(hl_mode) = hl_mode {
                config.hl_mode = *hl_mode;
            }
            if *no_highlight {
                config.highlight = false;
            }

            let (corpus, _) = load_corpus(cli)?;
            let query = query.join(" ");

            let start = Instant::now();
            let results = search(&corpus.documents, &query, config.search_mode);
            let elapsed = start.elapsed();

            let mut stdout = io::stdout().lock();
            match format {
                OutputFormat::Json => {
                    output::print_json(&mut stdout, &query, config.search_mode, &results)?
                }
                OutputFormat::Text => {
                    let style = (color && config.highlight).then_some(config.hl_mode);
                    let timing = (!*no_timing).then_some(elapsed);
                    output::print_results(&mut stdout, &query, &results, style, timing)?
                }
            }
            stdout.flush()?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "versegrep", &mut io::stdout());
        }
    }

    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::find_config_path)
}

/// Loads the config, telling the user when defaults are used instead.
fn load_config(path: &Path) -> Config {
    let (config, fallback) = Config::load_or_default(path);
    if let Some(fallback) = fallback {
        println!("{}", fallback.notice(path).dimmed());
    }
    config
}

fn load_config_quiet(path: &Path) -> Config {
    Config::load_or_default(path).0
}

fn load_corpus(cli: &Cli) -> VersegrepResult<(Corpus, Duration)> {
    let path = cli.corpus.clone().unwrap_or_else(corpus::default_cache_path);

    let start = Instant::now();
    let corpus = if cli.offline {
        Corpus::load_or_seed(&path)?
    } else {
        Corpus::load_or_fetch(&path, || Fetcher::poetrydb()?.fetch())?
    };
    let elapsed = start.elapsed();

    match &corpus.source {
        CorpusSource::Cache(path) => info!("Loaded documents from the cache {}", path.display()),
        CorpusSource::Downloaded => info!("Downloaded documents from PoetryDB"),
        CorpusSource::Bundled => info!("Loaded bundled documents"),
    }
    Ok((corpus, elapsed))
}
