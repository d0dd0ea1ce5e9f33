use crate::error::{Result, VersegrepError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const BUNDLED_CORPUS: &str = include_str!("../data/sonnets.json");
const CACHE_FILENAME: &str = "sonnets.json";

/// A poem: a title and its lines. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new<I, S>(title: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            author: None,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Where a corpus came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    Cache(PathBuf),
    Downloaded,
    Bundled,
}

impl CorpusSource {
    /// One-line message for the interactive shell.
    pub fn notice(&self) -> &'static str {
        match self {
            CorpusSource::Cache(_) => "Loaded documents from the cache.",
            CorpusSource::Downloaded => "Downloaded documents from PoetryDB.",
            CorpusSource::Bundled => "Using the bundled documents.",
        }
    }
}

/// The read-only document collection searched by every query.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub source: CorpusSource,
}

impl Corpus {
    /// Reads a PoetryDB-style JSON array of poems.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| VersegrepError::corpus(path, e))?;
        let documents = parse_documents(&content).map_err(|e| {
            VersegrepError::corpus(path, format!("corrupt cache file (invalid JSON): {e}"))
        })?;
        info!("Loaded {} documents from {}", documents.len(), path.display());

        Ok(Self {
            documents,
            source: CorpusSource::Cache(path.to_path_buf()),
        })
    }

    /// The poems compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let documents = parse_documents(BUNDLED_CORPUS)?;
        Ok(Self {
            documents,
            source: CorpusSource::Bundled,
        })
    }

    /// Loads the cache at `path`, seeding it from the bundled poems when it
    /// does not exist yet.
    ///
    /// A cache that cannot be written is logged and otherwise ignored; a
    /// cache that exists but cannot be read is an error.
    pub fn load_or_seed(path: &Path) -> Result<Self> {
        Self::load_or_else(path, Self::bundled)
    }

    /// Like [`Corpus::load_or_seed`], but a missing cache is first filled
    /// from `fetch`. A failed fetch falls back to the bundled poems.
    pub fn load_or_fetch<F>(path: &Path, fetch: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Vec<Document>>,
    {
        Self::load_or_else(path, || match fetch() {
            Ok(documents) => Ok(Self {
                documents,
                source: CorpusSource::Downloaded,
            }),
            Err(e) => {
                warn!("{e}; falling back to bundled poems");
                Self::bundled()
            }
        })
    }

    fn load_or_else<F>(path: &Path, make: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Self>,
    {
        if path.exists() {
            return Self::load(path);
        }

        debug!("No corpus cache at {}", path.display());
        let corpus = make()?;
        if let Err(e) = corpus.write_cache(path) {
            warn!("Failed to write corpus cache {}: {e}", path.display());
        }
        Ok(corpus)
    }

    pub fn write_cache(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.documents)?;
        fs::write(path, json)?;
        info!("Wrote corpus cache to {}", path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn parse_documents(content: &str) -> serde_json::Result<Vec<Document>> {
    serde_json::from_str(content)
}

/// Default cache location under the user's data directory.
pub fn default_cache_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("versegrep"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_corpus_parses() {
        let corpus = Corpus::bundled().unwrap();

        assert!(!corpus.is_empty());
        assert_eq!(corpus.source, CorpusSource::Bundled);
        assert!(corpus.documents.iter().all(|d| !d.lines.is_empty()));
    }

    #[test]
    fn test_load_ignores_extra_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poems.json");
        fs::write(
            &path,
            r#"[{"title": "Test", "lines": ["the cat sat", "on the mat"], "linecount": "2"}]"#,
        )
        .unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.documents, vec![Document::new("Test", ["the cat sat", "on the mat"])]);
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poems.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Corpus::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_load_or_seed_writes_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sonnets.json");

        let seeded = Corpus::load_or_seed(&path).unwrap();
        assert_eq!(seeded.source, CorpusSource::Bundled);
        assert!(path.exists());

        let cached = Corpus::load_or_seed(&path).unwrap();
        assert_eq!(cached.source, CorpusSource::Cache(path.clone()));
        assert_eq!(cached.documents, seeded.documents);
    }

    #[test]
    fn test_unwritable_cache_still_loads() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a regular file").unwrap();
        let path = blocker.join("sonnets.json");

        let corpus = Corpus::load_or_seed(&path).unwrap();
        assert_eq!(corpus.source, CorpusSource::Bundled);
        assert!(!corpus.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_or_fetch_caches_download() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sonnets.json");
        let poems = vec![Document::new("Sonnet 2", ["When forty winters shall besiege thy brow"])];

        let fetched = Corpus::load_or_fetch(&path, || Ok(poems.clone())).unwrap();
        assert_eq!(fetched.source, CorpusSource::Downloaded);
        assert_eq!(fetched.documents, poems);

        let cached =
            Corpus::load_or_fetch(&path, || panic!("cache present, fetch not expected")).unwrap();
        assert_eq!(cached.source, CorpusSource::Cache(path.clone()));
        assert_eq!(cached.documents, poems);
    }

    #[test]
    fn test_failed_fetch_falls_back_to_bundled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sonnets.json");

        let corpus = Corpus::load_or_fetch(&path, || {
            Err(VersegrepError::fetch("https://poetrydb.org", "network error"))
        })
        .unwrap();

        assert_eq!(corpus.source, CorpusSource::Bundled);
        assert_eq!(corpus.documents, Corpus::bundled().unwrap().documents);
        assert!(path.exists());
    }

    #[test]
    fn test_source_notices() {
        assert_eq!(
            CorpusSource::Cache(PathBuf::from("x.json")).notice(),
            "Loaded documents from the cache."
        );
        assert_eq!(
            CorpusSource::Downloaded.notice(),
            "Downloaded documents from PoetryDB."
        );
        assert_eq!(CorpusSource::Bundled.notice(), "Using the bundled documents.");
    }
}
