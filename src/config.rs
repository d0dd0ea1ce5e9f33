use crate::error::{Result, VersegrepError};
use crate::search::{HighlightMode, SearchMode};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// User settings that survive between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Config {
    pub highlight: bool,
    pub search_mode: SearchMode,
    pub hl_mode: HighlightMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight: true,
            search_mode: SearchMode::And,
            hl_mode: HighlightMode::Default,
        }
    }
}

/// Why [`Config::load_or_default`] fell back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFallback {
    Missing,
    Invalid,
    Unreadable,
}

impl ConfigFallback {
    pub fn notice(self, path: &Path) -> String {
        let name = path.display();
        match self {
            ConfigFallback::Missing => format!("No {name} found. Using default configuration."),
            ConfigFallback::Invalid => format!("{name} is invalid. Using default configuration."),
            ConfigFallback::Unreadable => {
                format!("Could not read {name}. Using default configuration.")
            }
        }
    }
}

impl Config {
    /// Parses TOML, keeping every recognised key whose value is valid.
    ///
    /// Bad values only discard themselves; a document that is not TOML at
    /// all is an error.
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut config = Self::default();
        config.update(&table);
        Ok(config)
    }

    /// Applies each valid setting found in `table`.
    pub fn update(&mut self, table: &toml::Table) {
        for (key, value) in table {
            let applied = match key.as_str() {
                "highlight" => value.as_bool().map(|v| self.highlight = v),
                "search_mode" => value
                    .as_str()
                    .and_then(|v| v.parse::<SearchMode>().ok())
                    .map(|v| self.search_mode = v),
                "hl_mode" => value
                    .as_str()
                    .and_then(|v| v.parse::<HighlightMode>().ok())
                    .map(|v| self.hl_mode = v),
                _ => None,
            };
            if applied.is_none() {
                warn!("Ignoring config entry {key} = {value}");
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigFallback>) {
        match Self::load(path) {
            Ok(config) => {
                debug!("Loaded config from {}: {config:?}", path.display());
                (config, None)
            }
            Err(VersegrepError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}", path.display());
                (Self::default(), Some(ConfigFallback::Missing))
            }
            Err(VersegrepError::Io(e)) => {
                warn!("Could not read {}: {e}", path.display());
                (Self::default(), Some(ConfigFallback::Unreadable))
            }
            Err(e) => {
                warn!("Invalid config {}: {e}", path.display());
                (Self::default(), Some(ConfigFallback::Invalid))
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                VersegrepError::Config(format!(
                    "Failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            VersegrepError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })?;
        debug!("Saved config to {}", path.display());

        Ok(())
    }

    /// First existing config file, or the preferred location if none exists.
    pub fn find_config_path() -> PathBuf {
        let xdg_path = dirs::config_dir().map(|dir| dir.join("versegrep/config.toml"));
        if let Some(path) = &xdg_path
            && path.exists()
        {
            return path.clone();
        }

        let current_path = Path::new(".versegrep.toml");
        if current_path.exists() {
            return current_path.to_path_buf();
        }

        xdg_path.unwrap_or_else(|| current_path.to_path_buf())
    }
}
