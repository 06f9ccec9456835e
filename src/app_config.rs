use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Runtime configuration, read from `conf.json`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory scanned for `*.rule` files
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,

    /// Directory holding `people.json` and `places.json`
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Pronouncing dictionary (CMU format) used by the `en` helpers
    #[serde(default = "default_phonetic_dictionary")]
    pub phonetic_dictionary: Option<PathBuf>,

    /// Language codes used when none are given on the command line (empty = all)
    #[serde(default)]
    pub default_languages: Vec<String>,

    /// Batch translation settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for translating word lists
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum number of words translated at the same time
    #[serde(default = "default_concurrent_words")]
    pub concurrent_words: usize,

    /// Cache phoneme lookups across words
    #[serde(default = "default_true")]
    pub cache_phonemes: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrent_words: default_concurrent_words(),
            cache_phonemes: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("data/rule")
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("data/index")
}

fn default_phonetic_dictionary() -> Option<PathBuf> {
    Some(PathBuf::from("data/dict/cmudict.dict"))
}

fn default_concurrent_words() -> usize {
    // Transliteration is CPU bound; more workers than cores only adds contention
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load a configuration file, writing the defaults first when it is absent
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            return Self::load(path);
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.rules_dir.as_os_str().is_empty() {
            return Err(anyhow!("rules_dir must not be empty"));
        }

        if self.batch.concurrent_words == 0 {
            return Err(anyhow!("batch.concurrent_words must be at least 1"));
        }

        if let Some(code) = self
            .default_languages
            .iter()
            .find(|code| code.is_empty() || code.chars().any(char::is_whitespace))
        {
            return Err(anyhow!("Invalid language code in default_languages: {:?}", code));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            rules_dir: default_rules_dir(),
            index_dir: default_index_dir(),
            phonetic_dictionary: default_phonetic_dictionary(),
            default_languages: Vec::new(),
            batch: BatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
