use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::batch::{BatchTranslator, WordOutcome};
use crate::file_utils::FileManager;
use crate::index::IndexTranslator;
use crate::language_utils;
use crate::languages::builtin_registry;
use crate::phonetics::{CachedProducer, PhonemeProducer, PhoneticDictionary};
use crate::rules::{load_rules, FunctionRegistry, LoadReport, RuleSet};
use crate::translator::{LanguageOutcome, RuleTranslator, TransliterationRecord};

// @module: Application controller wiring configuration, rules and index

/// Everything known about one word: curated index hits and rule results
#[derive(Debug, Clone)]
pub struct Lookup {
    pub index: Vec<TransliterationRecord>,
    pub rules: Vec<LanguageOutcome>,
}

/// A loaded rule language, for listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Rule file stem
    pub code: String,
    /// Name from the rule file's `.meta` section
    pub name: String,
    /// ISO 639 English name, when the code is an ISO code
    pub iso_name: Option<String>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    registry: Arc<FunctionRegistry>,
    translator: RuleTranslator,
    index: IndexTranslator,
    load_report_failures: usize,
}

impl Controller {
    /// Build the function registry, then load rules and index as configured
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let registry = Arc::new(builtin_registry(Self::build_producer(&config)?));
        let report = load_rules(&config.rules_dir, &registry)
            .with_context(|| format!("Failed to load rules from {:?}", config.rules_dir))?;
        if report.rules.is_empty() {
            return Err(anyhow!("No usable rule file in {:?}", config.rules_dir));
        }

        let index = if FileManager::dir_exists(&config.index_dir) {
            IndexTranslator::load(&config.index_dir)?
        } else {
            warn!("Index directory {:?} not found, continuing without index", config.index_dir);
            IndexTranslator::new()
        };

        Ok(Self {
            load_report_failures: report.failures.len(),
            translator: RuleTranslator::new(report.rules),
            registry,
            index,
            config,
        })
    }

    /// Controller over already loaded parts
    pub fn from_parts(config: Config, registry: FunctionRegistry, rules: RuleSet, index: IndexTranslator) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
            translator: RuleTranslator::new(rules),
            index,
            load_report_failures: 0,
        }
    }

    fn build_producer(config: &Config) -> Result<Arc<dyn PhonemeProducer>> {
        let dictionary = match &config.phonetic_dictionary {
            Some(path) if FileManager::file_exists(path) => {
                let dictionary = PhoneticDictionary::load(path)?;
                info!("Phonetic dictionary loaded from {:?}: {} word(s)", path, dictionary.len());
                dictionary
            }
            Some(path) => {
                warn!("Phonetic dictionary {:?} not found, dictionary lookups will fail", path);
                PhoneticDictionary::new()
            }
            None => PhoneticDictionary::new(),
        };

        if config.batch.cache_phonemes {
            Ok(Arc::new(CachedProducer::new(dictionary)))
        } else {
            Ok(Arc::new(dictionary))
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &RuleTranslator {
        &self.translator
    }

    pub fn index(&self) -> &IndexTranslator {
        &self.index
    }

    /// Number of rule files that failed at startup
    pub fn load_failures(&self) -> usize {
        self.load_report_failures
    }

    /// Loaded languages, sorted by code
    pub fn languages(&self) -> Vec<LanguageInfo> {
        self.translator
            .rules()
            .iter()
            .map(|rule| LanguageInfo {
                code: rule.language_code().to_string(),
                name: rule.language_name().to_string(),
                iso_name: language_utils::get_language_name(rule.language_code()).ok(),
            })
            .collect()
    }

    /// Map requested codes onto loaded rule codes.
    ///
    /// An empty request falls back to `default_languages`, and an empty
    /// result means every language. Any code without a loaded rule is an
    /// error naming the available ones.
    pub fn resolve_languages(&self, requested: &[String]) -> Result<Vec<String>> {
        let requested: &[String] = if requested.is_empty() {
            &self.config.default_languages
        } else {
            requested
        };

        let mut resolved = Vec::with_capacity(requested.len());
        let mut unknown = Vec::new();
        for code in requested {
            match language_utils::resolve_loaded_code(code, self.translator.rules().codes()) {
                Some(loaded) => {
                    if !resolved.iter().any(|c: &String| c == loaded) {
                        resolved.push(loaded.to_string());
                    }
                }
                None => unknown.push(code.clone()),
            }
        }

        if !unknown.is_empty() {
            let available: Vec<&str> = self.translator.rules().codes().collect();
            return Err(anyhow!(
                "Unknown language code(s): {} (available: {})",
                unknown.join(", "),
                available.join(", ")
            ));
        }
        Ok(resolved)
    }

    /// Index hits plus per-language rule outcomes for one word
    pub fn lookup(&self, word: &str, requested: &[String]) -> Result<Lookup> {
        let languages = self.resolve_languages(requested)?;
        let index = self.index.search(word)?;
        let rules = self.translator.translate_each(word, &languages)?;
        debug!(
            "Lookup \"{}\": {} index hit(s), {} language(s)",
            word,
            index.len(),
            rules.len()
        );
        Ok(Lookup { index, rules })
    }

    /// Rule records for one word; the first failing language aborts
    pub fn translate(&self, word: &str, requested: &[String]) -> Result<Vec<TransliterationRecord>> {
        let languages = self.resolve_languages(requested)?;
        Ok(self.translator.translate(word, &languages)?)
    }

    /// Load a single rule file or a directory without keeping the result
    pub fn check<P: AsRef<Path>>(&self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        let loader = crate::rules::RuleLoader::new(&self.registry);
        if FileManager::file_exists(path) {
            let mut report = LoadReport::default();
            match loader.load_file(path) {
                Ok(rule) => {
                    report.rules.insert(rule);
                }
                Err(e) => report.failures.push(e),
            }
            Ok(report)
        } else if FileManager::dir_exists(path) {
            loader.load_dir(path)
        } else {
            Err(anyhow!("Path does not exist: {:?}", path))
        }
    }

    /// Translate a word list, with a progress bar when `show_progress` is set
    pub async fn run_batch(&self, words: &[String], requested: &[String], show_progress: bool) -> Result<Vec<WordOutcome>> {
        let languages = self.resolve_languages(requested)?;
        let batch = BatchTranslator::new(self.translator.clone(), self.config.batch.concurrent_words);

        let progress_bar = if show_progress {
            let progress_bar = ProgressBar::new(words.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({percent}%)")
                .or_else(|_| ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            progress_bar.set_style(style.progress_chars("█▓▒░"));
            progress_bar
        } else {
            ProgressBar::hidden()
        };

        info!(
            "Translating {} word(s) with up to {} worker(s)",
            words.len(),
            batch.max_concurrent_words()
        );

        let callback_bar = progress_bar.clone();
        let outcomes = batch
            .translate_words(words, &languages, move |done, _total| {
                callback_bar.set_position(done as u64);
            })
            .await?;
        progress_bar.finish_and_clear();

        let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
        if failed > 0 {
            warn!("{} of {} word(s) could not be translated", failed, outcomes.len());
        } else {
            info!("All {} word(s) translated", outcomes.len());
        }
        Ok(outcomes)
    }
}
