/*!
 * Pronouncing dictionary in the CMU text format.
 *
 * ```text
 * ;;; comment
 * MIKE  M AY1 K
 * LIVE  L IH1 V
 * LIVE(1)  L AY1 V
 * ```
 *
 * Words are matched case-insensitively and the first pronunciation wins.
 * Headwords that do not start with a letter (`!EXCLAMATION-POINT`,
 * `'TIS`) are skipped. Files are read as UTF-8, falling back to
 * ISO-8859-1 as used by the upstream CMU distribution.
 */

use anyhow::Result;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::PhonemeProducer;
use crate::errors::PhoneticsError;
use crate::file_utils::FileManager;

/// Word to pronunciations, with an optional producer for unknown words
#[derive(Default, Clone)]
pub struct PhoneticDictionary {
    entries: HashMap<String, Vec<Vec<String>>>,
    fallback: Option<Arc<dyn PhonemeProducer>>,
}

impl PhoneticDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text. Lines without a pronunciation are skipped.
    pub fn parse(text: &str) -> Self {
        let mut dictionary = Self::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(head) = parts.next() else { continue };
            let symbols: Vec<String> = parts.map(str::to_string).collect();
            if symbols.is_empty() {
                warn!("Dictionary line {} has no pronunciation: {}", index + 1, line);
                continue;
            }

            if !head.chars().next().is_some_and(char::is_alphabetic) {
                continue;
            }

            dictionary.insert(strip_variant(head), symbols);
        }
        debug!("Phonetic dictionary parsed: {} word(s)", dictionary.len());
        dictionary
    }

    /// Load a dictionary file, UTF-8 or ISO-8859-1
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = FileManager::read_bytes(path)?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                debug!("{:?} is not UTF-8, reading it as ISO-8859-1", path);
                e.into_bytes().into_iter().map(char::from).collect()
            }
        };
        Ok(Self::parse(&text))
    }

    /// Use `fallback` for words missing from the dictionary
    pub fn with_fallback(mut self, fallback: Arc<dyn PhonemeProducer>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Add a pronunciation after any existing ones
    pub fn insert(&mut self, word: &str, symbols: Vec<String>) {
        self.entries.entry(word.to_uppercase()).or_default().push(symbols);
    }

    /// First pronunciation of a word
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(&word.to_uppercase())
            .and_then(|all| all.first())
            .map(Vec::as_slice)
    }

    /// Every pronunciation of a word, in file order
    pub fn pronunciations(&self, word: &str) -> &[Vec<String>] {
        self.entries
            .get(&word.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PhonemeProducer for PhoneticDictionary {
    fn phonemes(&self, word: &str) -> Result<Vec<String>, PhoneticsError> {
        if let Some(symbols) = self.lookup(word) {
            return Ok(symbols.to_vec());
        }
        match &self.fallback {
            Some(fallback) => {
                debug!("\"{}\" not in dictionary, using fallback producer", word);
                fallback.phonemes(word)
            }
            None => Err(PhoneticsError::NotFound(word.to_string())),
        }
    }
}

/// `LIVE(1)` -> `LIVE`
fn strip_variant(head: &str) -> &str {
    match head.find('(') {
        Some(open) if head.ends_with(')') && open > 0 => &head[..open],
        _ => head,
    }
}
