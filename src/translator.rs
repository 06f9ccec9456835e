/*!
 * Rule-based translation entry point.
 *
 * `RuleTranslator` owns the loaded `RuleSet` behind an `Arc` and is cheap
 * to clone; every call only reads the rules, so it can be used from many
 * threads at once.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{InputError, TranslateError};
use crate::rules::{Category, Rule, RuleSet};
use crate::transliteration::Transliterator;

/// One transliteration result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterationRecord {
    /// Normalized (capitalized) keyword
    pub keyword: String,
    /// Language display name
    pub language: String,
    /// `People` or `Places`
    pub category: Category,
    /// Chinese transliteration
    pub chinese: String,
}

/// Result of translating one word for one language
#[derive(Debug, Clone)]
pub struct LanguageOutcome {
    pub language_code: String,
    pub language_name: String,
    pub result: Result<Vec<TransliterationRecord>, TranslateError>,
}

/// Validate a keyword and capitalize its first letter, leaving the rest as is
pub fn normalize_keyword(word: &str) -> Result<String, InputError> {
    if word.is_empty() {
        return Err(InputError::EmptyWord);
    }
    if word.chars().any(char::is_whitespace) {
        return Err(InputError::WordContainsWhitespace(word.to_string()));
    }

    let mut chars = word.chars();
    let normalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Ok(normalized)
}

/// Translates words with the loaded rule files
#[derive(Debug, Clone, Default)]
pub struct RuleTranslator {
    rules: Arc<RuleSet>,
}

impl RuleTranslator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules: Arc::new(rules) }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Translate `word` for the requested languages (all when empty).
    ///
    /// Produces a People and a Places record per language. The first
    /// failure aborts the whole call.
    pub fn translate<S: AsRef<str>>(
        &self,
        word: &str,
        language_codes: &[S],
    ) -> Result<Vec<TransliterationRecord>, TranslateError> {
        let keyword = normalize_keyword(word)?;
        let mut records = Vec::new();
        for rule in self.rules.select(language_codes) {
            records.extend(Self::translate_with(rule, &keyword)?);
        }
        Ok(records)
    }

    /// Like `translate`, but each language succeeds or fails on its own.
    ///
    /// Input errors on the word itself are still returned up front.
    pub fn translate_each<S: AsRef<str>>(
        &self,
        word: &str,
        language_codes: &[S],
    ) -> Result<Vec<LanguageOutcome>, InputError> {
        let keyword = normalize_keyword(word)?;
        Ok(self
            .rules
            .select(language_codes)
            .into_iter()
            .map(|rule| LanguageOutcome {
                language_code: rule.language_code().to_string(),
                language_name: rule.language_name().to_string(),
                result: Self::translate_with(rule, &keyword),
            })
            .collect())
    }

    /// Both categories of an already normalized keyword with one rule
    pub fn translate_with(rule: &Rule, keyword: &str) -> Result<Vec<TransliterationRecord>, TranslateError> {
        let phonemes = rule.to_phonetics().apply(keyword)?;
        debug!("{} phonetics of {}: {:?}", rule.language_code(), keyword, phonemes);

        let transliterator = Transliterator::new(rule);
        Category::ALL
            .iter()
            .map(|&category| {
                Ok(TransliterationRecord {
                    keyword: keyword.to_string(),
                    language: rule.language_name().to_string(),
                    category,
                    chinese: transliterator.phonemes_to_chinese(&phonemes, category)?,
                })
            })
            .collect()
    }
}
