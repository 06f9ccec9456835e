/*!
 * Phoneme sequence to Chinese characters.
 *
 * The sequence is consumed left to right. At each position a vowel match
 * is tried first, then a consonant match optionally followed by a vowel.
 * Each step resolves a `(consonant, vowel)` coordinate pair, where `1`
 * stands for "nothing on this axis", against the transliteration table.
 */

use log::debug;

use crate::errors::{InputError, MatchError, TranslateError};
use crate::matcher::PatternMatcher;
use crate::rules::{Category, CategoryTables, Rule, Section};

/// Coordinate meaning "no consonant" / "no vowel"
pub const ABSENT: u32 = 1;

/// Runs the rule tables of one language over phoneme sequences
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'r> {
    rule: &'r Rule,
    matcher: PatternMatcher<'r>,
}

impl<'r> Transliterator<'r> {
    pub fn new(rule: &'r Rule) -> Self {
        Self {
            rule,
            matcher: PatternMatcher::new(rule),
        }
    }

    /// Reject empty sequences and symbols the language does not declare
    pub fn validate(&self, phonemes: &[String]) -> Result<(), InputError> {
        if phonemes.is_empty() {
            return Err(InputError::EmptyPhonemes {
                language: self.rule.language_code().to_string(),
            });
        }
        if let Some(symbol) = phonemes.iter().find(|p| self.rule.classify(p).is_none()) {
            return Err(InputError::UnknownPhoneme {
                language: self.rule.language_code().to_string(),
                symbol: symbol.clone(),
                phonemes: phonemes.to_vec(),
            });
        }
        Ok(())
    }

    /// Transliterate and apply the category's post-processing
    pub fn phonemes_to_chinese(&self, phonemes: &[String], category: Category) -> Result<String, TranslateError> {
        let raw = self.transliterate_raw(phonemes, category)?;
        let processed = self.rule.tables(category).post.apply(&raw);
        debug!(
            "{} {}: {:?} -> {} -> {}",
            self.rule.language_code(),
            category,
            phonemes,
            raw,
            processed
        );
        Ok(processed)
    }

    /// Transliterate without post-processing
    pub fn transliterate_raw(&self, phonemes: &[String], category: Category) -> Result<String, TranslateError> {
        self.validate(phonemes)?;

        let tables = self.rule.tables(category);
        let mut output = String::new();
        let mut i = 0;

        while i < phonemes.len() {
            if let Some(vowel) = self.matcher.longest_match(phonemes, i, &tables.vowels) {
                output.push_str(self.find(tables, category, ABSENT, vowel.coordinate, phonemes)?);
                i += vowel.length;
                continue;
            }

            let consonant = self
                .matcher
                .longest_match(phonemes, i, &tables.consonants)
                .ok_or_else(|| MatchError::NoRuleMatched {
                    section: Section::Consonants(category).to_string(),
                    phonemes: phonemes.to_vec(),
                })?;
            i += consonant.length;

            if i == phonemes.len() {
                output.push_str(self.find(tables, category, consonant.coordinate, ABSENT, phonemes)?);
                break;
            }

            match self.matcher.longest_match(phonemes, i, &tables.vowels) {
                Some(vowel) => {
                    output.push_str(self.find(tables, category, consonant.coordinate, vowel.coordinate, phonemes)?);
                    i += vowel.length;
                }
                None => {
                    output.push_str(self.find(tables, category, consonant.coordinate, ABSENT, phonemes)?);
                }
            }
        }

        Ok(output)
    }

    fn find<'t>(
        &self,
        tables: &'t CategoryTables,
        category: Category,
        consonant: u32,
        vowel: u32,
        phonemes: &[String],
    ) -> Result<&'t str, MatchError> {
        tables
            .transliteration
            .get(consonant, vowel)
            .ok_or_else(|| MatchError::NoRuleMatched {
                section: Section::Transliteration(category).to_string(),
                phonemes: phonemes.to_vec(),
            })
    }
}
