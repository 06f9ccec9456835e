/*!
 * Longest-match pattern matching with context constraints.
 *
 * Given a phoneme sequence, a start position and a consonant or vowel
 * table, the matcher finds the entry whose alternative matches the most
 * phonemes at that position while its pre and post contexts hold.
 * Equal lengths are resolved in favour of the entry declared first.
 */

use log::trace;

use crate::rules::{ContextToken, PatternTable, Rule};

/// A successful match: the entry's coordinate and how many phonemes it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    pub coordinate: u32,
    pub length: usize,
}

/// Matcher bound to the symbol classes of one rule
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'r> {
    rule: &'r Rule,
}

impl<'r> PatternMatcher<'r> {
    pub fn new(rule: &'r Rule) -> Self {
        Self { rule }
    }

    /// Longest accepted match of `table` at `start`, or `None`
    pub fn longest_match(&self, phonemes: &[String], start: usize, table: &PatternTable) -> Option<PatternMatch> {
        if start >= phonemes.len() {
            return None;
        }

        let before = &phonemes[..start];
        let mut best: Option<PatternMatch> = None;

        for entry in table.entries() {
            for alternative in &entry.key.alternatives {
                if !alternative_matches_at(phonemes, start, alternative) {
                    continue;
                }
                let after = &phonemes[start + alternative.len()..];
                if !self.pre_context_holds(before, &entry.key.pre)
                    || !self.post_context_holds(after, &entry.key.post)
                {
                    continue;
                }
                // strictly longer only: the earlier declaration keeps ties
                if best.is_none_or(|b| alternative.len() > b.length) {
                    best = Some(PatternMatch {
                        coordinate: entry.coordinate,
                        length: alternative.len(),
                    });
                }
            }
        }

        if let Some(found) = best {
            trace!(
                "{}: matched {:?} at {} -> coordinate {}",
                self.rule.language_code(),
                &phonemes[start..start + found.length],
                start,
                found.coordinate
            );
        }
        best
    }

    /// Check a pre-context against the phonemes before the match.
    ///
    /// Tokens are read from the last one (next to the match) outwards.
    /// `$` holds when no phoneme is left on that side.
    pub fn pre_context_holds(&self, before: &[String], tokens: &[ContextToken]) -> bool {
        let mut remaining = before.len();
        for token in tokens.iter().rev() {
            if *token == ContextToken::WordStart {
                if remaining != 0 {
                    return false;
                }
                continue;
            }
            if remaining == 0 || !self.accepts(token, &before[remaining - 1]) {
                return false;
            }
            remaining -= 1;
        }
        true
    }

    /// Check a post-context against the phonemes after the match.
    ///
    /// `^` holds when no phoneme is left on that side.
    pub fn post_context_holds(&self, after: &[String], tokens: &[ContextToken]) -> bool {
        let mut offset = 0;
        for token in tokens {
            if *token == ContextToken::WordEnd {
                if offset != after.len() {
                    return false;
                }
                continue;
            }
            match after.get(offset) {
                Some(symbol) if self.accepts(token, symbol) => offset += 1,
                _ => return false,
            }
        }
        true
    }

    fn accepts(&self, token: &ContextToken, symbol: &str) -> bool {
        match token {
            ContextToken::Phoneme(expected) => expected == symbol,
            ContextToken::AnyVowel => self.rule.is_vowel(symbol),
            ContextToken::AnyConsonant => self.rule.is_consonant(symbol),
            ContextToken::WordStart | ContextToken::WordEnd => false,
        }
    }
}

/// Whether `alternative` equals the phonemes starting at `start`, in full
pub fn alternative_matches_at(phonemes: &[String], start: usize, alternative: &[String]) -> bool {
    !alternative.is_empty()
        && phonemes
            .get(start..start + alternative.len())
            .is_some_and(|window| window == alternative)
}
