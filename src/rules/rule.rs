/*!
 * In-memory form of a compiled rule file.
 */

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::Arc;

use super::grammar::Section;
use super::pattern::PatternKey;
use super::registry::{PhoneticsFn, PostFn};
use super::Category;

/// Class of a declared phoneme symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhonemeClass {
    Consonant,
    Vowel,
}

/// One `key = coordinate` line of a consonant or vowel table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub key: PatternKey,
    pub coordinate: u32,
}

/// Pattern key to coordinate, in declaration order
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    positions: HashMap<PatternKey, usize>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Redefining a key replaces its coordinate in place and
    /// returns the previous one.
    pub fn insert(&mut self, key: PatternKey, coordinate: u32) -> Option<u32> {
        if let Some(&position) = self.positions.get(&key) {
            let previous = self.entries[position].coordinate;
            self.entries[position].coordinate = coordinate;
            return Some(previous);
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push(PatternEntry { key, coordinate });
        None
    }

    pub fn get(&self, key: &PatternKey) -> Option<u32> {
        self.positions.get(key).map(|&p| self.entries[p].coordinate)
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `(consonant, vowel)` coordinate pair to output text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransliterationTable {
    entries: BTreeMap<(u32, u32), String>,
}

impl TransliterationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, returning the replaced text if the pair was defined
    pub fn insert(&mut self, consonant: u32, vowel: u32, text: String) -> Option<String> {
        self.entries.insert((consonant, vowel), text)
    }

    pub fn get(&self, consonant: u32, vowel: u32) -> Option<&str> {
        self.entries.get(&(consonant, vowel)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(u32, u32), &String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The tables and post-processing of one category
#[derive(Debug, Clone)]
pub struct CategoryTables {
    pub consonants: PatternTable,
    pub vowels: PatternTable,
    pub transliteration: TransliterationTable,
    pub post: PostFn,
}

/// A compiled rule file. Built once by the loader, then only read.
#[derive(Debug, Clone)]
pub struct Rule {
    pub(super) language_code: String,
    pub(super) language_name: String,
    pub(super) consonant_symbols: Vec<String>,
    pub(super) vowel_symbols: Vec<String>,
    pub(super) classes: HashMap<String, PhonemeClass>,
    pub(super) people: CategoryTables,
    pub(super) places: CategoryTables,
    pub(super) to_phonetics: PhoneticsFn,
}

impl Rule {
    /// Language code (the rule file stem)
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Display name from the `.meta` section
    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn consonant_symbols(&self) -> &[String] {
        &self.consonant_symbols
    }

    pub fn vowel_symbols(&self) -> &[String] {
        &self.vowel_symbols
    }

    /// Class of a symbol, `None` when the language does not declare it
    pub fn classify(&self, symbol: &str) -> Option<PhonemeClass> {
        self.classes.get(symbol).copied()
    }

    pub fn is_vowel(&self, symbol: &str) -> bool {
        self.classify(symbol) == Some(PhonemeClass::Vowel)
    }

    pub fn is_consonant(&self, symbol: &str) -> bool {
        self.classify(symbol) == Some(PhonemeClass::Consonant)
    }

    /// Tables of a category
    pub fn tables(&self, category: Category) -> &CategoryTables {
        match category {
            Category::People => &self.people,
            Category::Places => &self.places,
        }
    }

    pub fn to_phonetics(&self) -> &PhoneticsFn {
        &self.to_phonetics
    }

    /// Serialize the rule back into rule-file text.
    ///
    /// Parsing the output with the same registry gives an equivalent rule.
    pub fn to_rule_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "// {} ({})", self.language_name, self.language_code);

        let _ = writeln!(out, ".{}", Section::Meta);
        let _ = writeln!(out, "language_name = {}", self.language_name);

        let _ = writeln!(out, "\n.{}", Section::Phonetics);
        let _ = writeln!(out, "consonants = {}", self.consonant_symbols.join("|"));
        let _ = writeln!(out, "vowels = {}", self.vowel_symbols.join("|"));

        for category in Category::ALL {
            let tables = self.tables(category);
            for (section, table) in [
                (Section::Consonants(category), &tables.consonants),
                (Section::Vowels(category), &tables.vowels),
            ] {
                let _ = writeln!(out, "\n.{}", section);
                for entry in table.entries() {
                    let _ = writeln!(out, "{} = {}", entry.key, entry.coordinate);
                }
            }
            let _ = writeln!(out, "\n.{}", Section::Transliteration(category));
            for ((consonant, vowel), text) in tables.transliteration.iter() {
                let _ = writeln!(out, "{}, {} = {}", consonant, vowel, text);
            }
        }

        let _ = writeln!(out, "\n.{}", Section::ToPhonetics);
        let _ = writeln!(out, "{}", self.to_phonetics.spec());
        for category in Category::ALL {
            let _ = writeln!(out, "\n.{}", Section::Post(category));
            let _ = writeln!(out, "{}", self.tables(category).post.spec());
        }

        out
    }
}

/// Loaded rules keyed by language code, iterated in code order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Arc<Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule under its language code, replacing any previous one
    pub fn insert(&mut self, rule: Rule) -> Option<Arc<Rule>> {
        self.rules.insert(rule.language_code.clone(), Arc::new(rule))
    }

    pub fn get(&self, code: &str) -> Option<&Arc<Rule>> {
        self.rules.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rules.contains_key(code)
    }

    /// Loaded language codes, sorted
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.values()
    }

    /// Rules for the requested codes; all rules when `codes` is empty.
    /// Unknown codes are dropped.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> Vec<&Arc<Rule>> {
        if codes.is_empty() {
            return self.rules.values().collect();
        }
        self.rules
            .iter()
            .filter(|(code, _)| codes.iter().any(|c| c.as_ref() == code.as_str()))
            .map(|(_, rule)| rule)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
