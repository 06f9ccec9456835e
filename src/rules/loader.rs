/*!
 * Compiler from rule-file text to `Rule`.
 *
 * Loading is all-or-nothing per file: the first offending line aborts that
 * file with a `RuleLoadError`, and a directory load keeps going with the
 * remaining files.
 */

use anyhow::Result;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

use super::grammar::{numbered_lines, parse_coordinate, parse_coordinate_pair, FunctionSpec, RuleLine, Section};
use super::pattern::PatternKey;
use super::registry::{FunctionRegistry, PhoneticsFn, PostFn, RegisteredFunction};
use super::rule::{CategoryTables, PatternTable, PhonemeClass, Rule, RuleSet, TransliterationTable};
use super::Category;
use crate::errors::RuleLoadError;
use crate::file_utils::FileManager;
use crate::language_utils;

/// Outcome of loading every rule file of a directory
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully compiled rules
    pub rules: RuleSet,
    /// One error per file that failed to load
    pub failures: Vec<RuleLoadError>,
}

/// Load every `*.rule` file under `directory`
pub fn load_rules<P: AsRef<Path>>(directory: P, registry: &FunctionRegistry) -> Result<LoadReport> {
    RuleLoader::new(registry).load_dir(directory)
}

/// Rule file compiler bound to a function registry
pub struct RuleLoader<'r> {
    registry: &'r FunctionRegistry,
}

impl<'r> RuleLoader<'r> {
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Load the rule files directly inside a directory, sorted by path.
    /// Subdirectories are not searched.
    ///
    /// Only an unreadable directory is an `Err`; broken files end up in
    /// `LoadReport::failures`.
    pub fn load_dir<P: AsRef<Path>>(&self, directory: P) -> Result<LoadReport> {
        let directory = directory.as_ref();
        let mut files = FileManager::list_files(directory, "rule")?;
        files.sort();

        let mut report = LoadReport::default();
        for path in files {
            info!("Found rule file: {:?}", path);
            match self.load_file(&path) {
                Ok(rule) => {
                    if language_utils::validate_language_code(rule.language_code()).is_err() {
                        debug!("Rule file stem \"{}\" is not an ISO 639 code", rule.language_code());
                    }
                    info!("Loaded {} ({})", rule.language_code(), rule.language_name());
                    if let Some(previous) = report.rules.insert(rule) {
                        warn!("Language code \"{}\" defined twice, keeping {:?}", previous.language_code(), path);
                    }
                }
                Err(e) => {
                    warn!("Skipping {:?}: {}", path, e);
                    report.failures.push(e);
                }
            }
        }

        info!(
            "{} rule file(s) loaded from {:?}, {} failed",
            report.rules.len(),
            directory,
            report.failures.len()
        );
        Ok(report)
    }

    /// Load one rule file; the file stem is the language code
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Rule, RuleLoadError> {
        let path = path.as_ref();
        let language = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let text = std::fs::read_to_string(path).map_err(|e| RuleLoadError::Io {
            language: language.clone(),
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        self.parse(&language, &text)
    }

    /// Compile rule-file text for a language code
    pub fn parse(&self, language: &str, text: &str) -> Result<Rule, RuleLoadError> {
        let mut builder = RuleBuilder::new(language);
        let mut current: Option<Section> = None;

        for (line, kind) in numbered_lines(text) {
            match kind {
                RuleLine::Blank | RuleLine::Comment => {}
                RuleLine::Header(name) => {
                    let section = Section::parse(name).ok_or_else(|| RuleLoadError::UnknownSection {
                        language: language.to_string(),
                        section: name.to_string(),
                        line,
                    })?;
                    builder.open(section);
                    current = Some(section);
                }
                RuleLine::Malformed => {
                    return Err(match current {
                        Some(section) => RuleLoadError::InvalidKeyValue {
                            language: language.to_string(),
                            section: section.to_string(),
                            line,
                        },
                        None => RuleLoadError::OutsideSection { language: language.to_string(), line },
                    });
                }
                RuleLine::Entry { key, value } => {
                    let section = current.ok_or_else(|| RuleLoadError::OutsideSection {
                        language: language.to_string(),
                        line,
                    })?;
                    self.load_entry(&mut builder, section, key, value, line)?;
                }
            }
        }

        builder.build()
    }

    fn load_entry(
        &self,
        builder: &mut RuleBuilder,
        section: Section,
        key: &str,
        value: &str,
        line: usize,
    ) -> Result<(), RuleLoadError> {
        let language = builder.language.clone();
        match section {
            Section::Meta => {
                if key != "language_name" {
                    return Err(RuleLoadError::UnknownMetaKey { language, key: key.to_string(), line });
                }
                builder.language_name = Some(value.to_string());
            }
            Section::Phonetics => {
                let symbols: Vec<String> = value
                    .split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                match key {
                    "consonants" => builder.consonants = Some(symbols),
                    "vowels" => builder.vowels = Some(symbols),
                    _ => return Err(RuleLoadError::InvalidPhoneticsKey { language, key: key.to_string(), line }),
                }
            }
            Section::Consonants(category) | Section::Vowels(category) => {
                let coordinate = parse_coordinate(value).ok_or_else(|| RuleLoadError::InvalidCoordinate {
                    language: language.clone(),
                    section: section.to_string(),
                    value: value.to_string(),
                    line,
                })?;
                let pattern = PatternKey::parse(key).map_err(|reason| RuleLoadError::InvalidPatternKey {
                    language: language.clone(),
                    section: section.to_string(),
                    key: key.to_string(),
                    reason,
                    line,
                })?;

                builder
                    .symbol_uses
                    .push((section, line, pattern.symbols().map(str::to_string).collect()));

                let partial = builder.partial_mut(category);
                let table = match section {
                    Section::Consonants(_) => partial.consonants.get_or_insert_with(PatternTable::new),
                    _ => partial.vowels.get_or_insert_with(PatternTable::new),
                };
                if let Some(previous) = table.insert(pattern, coordinate) {
                    warn!(
                        "{}.rule line {}: \"{}\" redefined in .{} ({} -> {})",
                        language, line, key, section, previous, coordinate
                    );
                }
            }
            Section::Transliteration(category) => {
                let (consonant, vowel) =
                    parse_coordinate_pair(key).ok_or_else(|| RuleLoadError::InvalidTransliterationKey {
                        language: language.clone(),
                        section: section.to_string(),
                        key: key.to_string(),
                        line,
                    })?;
                if value.is_empty() {
                    return Err(RuleLoadError::EmptyTransliteration {
                        language,
                        section: section.to_string(),
                        line,
                    });
                }
                let table = builder
                    .partial_mut(category)
                    .transliteration
                    .get_or_insert_with(TransliterationTable::new);
                if let Some(previous) = table.insert(consonant, vowel, value.to_string()) {
                    warn!(
                        "{}.rule line {}: ({}, {}) redefined in .{} ({} -> {})",
                        language, line, consonant, vowel, section, previous, value
                    );
                }
            }
            Section::ToPhonetics => {
                builder.to_phonetics = Some(match self.function_spec(&language, section, key, value, line)? {
                    FunctionSpec::Identity => PhoneticsFn::identity(),
                    FunctionSpec::Named(name) => match self.resolve(&language, &name, section, line)? {
                        RegisteredFunction::Phonetics(func) => PhoneticsFn::named(&name, func),
                        RegisteredFunction::Post(_) => {
                            return Err(RuleLoadError::FunctionKindMismatch {
                                language,
                                name,
                                section: section.to_string(),
                                line,
                            });
                        }
                    },
                });
            }
            Section::Post(category) => {
                let post = match self.function_spec(&language, section, key, value, line)? {
                    FunctionSpec::Identity => PostFn::identity(),
                    FunctionSpec::Named(name) => match self.resolve(&language, &name, section, line)? {
                        RegisteredFunction::Post(func) => PostFn::named(&name, func),
                        RegisteredFunction::Phonetics(_) => {
                            return Err(RuleLoadError::FunctionKindMismatch {
                                language,
                                name,
                                section: section.to_string(),
                                line,
                            });
                        }
                    },
                };
                builder.partial_mut(category).post = Some(post);
            }
        }
        Ok(())
    }

    fn function_spec(
        &self,
        language: &str,
        section: Section,
        key: &str,
        value: &str,
        line: usize,
    ) -> Result<FunctionSpec, RuleLoadError> {
        FunctionSpec::parse(key, value).ok_or_else(|| RuleLoadError::InvalidFunctionSyntax {
            language: language.to_string(),
            section: section.to_string(),
            line,
        })
    }

    fn resolve(
        &self,
        language: &str,
        name: &str,
        section: Section,
        line: usize,
    ) -> Result<RegisteredFunction, RuleLoadError> {
        self.registry
            .get(language, name)
            .cloned()
            .ok_or_else(|| RuleLoadError::UnresolvedFunction {
                language: language.to_string(),
                name: name.to_string(),
                section: section.to_string(),
                line,
            })
    }
}

/// Tables of one category while the file is being read
#[derive(Default)]
struct PartialTables {
    consonants: Option<PatternTable>,
    vowels: Option<PatternTable>,
    transliteration: Option<TransliterationTable>,
    post: Option<PostFn>,
}

/// Accumulates sections, then checks completeness in `build`
struct RuleBuilder {
    language: String,
    language_name: Option<String>,
    consonants: Option<Vec<String>>,
    vowels: Option<Vec<String>>,
    people: PartialTables,
    places: PartialTables,
    to_phonetics: Option<PhoneticsFn>,
    // (section, line, symbols) of every pattern, checked once phonetics are known
    symbol_uses: Vec<(Section, usize, Vec<String>)>,
}

impl RuleBuilder {
    fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            language_name: None,
            consonants: None,
            vowels: None,
            people: PartialTables::default(),
            places: PartialTables::default(),
            to_phonetics: None,
            symbol_uses: Vec::new(),
        }
    }

    fn partial_mut(&mut self, category: Category) -> &mut PartialTables {
        match category {
            Category::People => &mut self.people,
            Category::Places => &mut self.places,
        }
    }

    /// A table section counts as present once its header is seen
    fn open(&mut self, section: Section) {
        match section {
            Section::Consonants(c) => {
                self.partial_mut(c).consonants.get_or_insert_with(PatternTable::new);
            }
            Section::Vowels(c) => {
                self.partial_mut(c).vowels.get_or_insert_with(PatternTable::new);
            }
            Section::Transliteration(c) => {
                self.partial_mut(c).transliteration.get_or_insert_with(TransliterationTable::new);
            }
            _ => {}
        }
    }

    fn missing(&self, what: impl Into<String>) -> RuleLoadError {
        RuleLoadError::Missing {
            language: self.language.clone(),
            what: what.into(),
        }
    }

    fn finish_tables(&self, partial: PartialTables, category: Category) -> Result<CategoryTables, RuleLoadError> {
        Ok(CategoryTables {
            consonants: partial
                .consonants
                .ok_or_else(|| self.missing(format!(".{}", Section::Consonants(category))))?,
            vowels: partial
                .vowels
                .ok_or_else(|| self.missing(format!(".{}", Section::Vowels(category))))?,
            transliteration: partial
                .transliteration
                .ok_or_else(|| self.missing(format!(".{}", Section::Transliteration(category))))?,
            post: partial
                .post
                .ok_or_else(|| self.missing(format!(".{}", Section::Post(category))))?,
        })
    }

    fn build(mut self) -> Result<Rule, RuleLoadError> {
        let language_name = self
            .language_name
            .take()
            .ok_or_else(|| self.missing(".meta language_name"))?;
        let consonant_symbols = self
            .consonants
            .take()
            .ok_or_else(|| self.missing(".phonetics consonants"))?;
        let vowel_symbols = self.vowels.take().ok_or_else(|| self.missing(".phonetics vowels"))?;

        let mut classes = HashMap::new();
        for symbol in &consonant_symbols {
            classes.insert(symbol.clone(), PhonemeClass::Consonant);
        }
        for symbol in &vowel_symbols {
            if classes.insert(symbol.clone(), PhonemeClass::Vowel) == Some(PhonemeClass::Consonant) {
                return Err(RuleLoadError::AmbiguousSymbol {
                    language: self.language.clone(),
                    symbol: symbol.clone(),
                });
            }
        }

        for (section, line, symbols) in &self.symbol_uses {
            if let Some(symbol) = symbols.iter().find(|s| !classes.contains_key(s.as_str())) {
                return Err(RuleLoadError::UndeclaredSymbol {
                    language: self.language.clone(),
                    section: section.to_string(),
                    symbol: symbol.clone(),
                    line: *line,
                });
            }
        }

        let to_phonetics = self.to_phonetics.take().ok_or_else(|| self.missing(".to_phonetics"))?;
        let people = std::mem::take(&mut self.people);
        let places = std::mem::take(&mut self.places);
        let people = self.finish_tables(people, Category::People)?;
        let places = self.finish_tables(places, Category::Places)?;

        debug!(
            "{}: {} consonant(s), {} vowel(s), {} people pattern(s), {} places pattern(s)",
            self.language,
            consonant_symbols.len(),
            vowel_symbols.len(),
            people.consonants.len() + people.vowels.len(),
            places.consonants.len() + places.vowels.len()
        );

        Ok(Rule {
            language_code: self.language,
            language_name,
            consonant_symbols,
            vowel_symbols,
            classes,
            people,
            places,
            to_phonetics,
        })
    }
}
