/*!
 * Error types for the ppat library.
 *
 * Rule loading, pattern matching, input validation and phoneme production
 * each get their own error enum, built with the thiserror crate. The
 * application edges (CLI, controller, configuration) use anyhow on top.
 */

use thiserror::Error;

/// Errors raised while compiling a `.rule` file into a `Rule`.
///
/// Every variant names the language code (the rule file stem) so that a
/// failure in one file can be reported while the other files keep loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleLoadError {
    /// The rule file could not be read
    #[error("Failed to read rule file {path}: {message}")]
    Io {
        /// Language code taken from the file stem
        language: String,
        /// Path of the rule file
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// A content line is not a single `key = value` pair
    #[error("Invalid key/value pair at line {line} in section \".{section}\" of {language}.rule")]
    InvalidKeyValue {
        language: String,
        section: String,
        line: usize,
    },

    /// A content line appears before any section header
    #[error("Line {line} of {language}.rule is outside of any section")]
    OutsideSection { language: String, line: usize },

    /// Section header with a name the grammar does not know
    #[error("Invalid section name \".{section}\" at line {line} in {language}.rule")]
    UnknownSection {
        language: String,
        section: String,
        line: usize,
    },

    /// Key other than `language_name` in the meta section
    #[error("Invalid key \"{key}\" in \".meta\" section at line {line} in {language}.rule")]
    UnknownMetaKey {
        language: String,
        key: String,
        line: usize,
    },

    /// Key other than `consonants` or `vowels` in the phonetics section
    #[error("Invalid key \"{key}\" (should be \"consonants\" or \"vowels\") in \".phonetics\" section at line {line} in {language}.rule")]
    InvalidPhoneticsKey {
        language: String,
        key: String,
        line: usize,
    },

    /// Coordinate value is not a positive integer
    #[error("Value \"{value}\" should be a positive integer in section \".{section}\" at line {line} in {language}.rule")]
    InvalidCoordinate {
        language: String,
        section: String,
        value: String,
        line: usize,
    },

    /// Pattern key could not be parsed
    #[error("Invalid pattern key \"{key}\" ({reason}) in section \".{section}\" at line {line} in {language}.rule")]
    InvalidPatternKey {
        language: String,
        section: String,
        key: String,
        reason: String,
        line: usize,
    },

    /// Transliteration key is not a valid `m, n` pair
    #[error("Invalid coordinate pair \"{key}\" in section \".{section}\" at line {line} in {language}.rule: both values must be positive and not both 1")]
    InvalidTransliterationKey {
        language: String,
        section: String,
        key: String,
        line: usize,
    },

    /// Transliteration entry with nothing on the right-hand side
    #[error("Value should not be empty in section \".{section}\" at line {line} in {language}.rule")]
    EmptyTransliteration {
        language: String,
        section: String,
        line: usize,
    },

    /// Function section line that is neither `out = in` nor `out = name(in)`
    #[error("Syntax error in \".{section}\" section at line {line} in {language}.rule: \"out = in\" or \"out = <func>(in)\" expected")]
    InvalidFunctionSyntax {
        language: String,
        section: String,
        line: usize,
    },

    /// A `name(in)` reference with no registered callable
    #[error("No function {name}() registered for language \"{language}\" (\".{section}\" section, line {line})")]
    UnresolvedFunction {
        language: String,
        name: String,
        section: String,
        line: usize,
    },

    /// A registered callable of the wrong shape for the section using it
    #[error("Function {name}() registered for language \"{language}\" cannot be used in \".{section}\" section (line {line})")]
    FunctionKindMismatch {
        language: String,
        name: String,
        section: String,
        line: usize,
    },

    /// A section or meta key needed for translation is absent
    #[error("Missing \"{what}\" in {language}.rule")]
    Missing { language: String, what: String },

    /// A pattern uses a symbol not declared in the phonetics section
    #[error("Symbol \"{symbol}\" at line {line} in section \".{section}\" of {language}.rule is not declared in \".phonetics\"")]
    UndeclaredSymbol {
        language: String,
        section: String,
        symbol: String,
        line: usize,
    },

    /// A symbol declared as both a consonant and a vowel
    #[error("Symbol \"{symbol}\" is declared both as a consonant and as a vowel in {language}.rule")]
    AmbiguousSymbol { language: String, symbol: String },
}

/// Errors raised by the transliteration compiler when the rules cannot
/// consume a phoneme sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// No pattern matched at some position, or a coordinate pair has no
    /// transliteration entry.
    #[error("PHONETICS: {phonemes:?}: no rule matched in \".{section}\" section, check your rule files")]
    NoRuleMatched {
        /// Section that failed (e.g. `consonants people`, `transliteration places`)
        section: String,
        /// Full phoneme sequence being transliterated
        phonemes: Vec<String>,
    },
}

/// Violations of the input contract, reported where they are first detected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Empty keyword
    #[error("Keyword must not be empty")]
    EmptyWord,

    /// Keyword with whitespace in it; only single words can be transliterated
    #[error("Keyword \"{0}\" must not contain whitespace")]
    WordContainsWhitespace(String),

    /// The phoneme producer returned nothing
    #[error("Empty phoneme sequence for language \"{language}\"")]
    EmptyPhonemes { language: String },

    /// A phoneme outside the consonant and vowel sets of the language
    #[error("Phoneme \"{symbol}\" is not declared for language \"{language}\" (sequence {phonemes:?})")]
    UnknownPhoneme {
        language: String,
        symbol: String,
        phonemes: Vec<String>,
    },
}

/// Errors from phoneme producers (dictionary lookup or prediction)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneticsError {
    /// The word is unknown to the dictionary and no fallback could handle it
    #[error("No pronunciation found for \"{0}\"")]
    NotFound(String),

    /// Producer specific failure
    #[error("Phoneme producer failed for \"{word}\": {message}")]
    Producer { word: String, message: String },
}

/// Errors from a single translation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Input contract violation
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Rule tables could not consume the phonemes
    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    /// Phoneme producer failure
    #[error("Phonetics error: {0}")]
    Phonetics(#[from] PhoneticsError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while loading a rule file
    #[error("Rule error: {0}")]
    Rule(#[from] RuleLoadError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslateError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl RuleLoadError {
    /// Language code of the rule file the error belongs to
    pub fn language(&self) -> &str {
        match self {
            Self::Io { language, .. }
            | Self::InvalidKeyValue { language, .. }
            | Self::OutsideSection { language, .. }
            | Self::UnknownSection { language, .. }
            | Self::UnknownMetaKey { language, .. }
            | Self::InvalidPhoneticsKey { language, .. }
            | Self::InvalidCoordinate { language, .. }
            | Self::InvalidPatternKey { language, .. }
            | Self::InvalidTransliterationKey { language, .. }
            | Self::EmptyTransliteration { language, .. }
            | Self::InvalidFunctionSyntax { language, .. }
            | Self::UnresolvedFunction { language, .. }
            | Self::FunctionKindMismatch { language, .. }
            | Self::Missing { language, .. }
            | Self::UndeclaredSymbol { language, .. }
            | Self::AmbiguousSymbol { language, .. } => language,
        }
    }

    /// Line number in the rule file, when the error is tied to one line
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidKeyValue { line, .. }
            | Self::OutsideSection { line, .. }
            | Self::UnknownSection { line, .. }
            | Self::UnknownMetaKey { line, .. }
            | Self::InvalidPhoneticsKey { line, .. }
            | Self::InvalidCoordinate { line, .. }
            | Self::InvalidPatternKey { line, .. }
            | Self::InvalidTransliterationKey { line, .. }
            | Self::EmptyTransliteration { line, .. }
            | Self::InvalidFunctionSyntax { line, .. }
            | Self::UnresolvedFunction { line, .. }
            | Self::FunctionKindMismatch { line, .. }
            | Self::UndeclaredSymbol { line, .. } => Some(*line),
            Self::Io { .. } | Self::Missing { .. } | Self::AmbiguousSymbol { .. } => None,
        }
    }
}
