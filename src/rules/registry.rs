/*!
 * Registry of per-language auxiliary functions.
 *
 * Rule files reference helpers by name (`out = lookup_or_predict(in)`).
 * Each language module registers its helpers here at startup, keyed by
 * `(language_code, name)`, and the loader resolves references against it.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::grammar::FunctionSpec;
use crate::errors::PhoneticsError;

/// Word to phoneme sequence
pub type PhoneticsCallable = dyn Fn(&str) -> Result<Vec<String>, PhoneticsError> + Send + Sync;

/// Post-processing of a transliterated string
pub type PostCallable = dyn Fn(&str) -> String + Send + Sync;

/// A callable as registered by a language module
#[derive(Clone)]
pub enum RegisteredFunction {
    /// Usable in `.to_phonetics`
    Phonetics(Arc<PhoneticsCallable>),
    /// Usable in `.post people` / `.post places`
    Post(Arc<PostCallable>),
}

impl fmt::Debug for RegisteredFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phonetics(_) => write!(f, "RegisteredFunction::Phonetics"),
            Self::Post(_) => write!(f, "RegisteredFunction::Post"),
        }
    }
}

/// Named callables keyed by language code and function name
#[derive(Default, Clone, Debug)]
pub struct FunctionRegistry {
    functions: HashMap<(String, String), RegisteredFunction>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a word-to-phonemes helper
    pub fn register_phonetics<F>(&mut self, language: &str, name: &str, func: F)
    where
        F: Fn(&str) -> Result<Vec<String>, PhoneticsError> + Send + Sync + 'static,
    {
        self.functions.insert(
            (language.to_string(), name.to_string()),
            RegisteredFunction::Phonetics(Arc::new(func)),
        );
    }

    /// Register a post-processing helper
    pub fn register_post<F>(&mut self, language: &str, name: &str, func: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.functions.insert(
            (language.to_string(), name.to_string()),
            RegisteredFunction::Post(Arc::new(func)),
        );
    }

    /// Look up a helper
    pub fn get(&self, language: &str, name: &str) -> Option<&RegisteredFunction> {
        self.functions.get(&(language.to_string(), name.to_string()))
    }

    /// Names registered for a language, sorted
    pub fn names_for(&self, language: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .functions
            .keys()
            .filter(|(lang, _)| lang == language)
            .map(|(_, name)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// The resolved `.to_phonetics` function of a rule
#[derive(Clone)]
pub struct PhoneticsFn {
    spec: FunctionSpec,
    func: Option<Arc<PhoneticsCallable>>,
}

impl PhoneticsFn {
    /// `out = in`: every character of the word is one symbol
    pub fn identity() -> Self {
        Self { spec: FunctionSpec::Identity, func: None }
    }

    /// `out = name(in)`
    pub fn named(name: &str, func: Arc<PhoneticsCallable>) -> Self {
        Self {
            spec: FunctionSpec::Named(name.to_string()),
            func: Some(func),
        }
    }

    /// Produce the phoneme sequence of a word
    pub fn apply(&self, word: &str) -> Result<Vec<String>, PhoneticsError> {
        match &self.func {
            Some(func) => func(word),
            None => Ok(word.chars().map(|c| c.to_string()).collect()),
        }
    }

    /// How the function was declared in the rule file
    pub fn spec(&self) -> &FunctionSpec {
        &self.spec
    }
}

impl fmt::Debug for PhoneticsFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhoneticsFn({})", self.spec)
    }
}

/// The resolved `.post <category>` function of a rule
#[derive(Clone)]
pub struct PostFn {
    spec: FunctionSpec,
    func: Option<Arc<PostCallable>>,
}

impl PostFn {
    /// `out = in`
    pub fn identity() -> Self {
        Self { spec: FunctionSpec::Identity, func: None }
    }

    /// `out = name(in)`
    pub fn named(name: &str, func: Arc<PostCallable>) -> Self {
        Self {
            spec: FunctionSpec::Named(name.to_string()),
            func: Some(func),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match &self.func {
            Some(func) => func(text),
            None => text.to_string(),
        }
    }

    pub fn spec(&self) -> &FunctionSpec {
        &self.spec
    }
}

impl fmt::Debug for PostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostFn({})", self.spec)
    }
}
