/*!
 * Common test utilities for the ppat test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use ppat::app_config::Config;
use ppat::languages::builtin_registry;
use ppat::phonetics::PhoneticDictionary;
use ppat::rules::{FunctionRegistry, Rule, RuleLoader};

/// Route `log` output through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Path of a file shipped under `data/`
pub fn shipped_data_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("data");
    path.push(relative_path);
    path
}

/// Configuration over the rules, index and dictionary in `tests/resources`
pub fn test_config() -> Config {
    Config {
        rules_dir: test_resource_path("rules"),
        index_dir: test_resource_path("index"),
        phonetic_dictionary: Some(test_resource_path("dict/test.dict")),
        ..Config::default()
    }
}

/// Text of the fixture rule file
pub fn fixture_rule_text() -> String {
    fs::read_to_string(test_resource_path("rules/en.rule")).expect("fixture rule file should exist")
}

/// Dictionary with the pronunciations of `tests/resources/dict/test.dict`
pub fn test_dictionary() -> PhoneticDictionary {
    PhoneticDictionary::load(test_resource_path("dict/test.dict")).expect("test dictionary should load")
}

/// Built-in helpers backed by the test dictionary
pub fn test_registry() -> FunctionRegistry {
    builtin_registry(Arc::new(test_dictionary()))
}

/// Compile rule text for `language` with the test registry
pub fn parse_rule(language: &str, text: &str) -> Rule {
    let registry = test_registry();
    RuleLoader::new(&registry)
        .parse(language, text)
        .expect("rule text should compile")
}

/// Minimal well-formed rule text with identity functions; `body` holds the
/// phonetics and table sections
pub fn identity_rule_text(body: &str) -> String {
    format!(
        ".meta\nlanguage_name = Test\n\n{}\n\n.to_phonetics\nout = in\n\n.post people\nout = in\n\n.post places\nout = in\n",
        body
    )
}

/// Phoneme vector from string literals
pub fn phonemes(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// Phonetics and table sections over letter symbols, for `identity_rule_text`.
///
/// Consonants `B|b` map to 2 and `D|d` to 3; vowels `a` to 2 and `o` to 3.
pub const LETTER_TABLES: &str = ".phonetics
consonants = B|D|b|d
vowels = a|o

.consonants people
B | b = 2
D | d = 3

.vowels people
a = 2
o = 3

.transliteration people
1, 2 = 阿
1, 3 = 奥
2, 1 = 布
2, 2 = 巴
2, 3 = 博
3, 1 = 德
3, 2 = 达
3, 3 = 多

.consonants places
B | b = 2
D | d = 3

.vowels places
a = 2
o = 3

.transliteration places
1, 2 = 阿
1, 3 = 奥
2, 1 = 布
2, 2 = 巴
2, 3 = 博
3, 1 = 德
3, 2 = 达
3, 3 = 多";
