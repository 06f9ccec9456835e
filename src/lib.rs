/*!
 * # PPAT - Phonetic Pattern Transliteration
 *
 * A Rust library that transliterates personal and place names into
 * Chinese characters using per-language rule files.
 *
 * ## Features
 *
 * - Plain-text rule files: one `<code>.rule` file per source language
 * - Longest-match phoneme patterns with pre/post contexts (`@`, `&`, `$`, `^`)
 * - Separate tables for personal names (`People`) and place names (`Places`)
 * - Per-language helpers registered in code (`name(in)` in rule files)
 * - CMU-format pronouncing dictionary for English
 * - Curated exact-match index (`people.json`, `places.json`)
 * - Concurrent word-list translation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `rules`: rule-file grammar, loader and the compiled `Rule` model
 * - `matcher`: longest context-sensitive pattern match
 * - `transliteration`: phoneme sequence to Chinese text
 * - `translator`: word-level entry point over every loaded language
 * - `phonetics`: pronouncing dictionary and phoneme producers
 * - `languages`: built-in per-language helpers
 * - `index`: curated exact-match lookups
 * - `batch`: concurrent translation of word lists
 * - `app_config`, `app_controller`: configuration and application wiring
 * - `file_utils`, `language_utils`: file system and ISO code helpers
 * - `errors`: error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod errors;
pub mod file_utils;
pub mod index;
pub mod language_utils;
pub mod languages;
pub mod matcher;
pub mod phonetics;
pub mod rules;
pub mod translator;
pub mod transliteration;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, InputError, MatchError, PhoneticsError, RuleLoadError, TranslateError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use rules::{load_rules, Category, FunctionRegistry, LoadReport, Rule, RuleSet};
pub use translator::{RuleTranslator, TransliterationRecord};
