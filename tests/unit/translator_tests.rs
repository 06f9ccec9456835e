/*!
 * Tests for the word-level rule translator
 */

use ppat::errors::{InputError, PhoneticsError, TranslateError};
use ppat::rules::{Category, FunctionRegistry, RuleLoader, RuleSet};
use ppat::translator::{RuleTranslator, TransliterationRecord, normalize_keyword};

use crate::common;

const NO_LANGUAGES: &[&str] = &[];

/// Fixture rule as `en` plus the letter rule as `zz`
fn two_language_translator() -> RuleTranslator {
    let mut rules = RuleSet::new();
    rules.insert(common::parse_rule("en", &common::fixture_rule_text()));
    let registry = FunctionRegistry::new();
    rules.insert(
        RuleLoader::new(&registry)
            .parse("zz", &common::identity_rule_text(common::LETTER_TABLES))
            .unwrap(),
    );
    RuleTranslator::new(rules)
}

fn record(keyword: &str, language: &str, category: Category, chinese: &str) -> TransliterationRecord {
    TransliterationRecord {
        keyword: keyword.to_string(),
        language: language.to_string(),
        category,
        chinese: chinese.to_string(),
    }
}

#[test]
fn test_normalizeKeyword_shouldOnlyUppercaseFirstLetter() {
    assert_eq!(normalize_keyword("mike").unwrap(), "Mike");
    assert_eq!(normalize_keyword("mcDonald").unwrap(), "McDonald");
    assert_eq!(normalize_keyword("émile").unwrap(), "Émile");
}

#[test]
fn test_normalizeKeyword_withWhitespace_shouldFail() {
    assert_eq!(
        normalize_keyword("Mike Smith"),
        Err(InputError::WordContainsWhitespace("Mike Smith".to_string()))
    );
    assert_eq!(normalize_keyword("Mike\t"), Err(InputError::WordContainsWhitespace("Mike\t".to_string())));
    assert_eq!(normalize_keyword(""), Err(InputError::EmptyWord));
}

#[test]
fn test_translate_withSingleLanguage_shouldReturnPeopleThenPlaces() {
    let translator = two_language_translator();
    let records = translator.translate("mike", &["en"]).unwrap();
    assert_eq!(
        records,
        vec![
            record("Mike", "English", Category::People, "迈艾克"),
            record("Mike", "English", Category::Places, "迈艾克"),
        ]
    );
}

#[test]
fn test_translate_withNoCodes_shouldAbortOnFirstLanguageThatCannotReadWord() {
    let translator = two_language_translator();
    // "Bado" is spelled with the letter symbols; "en" has no pronunciation for it
    let err = translator.translate("bado", NO_LANGUAGES).unwrap_err();
    assert_eq!(err, TranslateError::Phonetics(PhoneticsError::NotFound("Bado".to_string())));

    let records = translator.translate("bado", &["zz"]).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].chinese, "巴多");

    let records = translator.translate("Fin", NO_LANGUAGES);
    // "zz" cannot read capital F, so the whole call fails
    assert!(records.is_err());
}

#[test]
fn test_translate_withNoCodes_shouldReturnTwoRecordsPerLoadedLanguage() {
    let registry = FunctionRegistry::new();
    let loader = RuleLoader::new(&registry);
    let mut rules = RuleSet::new();
    for code in ["zz", "ya"] {
        let text = common::identity_rule_text(common::LETTER_TABLES)
            .replace("language_name = Test", &format!("language_name = Letters {}", code));
        rules.insert(loader.parse(code, &text).unwrap());
    }
    let translator = RuleTranslator::new(rules);

    let records = translator.translate("bado", NO_LANGUAGES).unwrap();
    assert_eq!(
        records,
        vec![
            record("Bado", "Letters ya", Category::People, "巴多"),
            record("Bado", "Letters ya", Category::Places, "巴多"),
            record("Bado", "Letters zz", Category::People, "巴多"),
            record("Bado", "Letters zz", Category::Places, "巴多"),
        ]
    );
}

#[test]
fn test_translate_withUnknownCode_shouldDropItSilently() {
    let translator = two_language_translator();
    let records = translator.translate("Mike", &["en", "xx"]).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.language == "English"));

    let records = translator.translate("Mike", &["xx"]).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_translate_withMultipleWords_shouldFailFastOnWhitespace() {
    let translator = two_language_translator();
    let err = translator.translate("Mike Smith", NO_LANGUAGES).unwrap_err();
    assert_eq!(
        err,
        TranslateError::Input(InputError::WordContainsWhitespace("Mike Smith".to_string()))
    );
}

#[test]
fn test_translate_withUndeclaredPhoneme_shouldReportInputError() {
    let translator = two_language_translator();
    let err = translator.translate("Ink", &["en"]).unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Input(InputError::UnknownPhoneme { ref symbol, .. }) if symbol == "NG"
    ));
}

#[test]
fn test_translateEach_shouldIsolateLanguages() {
    let translator = two_language_translator();
    let outcomes = translator.translate_each("Fin", NO_LANGUAGES).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].language_code, "en");
    let en = outcomes[0].result.as_ref().unwrap();
    assert_eq!(en[0].chinese, "菲恩");
    assert_eq!(en[1].chinese, "菲恩");

    assert_eq!(outcomes[1].language_code, "zz");
    assert!(matches!(
        outcomes[1].result,
        Err(TranslateError::Input(InputError::UnknownPhoneme { .. }))
    ));
}

#[test]
fn test_translateEach_withWhitespace_shouldFailBeforeAnyLanguage() {
    let translator = two_language_translator();
    assert!(translator.translate_each("a b", NO_LANGUAGES).is_err());
}

#[test]
fn test_translate_shouldBeUsableFromManyThreads() {
    let translator = two_language_translator();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let translator = translator.clone();
            std::thread::spawn(move || translator.translate("Max", &["en"]).unwrap())
        })
        .collect();
    for handle in handles {
        let records = handle.join().unwrap();
        assert_eq!(records[0].chinese, "马克斯");
    }
}

#[test]
fn test_transliterationRecord_shouldSerializeCategoryByName() {
    let json = serde_json::to_value(record("Mike", "English", Category::Places, "迈克")).unwrap();
    assert_eq!(json["category"], "Places");
    assert_eq!(json["keyword"], "Mike");
}
