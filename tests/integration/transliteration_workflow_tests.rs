/*!
 * End-to-end tests over the shipped English rule file and dictionary
 */

use std::sync::Arc;

use ppat::file_utils::FileManager;
use ppat::languages::builtin_registry;
use ppat::phonetics::PhoneticDictionary;
use ppat::rules::{Category, RuleLoader, load_rules};
use ppat::translator::RuleTranslator;

use crate::common;

fn shipped_translator() -> RuleTranslator {
    common::init_test_logging();
    let dictionary = PhoneticDictionary::load(common::shipped_data_path("dict/cmudict.dict"))
        .expect("shipped dictionary should load");
    let registry = builtin_registry(Arc::new(dictionary));
    let report = load_rules(common::shipped_data_path("rule"), &registry).expect("shipped rules should load");
    assert!(report.failures.is_empty(), "shipped rule files failed: {:?}", report.failures);
    RuleTranslator::new(report.rules)
}

fn chinese(translator: &RuleTranslator, word: &str) -> (String, String) {
    let records = translator.translate(word, &["en"]).expect("word should translate");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, Category::People);
    assert_eq!(records[1].category, Category::Places);
    (records[0].chinese.clone(), records[1].chinese.clone())
}

#[test]
fn test_shippedRules_withMike_shouldGiveMaike() {
    let translator = shipped_translator();
    assert_eq!(chinese(&translator, "mike"), ("迈克".to_string(), "迈克".to_string()));
}

#[test]
fn test_shippedRules_withConsonantCluster_shouldUseCombinedEntry() {
    let translator = shipped_translator();
    assert_eq!(chinese(&translator, "Max").0, "马克斯");
    assert_eq!(chinese(&translator, "Oxford").0, "阿克斯弗德");
}

#[test]
fn test_shippedRules_withFinalA_shouldOnlyChangePersonalNames() {
    let translator = shipped_translator();
    assert_eq!(chinese(&translator, "Anna"), ("阿娜".to_string(), "阿纳".to_string()));
    assert_eq!(chinese(&translator, "Emma"), ("埃玛".to_string(), "埃马".to_string()));
    // vowel-final a after a vowel keeps the plain column
    assert_eq!(chinese(&translator, "Sarah").0, "塞拉");
}

#[test]
fn test_shippedRules_postProcessing_shouldDifferPerCategory() {
    let translator = shipped_translator();
    assert_eq!(chinese(&translator, "Frank"), ("弗拉恩克".to_string(), "夫拉恩克".to_string()));
    assert_eq!(chinese(&translator, "Seattle"), ("西阿塔尔".to_string(), "锡阿塔尔".to_string()));
}

#[test]
fn test_shippedRules_withDiphthongOy_shouldSplitIt() {
    let translator = shipped_translator();
    assert_eq!(chinese(&translator, "Roy").0, "罗伊");
    assert_eq!(chinese(&translator, "Boyd").0, "博伊德");
}

#[test]
fn test_shippedRules_shouldTranslateEveryDictionaryWord() {
    let translator = shipped_translator();
    let dictionary = FileManager::read_to_string(common::shipped_data_path("dict/cmudict.dict"))
        .expect("shipped dictionary should be readable");

    let words: Vec<&str> = dictionary
        .lines()
        .filter(|line| !line.starts_with(";;;") && !line.trim().is_empty())
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert!(words.len() >= 40);

    for word in words {
        let records = translator
            .translate(word, &[] as &[&str])
            .unwrap_or_else(|e| panic!("{} failed: {}", word, e));
        assert_eq!(records.len(), 2, "{}", word);
        assert!(records.iter().all(|r| !r.chinese.is_empty()), "{}", word);
    }
}

#[test]
fn test_shippedRules_shouldCoverEveryProducibleCoordinatePair() {
    let translator = shipped_translator();
    let rule = translator.rules().get("en").expect("en should be loaded");

    for category in Category::ALL {
        let tables = rule.tables(category);
        let vowels: Vec<u32> = tables.vowels.entries().iter().map(|e| e.coordinate).collect();
        for &v in &vowels {
            assert!(tables.transliteration.get(1, v).is_some(), "{} (1, {})", category, v);
        }
        for consonant in tables.consonants.entries() {
            let c = consonant.coordinate;
            assert!(tables.transliteration.get(c, 1).is_some(), "{} ({}, 1)", category, c);
            for &v in &vowels {
                assert!(tables.transliteration.get(c, v).is_some(), "{} ({}, {})", category, c, v);
            }
        }
    }
}

#[test]
fn test_shippedRules_shouldSurviveRuleTextRoundTrip() {
    let translator = shipped_translator();
    let rule = translator.rules().get("en").expect("en should be loaded");

    let dictionary = PhoneticDictionary::load(common::shipped_data_path("dict/cmudict.dict"))
        .expect("shipped dictionary should load");
    let registry = builtin_registry(Arc::new(dictionary));
    let reparsed = RuleLoader::new(&registry)
        .parse("en", &rule.to_rule_text())
        .expect("rendered rule should parse");

    for category in Category::ALL {
        assert_eq!(rule.tables(category).vowels.entries(), reparsed.tables(category).vowels.entries());
        assert_eq!(
            rule.tables(category).transliteration.len(),
            reparsed.tables(category).transliteration.len()
        );
    }
}
