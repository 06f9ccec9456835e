/*!
 * Tests for concurrent word-list translation
 */

use anyhow::Result;
use ppat::batch::BatchTranslator;
use ppat::errors::{InputError, TranslateError};
use ppat::file_utils::FileManager;
use ppat::rules::RuleSet;
use ppat::translator::RuleTranslator;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::common;

fn fixture_translator() -> RuleTranslator {
    let mut rules = RuleSet::new();
    rules.insert(common::parse_rule("en", &common::fixture_rule_text()));
    RuleTranslator::new(rules)
}

fn word_list() -> Vec<String> {
    FileManager::read_word_list(common::test_resource_path("words.txt")).expect("word list should load")
}

#[tokio::test]
async fn test_translate_words_shouldKeepInputOrder() -> Result<()> {
    let batch = BatchTranslator::new(fixture_translator(), 4);
    let outcomes = batch.translate_words(&word_list(), &[], |_, _| {}).await?;

    let words: Vec<&str> = outcomes.iter().map(|o| o.word.as_str()).collect();
    assert_eq!(words, ["Mike", "max", "Nina", "Ink", "Fin"]);

    let first: Vec<&str> = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|records| records[0].chinese.as_str())
        .collect();
    assert_eq!(first, ["迈艾克", "马克斯", "尼纳", "菲恩"]);
    Ok(())
}

#[tokio::test]
async fn test_translate_words_withFailingWord_shouldIsolateIt() -> Result<()> {
    let batch = BatchTranslator::new(fixture_translator(), 2);
    let outcomes = batch.translate_words(&word_list(), &[], |_, _| {}).await?;

    let failed: Vec<&str> = outcomes.iter().filter(|o| !o.is_ok()).map(|o| o.word.as_str()).collect();
    assert_eq!(failed, ["Ink"]);
    assert!(matches!(
        outcomes[3].result,
        Err(TranslateError::Input(InputError::UnknownPhoneme { .. }))
    ));

    let report = outcomes[3].to_report();
    assert!(report.records.is_empty());
    assert!(report.error.is_some());
    Ok(())
}

#[tokio::test]
async fn test_translate_words_shouldReportProgressForEveryWord() -> Result<()> {
    let batch = BatchTranslator::new(fixture_translator(), 3);
    let calls = Arc::new(AtomicUsize::new(0));
    let last_total = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let total = last_total.clone();
    batch
        .translate_words(&word_list(), &[], move |_done, words| {
            counter.fetch_add(1, Ordering::SeqCst);
            total.store(words, Ordering::SeqCst);
        })
        .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(last_total.load(Ordering::SeqCst), 5);
    Ok(())
}

#[test]
fn test_translate_words_withEmptyList_shouldReturnNothing() -> Result<()> {
    let batch = BatchTranslator::new(fixture_translator(), 1);
    let outcomes = tokio_test::block_on(batch.translate_words(&[], &[], |_, _| {}))?;
    assert!(outcomes.is_empty());
    Ok(())
}

#[test]
fn test_new_withZeroWorkers_shouldUseOne() {
    assert_eq!(BatchTranslator::new(fixture_translator(), 0).max_concurrent_words(), 1);
}

#[test]
fn test_wordReport_shouldOmitErrorOnSuccess() -> Result<()> {
    let batch = BatchTranslator::new(fixture_translator(), 2);
    let words = vec!["Mike".to_string()];
    let outcomes = tokio_test::block_on(batch.translate_words(&words, &[], |_, _| {}))?;

    let json = serde_json::to_value(outcomes[0].to_report())?;
    assert_eq!(json["word"], "Mike");
    assert_eq!(json["records"].as_array().map(Vec::len), Some(2));
    assert!(json.get("error").is_none());
    Ok(())
}
