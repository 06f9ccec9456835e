/*!
 * Concurrent translation of word lists.
 *
 * Words are translated on the tokio blocking pool. A semaphore bounds the
 * number of words in flight and every word succeeds or fails on its own,
 * so one unknown name does not stop the rest of the list.
 */

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::errors::TranslateError;
use crate::translator::{RuleTranslator, TransliterationRecord};

/// Result of one word of a batch
#[derive(Debug, Clone)]
pub struct WordOutcome {
    pub word: String,
    pub result: Result<Vec<TransliterationRecord>, TranslateError>,
}

impl WordOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Serializable form, with the error rendered as text
    pub fn to_report(&self) -> WordReport {
        match &self.result {
            Ok(records) => WordReport {
                word: self.word.clone(),
                records: records.clone(),
                error: None,
            },
            Err(e) => WordReport {
                word: self.word.clone(),
                records: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// JSON shape written by `batch -o`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WordReport {
    pub word: String,
    pub records: Vec<TransliterationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Translates many words with a shared `RuleTranslator`
pub struct BatchTranslator {
    translator: RuleTranslator,

    /// Maximum number of words translated at the same time
    max_concurrent_words: usize,
}

impl BatchTranslator {
    pub fn new(translator: RuleTranslator, max_concurrent_words: usize) -> Self {
        Self {
            translator,
            max_concurrent_words: max_concurrent_words.max(1),
        }
    }

    pub fn max_concurrent_words(&self) -> usize {
        self.max_concurrent_words
    }

    /// Translate `words` for `language_codes` (all when empty).
    ///
    /// Outcomes come back in input order. `progress_callback` receives
    /// `(done, total)` after each word.
    pub async fn translate_words(
        &self,
        words: &[String],
        language_codes: &[String],
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Vec<WordOutcome>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_words));
        let total_words = words.len();
        let processed_words = Arc::new(AtomicUsize::new(0));
        let language_codes: Arc<[String]> = language_codes.into();
        let start_time = Instant::now();

        let results = stream::iter(words.iter().cloned().enumerate())
            .map(|(word_index, word)| {
                let translator = self.translator.clone();
                let semaphore = semaphore.clone();
                let processed_words = processed_words.clone();
                let progress_callback = progress_callback.clone();
                let language_codes = language_codes.clone();

                async move {
                    let permit = semaphore
                        .acquire_owned()
                        .await
                        .context("Batch semaphore closed")?;

                    let outcome = tokio::task::spawn_blocking(move || {
                        let _permit = permit;
                        let result = translator.translate(&word, &language_codes[..]);
                        WordOutcome { word, result }
                    })
                    .await
                    .with_context(|| format!("Translation task for word {} failed", word_index + 1))?;

                    if let Err(e) = &outcome.result {
                        warn!("Word \"{}\" failed: {}", outcome.word, e);
                    }

                    let current = processed_words.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total_words);

                    Ok::<_, anyhow::Error>((word_index, outcome))
                }
            })
            .buffer_unordered(self.max_concurrent_words)
            .collect::<Vec<_>>()
            .await;

        let mut sorted_results = results.into_iter().collect::<Result<Vec<_>>>()?;
        sorted_results.sort_by_key(|(index, _)| *index);

        debug!(
            "Batch of {} word(s) translated in {:?}",
            total_words,
            start_time.elapsed()
        );

        Ok(sorted_results.into_iter().map(|(_, outcome)| outcome).collect())
    }
}
