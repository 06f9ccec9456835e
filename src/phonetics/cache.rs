/*!
 * Memoizing wrapper around a phoneme producer.
 *
 * Batch runs often see the same word many times; a dictionary lookup is
 * cheap but a predictor is not, so successful results are kept.
 */

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::PhonemeProducer;
use crate::errors::PhoneticsError;

/// Caches successful results of an inner producer, keyed by uppercased word
pub struct CachedProducer<P> {
    inner: P,
    cache: Arc<RwLock<HashMap<String, Vec<String>>>>,
    hits: Arc<RwLock<usize>>,
    misses: Arc<RwLock<usize>>,
}

impl<P: PhonemeProducer> CachedProducer<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };
        (hits, misses, hit_rate)
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl<P: PhonemeProducer> PhonemeProducer for CachedProducer<P> {
    fn phonemes(&self, word: &str) -> Result<Vec<String>, PhoneticsError> {
        let key = word.to_uppercase();
        if let Some(symbols) = self.cache.read().get(&key) {
            *self.hits.write() += 1;
            return Ok(symbols.clone());
        }

        *self.misses.write() += 1;
        let symbols = self.inner.phonemes(word)?;
        self.cache.write().insert(key, symbols.clone());
        Ok(symbols)
    }
}
